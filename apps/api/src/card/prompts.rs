// Prompt construction for remote card generation.
// The template renderer never sees these; they exist only for the LLM path.

/// System prompt: the model must answer with HTML and nothing else.
pub const CARD_SYSTEM_PROMPT: &str = "你是一个专业的自我介绍卡片设计师，只返回HTML代码，不要包含任何解释或描述。确保使用Font Awesome图标库增强视觉效果。";

/// Chars of introduction text embedded into the user prompt. Anything past
/// this adds cost without changing the card.
const PROMPT_INTRO_MAX_CHARS: usize = 500;

const CARD_PROMPT_TEMPLATE: &str = r#"你是一个专业的自我介绍卡片设计师。请根据以下内容生成一个HTML卡片。要求：

1. 严格限制宽度为375px
2. 使用现代简约的设计风格
3. 合理使用颜色和布局突出重要信息
4. 只返回HTML代码，不要包含任何解释或描述
5. 确保代码可以直接在浏览器中运行
6. 所有样式都必须内联在HTML中
7. 必须使用Font Awesome图标库来增强视觉效果（已在页面中引入：<link href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css" rel="stylesheet">）
8. 为不同的信息部分添加适当的图标（如个人信息、专业技能、经历等）
9. 使用现代化的色彩方案和视觉层次
10. 精心设计卡片的每个细节，包括标题、内容、分隔线和间距

自我介绍内容：
{intro}

请直接返回HTML代码，不要有任何其他文字说明。生成的代码将直接嵌入到网页中显示。"#;

/// Builds the user prompt with at most [`PROMPT_INTRO_MAX_CHARS`] chars of
/// the introduction embedded.
pub fn build_card_prompt(intro: &str) -> String {
    let embedded: String = if intro.chars().count() <= PROMPT_INTRO_MAX_CHARS {
        intro.to_string()
    } else {
        let mut cut: String = intro.chars().take(PROMPT_INTRO_MAX_CHARS).collect();
        cut.push_str("...");
        cut
    };

    CARD_PROMPT_TEMPLATE.replace("{intro}", &embedded)
}
