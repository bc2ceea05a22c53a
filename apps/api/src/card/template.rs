// Deterministic fallback card renderer.
// Pure string computation with no I/O and no randomness, so the same
// introduction always renders byte-identical markup.

use crate::card::skills::extract_skills;

/// Display excerpt cap, in chars rather than bytes; introductions are
/// mostly CJK.
const EXCERPT_MAX_CHARS: usize = 300;
/// Heading used when no name can be picked out of the first line.
const NAME_PLACEHOLDER: &str = "个人介绍";
/// Characters that end a leading name: full-width and ASCII comma / colon.
const NAME_DELIMITERS: [char; 4] = ['，', '：', ',', ':'];

/// Renders the local profile card for an introduction.
pub fn render_template_card(intro: &str) -> String {
    let name = escape_html(extract_name(intro));
    let excerpt = escape_html(&body_excerpt(intro));
    let badges = skill_badges(intro);

    format!(
        r#"<div style="width: 375px; border-radius: 16px; overflow: hidden; font-family: 'Noto Sans SC', sans-serif; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.08); background: linear-gradient(to bottom, #ffffff, #f8f9fa);">
    <!-- 顶部区域 -->
    <div style="background: linear-gradient(135deg, #4a6cf7, #2541b2); color: white; padding: 20px; text-align: center;">
        <div style="background-color: rgba(255, 255, 255, 0.2); width: 80px; height: 80px; border-radius: 50%; margin: 0 auto 15px; display: flex; align-items: center; justify-content: center;">
            <i class="fas fa-user-circle" style="font-size: 50px;"></i>
        </div>
        <h2 style="margin: 0; font-size: 22px; font-weight: 700;">{name}</h2>
        <p style="margin: 5px 0 0; font-size: 14px; opacity: 0.9;">个人简介卡片</p>
    </div>
    <!-- 内容区域 -->
    <div style="padding: 20px;">
        <div style="margin-bottom: 20px;">
            <div style="display: flex; align-items: center; margin-bottom: 12px;">
                <i class="fas fa-quote-left" style="color: #4a6cf7; font-size: 18px; margin-right: 8px;"></i>
                <h3 style="margin: 0; font-size: 16px; color: #333;">个人简介</h3>
            </div>
            <div style="background-color: #f8f9fa; border-radius: 12px; padding: 15px; font-size: 14px; line-height: 1.6; color: #444;">{excerpt}</div>
        </div>
        <div style="margin-bottom: 20px;">
            <div style="display: flex; align-items: center; margin-bottom: 12px;">
                <i class="fas fa-lightbulb" style="color: #4a6cf7; font-size: 18px; margin-right: 8px;"></i>
                <h3 style="margin: 0; font-size: 16px; color: #333;">技能标签</h3>
            </div>
            <div style="display: flex; flex-wrap: wrap; gap: 8px;">
                {badges}
            </div>
        </div>
        <!-- 底部区域 -->
        <div style="display: flex; justify-content: center; margin-top: 20px; color: #aaa;">
            <span style="font-size: 12px;">自我介绍卡片生成器</span>
        </div>
    </div>
</div>"#
    )
}

/// Picks a display name off the first non-empty line: everything before the
/// first delimiter. Lines without a delimiter get the generic heading, which
/// avoids promoting a whole sentence to a name.
fn extract_name(intro: &str) -> &str {
    let first_line = match intro.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => line,
        None => return NAME_PLACEHOLDER,
    };

    match first_line.find(&NAME_DELIMITERS[..]) {
        Some(at) => {
            let name = first_line[..at].trim();
            if name.is_empty() {
                NAME_PLACEHOLDER
            } else {
                name
            }
        }
        None => NAME_PLACEHOLDER,
    }
}

/// Truncates the introduction for display, appending an ellipsis when cut.
fn body_excerpt(intro: &str) -> String {
    if intro.chars().count() <= EXCERPT_MAX_CHARS {
        return intro.to_string();
    }

    let mut cut: String = intro.chars().take(EXCERPT_MAX_CHARS).collect();
    cut.push_str("...");
    cut
}

fn skill_badges(intro: &str) -> String {
    extract_skills(intro)
        .iter()
        .map(|skill| {
            format!(
                r#"<span style="background-color: #e8f0fe; color: #4a6cf7; padding: 5px 10px; border-radius: 30px; font-size: 12px;">{skill}</span>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ")
}

/// Escapes user text interpolated into the card markup.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
