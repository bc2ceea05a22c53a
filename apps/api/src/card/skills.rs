// Skill tag extraction: substring scan over a fixed keyword vocabulary.
// Pure functions; the template renderer is the sole production caller.

/// Keywords recognized in introduction text. Scan order is presentation
/// order, so general terms come before the technology-specific ones.
const SKILL_VOCABULARY: &[&str] = &[
    "编程",
    "开发",
    "设计",
    "沟通",
    "管理",
    "组织",
    "领导",
    "分析",
    "解决问题",
    "创新",
    "学习",
    "团队协作",
    "HTML",
    "CSS",
    "JavaScript",
    "Python",
    "Java",
    "C++",
    "PHP",
    "数据库",
    "UI",
    "UX",
    "前端",
    "后端",
    "全栈",
    "项目管理",
    "营销",
    "销售",
    "研究",
    "教学",
    "演讲",
    "写作",
    "人工智能",
    "机器学习",
    "数据分析",
    "云计算",
    "网络安全",
];

/// Filler tags appended when the scan finds fewer than [`MIN_SKILLS`].
const DEFAULT_SKILLS: &[&str] = &["沟通能力", "团队协作", "解决问题", "创新思维", "学习能力"];

pub const MIN_SKILLS: usize = 5;
pub const MAX_SKILLS: usize = 10;

/// Extracts skill tags from an introduction.
///
/// The vocabulary is scanned once in order, so the result is deduplicated by
/// construction. Matches are capped at [`MAX_SKILLS`]; short results are
/// padded from [`DEFAULT_SKILLS`], skipping tags already present, which keeps
/// the count inside `MIN_SKILLS..=MAX_SKILLS` for every input.
pub fn extract_skills(text: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();

    for &keyword in SKILL_VOCABULARY {
        if found.len() == MAX_SKILLS {
            break;
        }
        if text.contains(keyword) {
            found.push(keyword);
        }
    }

    for &filler in DEFAULT_SKILLS {
        if found.len() >= MIN_SKILLS {
            break;
        }
        if !found.contains(&filler) {
            found.push(filler);
        }
    }

    found
}
