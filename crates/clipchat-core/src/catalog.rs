//! Mock catalogs behind the voice, template, and transition pickers.

use clipchat_types::card::SelectOption;
use clipchat_types::catalog::{Gender, TransitionEffect, VideoTemplate, VoiceOption};

const VOICES: &[(&str, &str, Gender, &str)] = &[
    ("voice-1", "成熟男声 - 张明", Gender::Male, "沉稳大气，适合商业宣传"),
    ("voice-2", "知性女声 - 李雅", Gender::Female, "温柔亲切，适合教育培训"),
    ("voice-3", "活力男声 - 王阳", Gender::Male, "年轻有活力，适合短视频"),
    ("voice-4", "甜美女声 - 小美", Gender::Female, "甜美可爱，适合生活分享"),
    ("voice-5", "磁性男声 - 陈峰", Gender::Male, "低沉磁性，适合纪录片"),
    ("voice-6", "专业女声 - 刘静", Gender::Female, "专业严谨，适合新闻播报"),
    ("voice-7", "幽默男声 - 赵伟", Gender::Male, "幽默风趣，适合娱乐内容"),
    ("voice-8", "清新女声 - 周婷", Gender::Female, "清新自然，适合VLOG"),
];

const TEMPLATES: &[(&str, &str, &str, &str, &[&str])] = &[
    ("template-1", "科技发布会", "适合产品发布、科技展示的专业模板", "商业", &["科技", "商业", "发布会"]),
    ("template-2", "企业宣传片", "展示企业实力和文化的经典模板", "商业", &["企业", "宣传", "品牌"]),
    ("template-3", "教育培训", "适合在线课程、知识分享的清晰模板", "教育", &["教育", "培训", "课程"]),
    ("template-4", "旅行VLOG", "记录旅行美好瞬间的活力模板", "生活", &["旅行", "VLOG", "生活"]),
    ("template-5", "美食探店", "展示美食魅力的诱人模板", "生活", &["美食", "探店", "生活"]),
    ("template-6", "运动健身", "动感十足的运动健身模板", "生活", &["运动", "健身", "活力"]),
];

const TRANSITIONS: &[(&str, &str, &str)] = &[
    ("transition-1", "淡入淡出", "经典平滑过渡效果"),
    ("transition-2", "溶解", "画面溶解过渡"),
    ("transition-3", "滑动", "画面滑动切换"),
    ("transition-4", "缩放", "画面缩放过渡"),
    ("transition-5", "翻转", "3D翻转效果"),
    ("transition-6", "擦除", "擦除过渡效果"),
];

const THUMBNAIL_BASE: &str = "https://via.placeholder.com/300x200?text=";

pub fn voices() -> Vec<VoiceOption> {
    VOICES
        .iter()
        .map(|&(id, name, gender, description)| VoiceOption {
            id: id.to_string(),
            name: name.to_string(),
            gender,
            description: description.to_string(),
            preview_url: None,
            language: "zh-CN".to_string(),
        })
        .collect()
}

pub fn video_templates() -> Vec<VideoTemplate> {
    TEMPLATES
        .iter()
        .map(|&(id, name, description, category, tags)| VideoTemplate {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            thumbnail: format!("{}{}", THUMBNAIL_BASE, name),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

pub fn transitions() -> Vec<TransitionEffect> {
    TRANSITIONS
        .iter()
        .map(|&(id, name, description)| TransitionEffect {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            preview: None,
        })
        .collect()
}

// ─── Select options ──────────────────────────────────────────

pub fn voice_options() -> Vec<SelectOption> {
    voices()
        .into_iter()
        .map(|v| {
            let icon = match v.gender {
                Gender::Male => "UserOutlined",
                Gender::Female => "WomanOutlined",
            };
            let mut option = SelectOption::new(v.name, v.id).with_description(v.description);
            option.icon = Some(icon.to_string());
            option
        })
        .collect()
}

pub fn template_options() -> Vec<SelectOption> {
    video_templates()
        .into_iter()
        .map(|t| {
            let mut option = SelectOption::new(t.name, t.id).with_description(t.description);
            option.preview = Some(t.thumbnail);
            option
        })
        .collect()
}

pub fn transition_options() -> Vec<SelectOption> {
    transitions()
        .into_iter()
        .map(|t| SelectOption::new(t.name, t.id).with_description(t.description))
        .collect()
}
