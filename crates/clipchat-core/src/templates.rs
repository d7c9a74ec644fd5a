//! Canned replies of the mock assistant.
//!
//! Every call to `Template::message` builds a fresh `Message` with a new id
//! and timestamp; the template content itself never changes.

use serde_json::json;

use clipchat_types::action::CardAction;
use clipchat_types::card::*;
use clipchat_types::message::{ActionButton, Message};

use crate::catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Welcome,
    UploadPrompt,
    VoiceSelect,
    TemplateSelect,
    TransitionSelect,
    VideoInfoForm,
    RenderConfirm,
    DeleteConfirm,
    Help,
    Thanks,
    Subtitle,
    BackgroundMusic,
    Trim,
    Merge,
}

const WELCOME: &str = "你好！我是你的AI视频混剪助手。👋\n\n我可以帮你：\n- 🎬 快速创建和编辑视频\n- 🎙️ 为视频配音\n- ✨ 添加转场和特效\n- 📝 生成字幕和标题\n\n告诉我你想做什么吧！";

const HELP: &str = "我可以帮你完成以下操作：

🎬 **视频编辑**
- 上传和管理视频素材
- 剪辑、拼接视频片段
- 添加转场效果

✨ **特效和样式**
- 添加文字和字幕
- 应用视频模板
- 调整视频效果

🎙️ **音频处理**
- AI智能配音
- 添加背景音乐
- 调整音量和音效

📤 **导出和分享**
- 渲染高清视频
- 多种格式导出
- 一键分享

你想要做什么呢？";

const UPLOAD_MAX_BYTES: u64 = 500 * 1024 * 1024;

impl Template {
    pub fn message(self) -> Message {
        match self {
            Template::Welcome => Message::ai(WELCOME),
            Template::UploadPrompt => Message::ai(
                "好的，请上传你的视频素材。支持MP4、MOV、AVI等常见格式，单个文件最大500MB。",
            )
            .with_card(CardPayload::Upload(UploadCard {
                accept: Some("video/*".to_string()),
                multiple: true,
                max_size: Some(UPLOAD_MAX_BYTES),
                max_count: Some(10),
            })),
            Template::VoiceSelect => Message::ai("请选择一个配音音色，您可以点击试听每个音色的效果：")
                .with_card(CardPayload::Select(SelectCard {
                    options: catalog::voice_options(),
                    multiple: false,
                    searchable: true,
                })),
            Template::TemplateSelect => Message::ai("为您推荐以下视频模板，请选择一个：").with_card(
                CardPayload::Select(SelectCard {
                    options: catalog::template_options(),
                    multiple: false,
                    searchable: true,
                }),
            ),
            Template::TransitionSelect => {
                Message::ai("请选择一个转场效果：").with_card(CardPayload::Select(SelectCard {
                    options: catalog::transition_options(),
                    multiple: false,
                    searchable: false,
                }))
            }
            Template::VideoInfoForm => Message::ai("请填写视频的基本信息：")
                .with_card(CardPayload::Form(video_info_form())),
            Template::RenderConfirm => Message::ai("视频编辑已完成，是否开始渲染？").with_card(
                CardPayload::Confirm(ConfirmCard {
                    title: "确认渲染".to_string(),
                    description: "视频时长：2分30秒\n预计渲染时间：3-5分钟\n导出格式：MP4 (1080P)"
                        .to_string(),
                    confirm_text: Some("开始渲染".to_string()),
                    cancel_text: Some("稍后再说".to_string()),
                    danger: false,
                }),
            ),
            Template::DeleteConfirm => Message::ai("确认要删除这个素材吗？删除后无法恢复。").with_card(
                CardPayload::Confirm(ConfirmCard {
                    title: "确认删除".to_string(),
                    description: "此操作不可逆，请谨慎操作。".to_string(),
                    confirm_text: Some("确认删除".to_string()),
                    cancel_text: Some("取消".to_string()),
                    danger: true,
                }),
            ),
            Template::Help => Message::ai(HELP),
            Template::Thanks => Message::ai("不客气！很高兴能帮到你。还有其他需要吗？😊"),
            Template::Subtitle => Message::ai(
                "好的，我可以帮你添加字幕。请告诉我：\n1. 字幕内容是什么？\n2. 希望字幕出现在什么位置？\n3. 需要什么样的字体样式？",
            )
            .with_actions(vec![
                ActionButton::primary("自动识别字幕", "auto-subtitle"),
                ActionButton::default_kind("手动输入", "manual-subtitle"),
            ]),
            Template::BackgroundMusic => Message::ai("我可以帮你添加背景音乐。你想要：").with_actions(vec![
                ActionButton::primary("从音乐库选择", "select-music"),
                ActionButton::default_kind("上传本地音乐", "upload-music"),
                ActionButton::default_kind("AI生成音乐", "generate-music"),
            ]),
            Template::Trim => Message::ai(
                "我来帮你剪辑视频。请告诉我需要保留哪个时间段，例如：\n- \"保留前30秒\"\n- \"删除0:15到0:30的部分\"\n- \"只要中间一分钟\"",
            ),
            Template::Merge => Message::ai(
                "好的，我会按照你上传的顺序将视频拼接起来。需要在视频之间添加转场效果吗？",
            )
            .with_actions(vec![
                ActionButton::primary("添加转场", "add-transition"),
                ActionButton::default_kind("直接拼接", "direct-merge"),
            ]),
        }
    }
}

fn video_info_form() -> FormCard {
    let mut title = FormField::new("title", "视频标题", FieldKind::Input);
    title.placeholder = Some("请输入视频标题".to_string());
    title.required = true;

    let mut description = FormField::new("description", "视频描述", FieldKind::Textarea);
    description.placeholder = Some("请输入视频描述".to_string());

    let mut category = FormField::new("category", "视频分类", FieldKind::Select);
    category.required = true;
    category.options = vec![
        SelectOption::new("商业", "business"),
        SelectOption::new("教育", "education"),
        SelectOption::new("生活", "life"),
        SelectOption::new("娱乐", "entertainment"),
    ];

    let mut quality = FormField::new("quality", "导出质量", FieldKind::Select);
    quality.default_value = Some(json!("1080p"));
    quality.options = vec![
        SelectOption::new("720P", "720p"),
        SelectOption::new("1080P (推荐)", "1080p"),
        SelectOption::new("4K", "4k"),
    ];

    let mut watermark = FormField::new("addWatermark", "添加水印", FieldKind::Switch);
    watermark.default_value = Some(json!(true));

    FormCard {
        fields: vec![title, description, category, quality, watermark],
        submit_text: Some("确认".to_string()),
    }
}

// ─── Fallback replies ────────────────────────────────────────

pub const GENERIC_REPLIES: &[&str] = &[
    "好的，我明白了。让我来帮你处理。",
    "正在为你处理这个请求...",
    "这是一个很好的想法！我来帮你实现。",
    "收到！马上为你操作。",
];

pub const TRY_SAYING_HINT: &str =
    "你可以试试说：\n- \"上传视频素材\"\n- \"为视频配音\"\n- \"使用模板\"\n- \"查看帮助\"";

// ─── Card action tables ──────────────────────────────────────

/// Text of the system message recording what the user did
pub fn action_description(action: &CardAction) -> String {
    match action {
        CardAction::FileUploaded { file_name: Some(name) } => format!("已上传文件：{}", name),
        CardAction::FileUploaded { file_name: None } => "已上传文件".to_string(),
        CardAction::OptionSelected { label: Some(label), .. } => format!("已选择：{}", label),
        CardAction::OptionSelected { label: None, .. } => "已选择".to_string(),
        CardAction::FormSubmitted { .. } => "表单已提交".to_string(),
        CardAction::Confirmed => "操作已确认".to_string(),
        CardAction::Cancelled => "操作已取消".to_string(),
        CardAction::Other { .. } => "操作完成".to_string(),
    }
}

/// Text of the AI reply that follows a card action
pub fn action_reply(action: &CardAction) -> &'static str {
    match action {
        CardAction::FileUploaded { .. } => "文件上传成功！接下来我们可以开始编辑了。",
        CardAction::OptionSelected { .. } => "好的，已为您选择。让我们继续下一步。",
        CardAction::FormSubmitted { .. } => "信息已收到，正在处理...",
        CardAction::Confirmed => "正在执行操作，请稍候...",
        CardAction::Cancelled => "好的，已取消操作。还有其他需要吗？",
        CardAction::Other { .. } => "操作完成！",
    }
}
