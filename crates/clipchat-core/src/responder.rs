//! Response matcher: maps user input to a canned reply.
//!
//! Matching order:
//! 1. The keyword table, in table order. The first entry with any keyword
//!    contained in the normalized input wins.
//! 2. Conversational probes (greeting, help, thanks, subtitles, music,
//!    trimming, merging), in that order.
//! 3. A random generic reply followed by a "try saying" hint.
//!
//! The table is consulted before the probes, so input that hits both
//! (e.g. "删除字幕") gets the table reply.

use rand::seq::SliceRandom;
use rand::Rng;

use clipchat_types::message::Message;

use crate::templates::{Template, GENERIC_REPLIES, TRY_SAYING_HINT};

/// Ordered keyword table. Order is significant: first match wins.
pub const KEYWORD_TABLE: &[(Template, &[&str])] = &[
    (Template::UploadPrompt, &["上传", "导入", "添加素材", "传视频", "传文件"]),
    (Template::VoiceSelect, &["配音", "音色", "朗读", "播报", "语音"]),
    (Template::TemplateSelect, &["模板", "套用模板", "使用模板"]),
    (Template::TransitionSelect, &["转场", "过渡", "切换效果"]),
    (Template::VideoInfoForm, &["设置", "标题", "信息", "填写"]),
    (Template::RenderConfirm, &["渲染", "导出", "生成视频", "完成"]),
    (Template::DeleteConfirm, &["删除", "移除", "清除"]),
];

/// Conversational probes, checked after the keyword table.
pub const PROBES: &[(Template, &[&str])] = &[
    (Template::Welcome, &["你好", "hi", "hello"]),
    (Template::Help, &["帮助", "功能", "能做什么"]),
    (Template::Thanks, &["谢谢", "感谢"]),
    (Template::Subtitle, &["字幕", "文字"]),
    (Template::BackgroundMusic, &["背景音乐", "bgm"]),
    (Template::Trim, &["剪辑", "裁剪", "分割"]),
    (Template::Merge, &["拼接", "合并"]),
];

/// Which rule produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Keyword(Template),
    Probe(Template),
    Fallback,
}

impl MatchRule {
    pub fn template(&self) -> Option<Template> {
        match self {
            MatchRule::Keyword(t) | MatchRule::Probe(t) => Some(*t),
            MatchRule::Fallback => None,
        }
    }
}

/// Trimmed, lower-cased input
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Find the rule that applies to `input`, without building a reply.
pub fn classify(input: &str) -> MatchRule {
    let input = normalize(input);
    let hit = |keywords: &[&str]| keywords.iter().any(|k| input.contains(k));

    if let Some(entry) = KEYWORD_TABLE.iter().find(|entry| hit(entry.1)) {
        return MatchRule::Keyword(entry.0);
    }
    if let Some(entry) = PROBES.iter().find(|entry| hit(entry.1)) {
        return MatchRule::Probe(entry.0);
    }
    MatchRule::Fallback
}

/// Build the reply for `input`, drawing the fallback text from `rng`.
pub fn respond_with<R: Rng + ?Sized>(input: &str, rng: &mut R) -> (MatchRule, Message) {
    let rule = classify(input);
    let message = match rule.template() {
        Some(template) => template.message(),
        None => fallback_message(rng),
    };
    (rule, message)
}

/// Build the reply for `input` using the thread RNG.
pub fn respond(input: &str) -> Message {
    let (rule, message) = respond_with(input, &mut rand::thread_rng());
    log::debug!("Matched {:?} for input of {} chars", rule, input.chars().count());
    message
}

fn fallback_message<R: Rng + ?Sized>(rng: &mut R) -> Message {
    let filler = GENERIC_REPLIES.choose(rng).copied().unwrap_or(GENERIC_REPLIES[0]);
    Message::ai(format!("{}\n\n{}", filler, TRY_SAYING_HINT))
}
