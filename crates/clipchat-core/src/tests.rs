#[cfg(test)]
mod tests {
    use crate::context::{AppContext, Ports};
    use crate::event_bus::EventBus;
    use crate::persist::{load_json, save_json};
    use crate::ports::*;
    use crate::preferences::{ThemeStore, UserStore, ANONYMOUS_NAME};
    use crate::registry::{ConversationRegistry, InitOutcome};
    use crate::responder::{classify, respond, respond_with, MatchRule};
    use crate::session::ChatSession;
    use crate::store::MessageStore;
    use crate::templates::{action_description, action_reply, Template, GENERIC_REPLIES, TRY_SAYING_HINT};
    use crate::catalog;
    use clipchat_types::action::CardAction;
    use clipchat_types::card::{CardKind, CardPayload};
    use clipchat_types::config::{ChatConfig, StorageKeys};
    use clipchat_types::conversation::{Conversation, DEFAULT_TITLE};
    use clipchat_types::event::ChatEvent;
    use clipchat_types::message::{Message, Sender};
    use clipchat_types::preference::{Theme, UserPatch};
    use clipchat_types::{ChatError, Result};

    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::rc::Rc;
    use std::task::{Context, Poll};

    // ─── Mock ports ──────────────────────────────────────────

    #[derive(Default)]
    struct MockStorage {
        data: RefCell<HashMap<String, String>>,
    }

    impl MockStorage {
        fn raw(&self, key: &str) -> Option<String> {
            self.data.borrow().get(key).cloned()
        }

        fn put(&self, key: &str, value: &str) {
            self.data.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    impl StoragePort for MockStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.data.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.data.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.data.borrow_mut().remove(key);
            Ok(())
        }

        fn backend_name(&self) -> &str {
            "mock"
        }
    }

    /// Storage that refuses every operation
    struct FailingStorage;

    impl StoragePort for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ChatError::Storage("unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ChatError::Storage("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(ChatError::Storage("unavailable".to_string()))
        }

        fn backend_name(&self) -> &str {
            "failing"
        }
    }

    /// Records requested delays and returns immediately
    #[derive(Default)]
    struct InstantTimer {
        requested: RefCell<Vec<u64>>,
    }

    #[async_trait(?Send)]
    impl TimerPort for InstantTimer {
        async fn sleep(&self, ms: u64) {
            self.requested.borrow_mut().push(ms);
        }
    }

    /// Suspends once per sleep so other futures get a turn
    struct YieldingTimer;

    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[async_trait(?Send)]
    impl TimerPort for YieldingTimer {
        async fn sleep(&self, _ms: u64) {
            YieldOnce(false).await;
        }
    }

    struct FixedColorScheme(bool);

    impl ColorSchemePort for FixedColorScheme {
        fn prefers_dark(&self) -> bool {
            self.0
        }
    }

    fn block_on<F: Future<Output = T>, T>(f: F) -> T {
        futures::executor::block_on(f)
    }

    fn new_session(storage: Rc<dyn StoragePort>) -> (ChatSession, EventBus, Rc<InstantTimer>) {
        let timer = Rc::new(InstantTimer::default());
        let bus = EventBus::new();
        let session = ChatSession::new(ChatConfig::default(), storage, timer.clone(), bus.clone());
        (session, bus, timer)
    }

    fn ready_session() -> (ChatSession, Rc<MockStorage>, EventBus) {
        let storage = Rc::new(MockStorage::default());
        let (session, bus, _) = new_session(storage.clone());
        session.init();
        session.clear_messages();
        bus.drain();
        (session, storage, bus)
    }

    fn senders(messages: &[Message]) -> Vec<Sender> {
        messages.iter().map(|m| m.sender).collect()
    }

    fn card_kind(message: &Message) -> Option<CardKind> {
        message.card.as_ref().map(CardPayload::kind)
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_new_is_empty() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        bus.emit(ChatEvent::TypingStarted);
        bus.emit(ChatEvent::TypingStopped);

        assert!(bus.has_pending());
        let events = bus.drain();
        assert_eq!(events, vec![ChatEvent::TypingStarted, ChatEvent::TypingStopped]);
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus = EventBus::new();
        let other = bus.clone();
        other.emit(ChatEvent::TypingStarted);
        assert!(bus.has_pending());
        assert_eq!(bus.drain().len(), 1);
        assert!(!other.has_pending());
    }

    // ─── Response matcher ────────────────────────────────────

    #[test]
    fn test_upload_keyword_returns_upload_card() {
        let reply = respond("上传视频");
        assert_eq!(reply.sender, Sender::Ai);
        match reply.card {
            Some(CardPayload::Upload(card)) => {
                assert_eq!(card.accept.as_deref(), Some("video/*"));
                assert!(card.multiple);
                assert_eq!(card.max_size, Some(500 * 1024 * 1024));
                assert_eq!(card.max_count, Some(10));
            }
            other => panic!("expected upload card, got {:?}", other),
        }
    }

    #[test]
    fn test_greeting_returns_welcome() {
        assert_eq!(classify("你好"), MatchRule::Probe(Template::Welcome));
        let reply = respond("你好");
        assert_eq!(reply.text, Template::Welcome.message().text);
        assert!(reply.card.is_none());
    }

    #[test]
    fn test_keyword_table_entries() {
        assert_eq!(classify("帮我配音"), MatchRule::Keyword(Template::VoiceSelect));
        assert_eq!(classify("有什么模板"), MatchRule::Keyword(Template::TemplateSelect));
        assert_eq!(classify("加个转场"), MatchRule::Keyword(Template::TransitionSelect));
        assert_eq!(classify("填写信息"), MatchRule::Keyword(Template::VideoInfoForm));
        assert_eq!(classify("导出吧"), MatchRule::Keyword(Template::RenderConfirm));
        assert_eq!(classify("移除这段"), MatchRule::Keyword(Template::DeleteConfirm));
    }

    #[test]
    fn test_card_kinds_per_template() {
        assert_eq!(card_kind(&respond("导入素材")), Some(CardKind::Upload));
        assert_eq!(card_kind(&respond("音色")), Some(CardKind::Select));
        assert_eq!(card_kind(&respond("设置")), Some(CardKind::Form));
        assert_eq!(card_kind(&respond("渲染")), Some(CardKind::Confirm));
    }

    #[test]
    fn test_first_table_entry_wins() {
        // hits both upload and voice-over
        assert_eq!(classify("上传配音"), MatchRule::Keyword(Template::UploadPrompt));
        // hits both template and render
        assert_eq!(classify("模板渲染"), MatchRule::Keyword(Template::TemplateSelect));
    }

    #[test]
    fn test_table_checked_before_probes() {
        assert_eq!(classify("删除字幕"), MatchRule::Keyword(Template::DeleteConfirm));
        assert_eq!(classify("你好，帮我上传"), MatchRule::Keyword(Template::UploadPrompt));
    }

    #[test]
    fn test_probes_in_order() {
        assert_eq!(classify("HELLO"), MatchRule::Probe(Template::Welcome));
        assert_eq!(classify("有哪些功能"), MatchRule::Probe(Template::Help));
        assert_eq!(classify("谢谢你"), MatchRule::Probe(Template::Thanks));
        assert_eq!(classify("加字幕"), MatchRule::Probe(Template::Subtitle));
        assert_eq!(classify("加点BGM"), MatchRule::Probe(Template::BackgroundMusic));
        assert_eq!(classify("裁剪一下"), MatchRule::Probe(Template::Trim));
        assert_eq!(classify("合并视频"), MatchRule::Probe(Template::Merge));
    }

    #[test]
    fn test_conversational_replies_carry_actions() {
        assert_eq!(respond("字幕").actions.len(), 2);
        assert_eq!(respond("背景音乐").actions.len(), 3);
        assert_eq!(respond("拼接").actions.len(), 2);
        assert!(respond("剪辑").actions.is_empty());
    }

    #[test]
    fn test_blank_input_falls_back() {
        assert_eq!(classify(""), MatchRule::Fallback);
        assert_eq!(classify("   "), MatchRule::Fallback);

        let mut rng = StdRng::seed_from_u64(7);
        let (rule, reply) = respond_with("   ", &mut rng);
        assert_eq!(rule, MatchRule::Fallback);
        assert!(reply.text.ends_with(TRY_SAYING_HINT));
    }

    #[test]
    fn test_fallback_uses_generic_reply() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let (_, reply) = respond_with("天气怎么样", &mut rng);
            let (filler, hint) = reply.text.split_once("\n\n").expect("two paragraphs");
            assert!(GENERIC_REPLIES.contains(&filler));
            assert_eq!(hint, TRY_SAYING_HINT);
            assert!(reply.card.is_none());
        }
    }

    #[test]
    fn test_templates_build_fresh_messages() {
        let a = Template::Help.message();
        let b = Template::Help.message();
        assert_eq!(a.text, b.text);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(catalog::voices().len(), 8);
        assert_eq!(catalog::video_templates().len(), 6);
        assert_eq!(catalog::transitions().len(), 6);
        assert_eq!(catalog::voice_options().len(), 8);
        assert!(catalog::template_options().iter().all(|o| o.preview.is_some()));
    }

    // ─── Card action tables ──────────────────────────────────

    #[test]
    fn test_action_descriptions() {
        let uploaded = CardAction::from_parts("file-uploaded", Some(json!({ "fileName": "a.mp4" })));
        assert_eq!(action_description(&uploaded), "已上传文件：a.mp4");
        assert_eq!(
            action_description(&CardAction::from_parts("file-uploaded", None)),
            "已上传文件"
        );

        let selected = CardAction::from_parts("option-selected", Some(json!({ "label": "晓晓", "value": "xiaoxiao" })));
        assert_eq!(action_description(&selected), "已选择：晓晓");
        assert_eq!(action_description(&CardAction::Confirmed), "操作已确认");
        assert_eq!(action_description(&CardAction::Cancelled), "操作已取消");
        assert_eq!(
            action_description(&CardAction::from_parts("something-else", None)),
            "操作完成"
        );
    }

    #[test]
    fn test_action_description_numeric_label() {
        let selected = CardAction::from_parts("option-selected", Some(json!({ "label": 3 })));
        assert_eq!(action_description(&selected), "已选择：3");
    }

    #[test]
    fn test_action_replies() {
        assert_eq!(
            action_reply(&CardAction::FormSubmitted { values: json!({}) }),
            "信息已收到，正在处理..."
        );
        assert_eq!(action_reply(&CardAction::Cancelled), "好的，已取消操作。还有其他需要吗？");
        assert_eq!(action_reply(&CardAction::from_parts("whatever", None)), "操作完成！");
    }

    // ─── Message store ───────────────────────────────────────

    #[test]
    fn test_store_append_and_remove() {
        let mut store = MessageStore::new();
        let first = Message::user("a");
        let second = Message::ai("b");
        let first_id = first.id.clone();
        store.append(first);
        store.append(second);

        assert_eq!(store.len(), 2);
        assert_eq!(store.position(&first_id), Some(0));
        assert!(store.remove(&first_id).is_some());
        assert!(store.remove(&first_id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_truncate_from() {
        let mut store = MessageStore::from_messages(vec![
            Message::user("1"),
            Message::ai("2"),
            Message::user("3"),
            Message::ai("4"),
        ]);
        store.truncate_from(2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.messages()[1].text, "2");
        store.clear();
        assert!(store.is_empty());
    }

    // ─── Persistence helpers ─────────────────────────────────

    #[test]
    fn test_load_json_missing_and_malformed() {
        let storage = MockStorage::default();
        assert_eq!(load_json::<Vec<Conversation>>(&storage, "chat-history"), None);
        storage.put("chat-history", "{not json");
        assert_eq!(load_json::<Vec<Conversation>>(&storage, "chat-history"), None);
    }

    #[test]
    fn test_save_json_failure_is_reported() {
        assert!(!save_json(&FailingStorage, "theme", &Theme::Dark));
        assert_eq!(load_json::<Theme>(&FailingStorage, "theme"), None);
    }

    // ─── Conversation registry ───────────────────────────────

    fn registry(storage: Rc<MockStorage>) -> ConversationRegistry {
        ConversationRegistry::new(storage, StorageKeys::default(), 20)
    }

    #[test]
    fn test_registry_first_run_creates_welcome() {
        let storage = Rc::new(MockStorage::default());
        let mut reg = registry(storage.clone());

        let outcome = reg.init();
        let InitOutcome::Created(id) = outcome else {
            panic!("expected a new conversation");
        };
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.active_id(), id);

        let active = reg.active().unwrap();
        assert_eq!(active.title, DEFAULT_TITLE);
        assert_eq!(active.messages.len(), 1);
        assert_eq!(active.messages[0].text, Template::Welcome.message().text);

        assert_eq!(storage.raw("current-chat"), Some(format!("\"{}\"", id)));
        assert!(storage.raw("chat-history").is_some());
    }

    #[test]
    fn test_registry_resumes_saved_conversation() {
        let storage = Rc::new(MockStorage::default());
        let id = {
            let mut reg = registry(storage.clone());
            reg.init();
            let id = reg.active_id().to_string();
            reg.sync_active(&[Message::user("做一个旅行vlog"), Message::ai("好的")]);
            id
        };

        let mut reg = registry(storage);
        assert_eq!(reg.init(), InitOutcome::Resumed(id.clone()));
        let active = reg.active().unwrap();
        assert_eq!(active.title, "做一个旅行vlog");
        assert_eq!(active.messages.len(), 2);
    }

    #[test]
    fn test_registry_malformed_history_starts_fresh() {
        let storage = Rc::new(MockStorage::default());
        storage.put("chat-history", "[{broken");
        storage.put("current-chat", "\"chat-gone\"");

        let mut reg = registry(storage);
        assert!(matches!(reg.init(), InitOutcome::Created(_)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_registry_new_chat_is_prepended() {
        let storage = Rc::new(MockStorage::default());
        let mut reg = registry(storage);
        reg.init();
        let older = reg.active_id().to_string();
        let newer = reg.create_new_chat().id.clone();

        assert_eq!(reg.conversations()[0].id, newer);
        assert_eq!(reg.conversations()[1].id, older);
        assert_eq!(reg.active_id(), newer);
        assert!(reg.active().unwrap().messages.is_empty());
    }

    #[test]
    fn test_registry_load_unknown_is_noop() {
        let storage = Rc::new(MockStorage::default());
        let mut reg = registry(storage);
        reg.init();
        let before = reg.active_id().to_string();
        assert!(reg.load_chat("chat-missing").is_none());
        assert_eq!(reg.active_id(), before);
    }

    #[test]
    fn test_registry_title_only_derived_once() {
        let storage = Rc::new(MockStorage::default());
        let mut reg = registry(storage);
        reg.init();
        reg.create_new_chat();

        let renamed = reg.sync_active(&[Message::user("这是一个超过二十个字符长度的视频标题需要被截断处理")]);
        let title = renamed.expect("first user message names the conversation");
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), 23);

        assert_eq!(reg.sync_active(&[Message::user("另一个")]), None);
        assert_eq!(reg.active().unwrap().title, title);
    }

    #[test]
    fn test_registry_reload_preserves_conversations() {
        let storage = Rc::new(MockStorage::default());
        let before = {
            let mut reg = registry(storage.clone());
            reg.init();
            let mut first = reg.active().unwrap().messages.clone();
            first.push(Message::user("填写信息"));
            first.push(Template::VideoInfoForm.message());
            first.push(Message::user("配音"));
            first.push(Template::VoiceSelect.message());
            first.push(Message::user("合并"));
            first.push(Template::Merge.message());
            reg.sync_active(&first);

            reg.create_new_chat();
            let renamed = reg.sync_active(&[
                Message::user("一二三四五六七八九十一二三四五六七八九十一"),
                Template::TransitionSelect.message(),
            ]);
            assert_eq!(renamed.as_deref(), Some("一二三四五六七八九十一二三四五六七八九十..."));
            reg.conversations().to_vec()
        };
        assert_eq!(before.len(), 2);

        let mut after = registry(storage);
        assert_eq!(after.init(), InitOutcome::Resumed(before[0].id.clone()));
        assert_eq!(before, after.conversations());
    }

    // ─── Session: sending ────────────────────────────────────

    #[test]
    fn test_send_appends_user_then_reply() {
        let (session, storage, bus) = ready_session();
        block_on(session.send_message("上传视频"));

        let messages = session.messages();
        assert_eq!(senders(&messages), vec![Sender::User, Sender::Ai]);
        assert_eq!(messages[0].text, "上传视频");
        assert_eq!(card_kind(&messages[1]), Some(CardKind::Upload));
        assert!(!session.is_typing());

        let events = bus.drain();
        assert!(events.contains(&ChatEvent::TypingStarted));
        assert_eq!(events.last(), Some(&ChatEvent::TypingStopped));

        let saved: Vec<Conversation> = serde_json::from_str(&storage.raw("chat-history").unwrap()).unwrap();
        assert_eq!(saved[0].messages.len(), 2);
        assert_eq!(saved[0].title, "上传视频");
    }

    #[test]
    fn test_send_blank_is_ignored() {
        let (session, _, bus) = ready_session();
        block_on(session.send_message(""));
        block_on(session.send_message("   \n"));
        assert!(!session.has_messages());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_send_trims_user_text() {
        let (session, _, _) = ready_session();
        block_on(session.send_message("  谢谢  "));
        assert_eq!(session.messages()[0].text, "谢谢");
    }

    #[test]
    fn test_typing_delay_within_window() {
        let storage = Rc::new(MockStorage::default());
        let (session, _, timer) = new_session(storage);
        session.init();
        for _ in 0..8 {
            block_on(session.send_message("hello"));
        }
        let requested = timer.requested.borrow();
        assert_eq!(requested.len(), 8);
        assert!(requested.iter().all(|ms| (500..=1500).contains(ms)));
    }

    #[test]
    fn test_concurrent_sends_keep_order() {
        let storage = Rc::new(MockStorage::default());
        let bus = EventBus::new();
        let session = ChatSession::new(ChatConfig::default(), storage, Rc::new(YieldingTimer), bus);
        session.init();
        session.clear_messages();

        block_on(async {
            futures::join!(session.send_message("上传"), session.send_message("渲染"));
        });

        let messages = session.messages();
        assert_eq!(
            senders(&messages),
            vec![Sender::User, Sender::Ai, Sender::User, Sender::Ai]
        );
        assert_eq!(messages[0].text, "上传");
        assert_eq!(card_kind(&messages[1]), Some(CardKind::Upload));
        assert_eq!(messages[2].text, "渲染");
        assert_eq!(card_kind(&messages[3]), Some(CardKind::Confirm));
    }

    // ─── Session: resend / delete / clear ────────────────────

    #[test]
    fn test_resend_truncates_and_resends() {
        let (session, _, _) = ready_session();
        block_on(session.send_message("你好"));
        block_on(session.send_message("配音"));
        block_on(session.send_message("转场"));
        assert_eq!(session.message_count(), 6);

        let target = session.messages()[2].id.clone();
        block_on(session.resend_message(&target));

        // index 2 + the resent pair
        let messages = session.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].text, "配音");
        assert_ne!(messages[2].id, target);
        assert_eq!(messages[3].sender, Sender::Ai);
    }

    #[test]
    fn test_resend_ignores_ai_and_unknown_ids() {
        let (session, _, _) = ready_session();
        block_on(session.send_message("你好"));
        let ai_id = session.messages()[1].id.clone();

        block_on(session.resend_message(&ai_id));
        block_on(session.resend_message("msg-missing"));
        assert_eq!(session.message_count(), 2);
    }

    #[test]
    fn test_delete_message() {
        let (session, _, bus) = ready_session();
        block_on(session.send_message("你好"));
        bus.drain();
        let id = session.messages()[0].id.clone();

        assert!(session.delete_message(&id));
        assert!(!session.delete_message(&id));
        assert_eq!(session.message_count(), 1);
        assert!(matches!(bus.drain().as_slice(), [ChatEvent::MessageDeleted { .. }]));
        assert_eq!(session.active_conversation().unwrap().messages.len(), 1);
    }

    #[test]
    fn test_clear_messages_keeps_conversation() {
        let (session, _, _) = ready_session();
        block_on(session.send_message("你好"));
        let id = session.active_id();
        session.clear_messages();

        assert!(!session.has_messages());
        assert_eq!(session.active_id(), id);
        assert!(session.active_conversation().unwrap().messages.is_empty());
    }

    // ─── Session: card actions ───────────────────────────────

    #[test]
    fn test_card_action_appends_system_and_reply() {
        let storage = Rc::new(MockStorage::default());
        let (session, _, timer) = new_session(storage);
        session.init();
        session.clear_messages();

        let action = CardAction::from_parts("file-uploaded", Some(json!({ "fileName": "clip.mov" })));
        block_on(session.handle_card_action("msg-1", action));

        let messages = session.messages();
        assert_eq!(senders(&messages), vec![Sender::System, Sender::Ai]);
        assert_eq!(messages[0].text, "已上传文件：clip.mov");
        assert_eq!(messages[1].text, "文件上传成功！接下来我们可以开始编辑了。");
        assert_eq!(*timer.requested.borrow(), vec![800]);
    }

    // ─── Session: conversations ──────────────────────────────

    #[test]
    fn test_session_switching_conversations() {
        let (session, _, _) = ready_session();
        let first = session.active_id();
        block_on(session.send_message("你好"));

        let second = session.create_new_chat();
        assert!(!session.has_messages());
        assert_eq!(session.histories()[0].id, second);

        assert!(session.load_chat(&first));
        assert_eq!(session.message_count(), 2);
        assert!(!session.load_chat("chat-missing"));
        assert_eq!(session.active_id(), first);
    }

    #[test]
    fn test_delete_active_with_others_loads_first() {
        let (session, _, _) = ready_session();
        let older = session.active_id();
        let newer = session.create_new_chat();

        assert!(session.delete_chat_history(&newer));
        assert_eq!(session.active_id(), older);
        assert_eq!(session.histories().len(), 1);
    }

    #[test]
    fn test_delete_last_conversation_creates_new() {
        let (session, _, bus) = ready_session();
        let only = session.active_id();

        assert!(session.delete_chat_history(&only));
        let histories = session.histories();
        assert_eq!(histories.len(), 1);
        assert_ne!(histories[0].id, only);
        assert_eq!(session.active_id(), histories[0].id);
        assert!(!session.has_messages());

        let events = bus.drain();
        assert!(events.contains(&ChatEvent::ConversationDeleted { conversation_id: only }));
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let (session, _, _) = ready_session();
        let older = session.active_id();
        let newer = session.create_new_chat();

        assert!(session.delete_chat_history(&older));
        assert_eq!(session.active_id(), newer);
        assert!(!session.delete_chat_history("chat-missing"));
    }

    #[test]
    fn test_session_survives_reload() {
        let storage = Rc::new(MockStorage::default());
        let id = {
            let (session, _, _) = new_session(storage.clone());
            session.init();
            block_on(session.send_message("合并视频"));
            session.active_id()
        };

        let (session, _, _) = new_session(storage);
        assert_eq!(session.init(), InitOutcome::Resumed(id));
        // welcome + user + reply
        assert_eq!(session.message_count(), 3);
        assert_eq!(session.histories()[0].title, "合并视频");
    }

    #[test]
    fn test_session_without_working_storage() {
        let (session, _, _) = new_session(Rc::new(FailingStorage));
        assert!(matches!(session.init(), InitOutcome::Created(_)));
        block_on(session.send_message("你好"));
        assert_eq!(session.message_count(), 3);
    }

    // ─── Theme ───────────────────────────────────────────────

    #[test]
    fn test_theme_follows_system_on_first_load() {
        let storage = Rc::new(MockStorage::default());
        let bus = EventBus::new();
        let theme = ThemeStore::new(storage, Rc::new(FixedColorScheme(true)), &StorageKeys::default(), bus.clone());
        assert_eq!(theme.init(), Theme::Dark);
        assert!(theme.is_dark());
        assert_eq!(bus.drain(), vec![ChatEvent::ThemeChanged { theme: Theme::Dark }]);
    }

    #[test]
    fn test_saved_theme_wins_over_system() {
        let storage = Rc::new(MockStorage::default());
        storage.put("theme", "\"light\"");
        let theme = ThemeStore::new(storage, Rc::new(FixedColorScheme(true)), &StorageKeys::default(), EventBus::new());
        assert_eq!(theme.init(), Theme::Light);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let storage = Rc::new(MockStorage::default());
        let theme = ThemeStore::new(storage.clone(), Rc::new(FixedColorScheme(false)), &StorageKeys::default(), EventBus::new());
        theme.init();
        assert_eq!(theme.toggle_theme(), Theme::Dark);
        assert_eq!(storage.raw("theme").as_deref(), Some("\"dark\""));
        assert_eq!(theme.toggle_theme(), Theme::Light);
        assert!(theme.is_light());
    }

    // ─── User ────────────────────────────────────────────────

    fn user_store(storage: Rc<MockStorage>) -> UserStore {
        UserStore::new(storage, &StorageKeys::default(), EventBus::new())
    }

    #[test]
    fn test_first_run_signs_in_guest() {
        let storage = Rc::new(MockStorage::default());
        let users = user_store(storage.clone());
        users.init();

        let user = users.user().unwrap();
        assert!(user.is_guest());
        assert_eq!(users.user_name(), "演示用户");
        assert!(storage.raw("user").is_some());
    }

    #[test]
    fn test_login_and_logout() {
        let storage = Rc::new(MockStorage::default());
        let users = user_store(storage.clone());
        users.init();

        assert!(!users.login("   "));
        assert!(users.user().unwrap().is_guest());

        assert!(users.login("小明"));
        let user = users.user().unwrap();
        assert_eq!(user.username, "小明");
        assert!(user.id.starts_with("user-"));

        users.logout();
        assert!(!users.is_logged_in());
        assert_eq!(users.user_name(), ANONYMOUS_NAME);
        assert_eq!(storage.raw("user"), None);
        assert!(!users.update_user(UserPatch::default()));
    }

    #[test]
    fn test_malformed_user_stays_signed_out() {
        let storage = Rc::new(MockStorage::default());
        storage.put("user", "not-json");
        let users = user_store(storage);
        users.init();
        assert!(!users.is_logged_in());
    }

    #[test]
    fn test_update_user_persists() {
        let storage = Rc::new(MockStorage::default());
        let users = user_store(storage.clone());
        users.init();
        assert!(users.update_user(UserPatch {
            username: Some("新名字".to_string()),
            ..Default::default()
        }));

        let reloaded = user_store(storage);
        reloaded.init();
        assert_eq!(reloaded.user_name(), "新名字");
    }

    // ─── Context ─────────────────────────────────────────────

    #[test]
    fn test_app_context_init() {
        let storage = Rc::new(MockStorage::default());
        let ports = Ports {
            storage: storage.clone(),
            timer: Rc::new(InstantTimer::default()),
            color_scheme: Rc::new(FixedColorScheme(false)),
        };
        let ctx = AppContext::new(ChatConfig::default(), ports);

        assert!(matches!(ctx.init(), InitOutcome::Created(_)));
        assert_eq!(ctx.theme.theme(), Theme::Light);
        assert!(ctx.user.is_logged_in());
        assert_eq!(ctx.session.message_count(), 1);

        let events = ctx.event_bus.drain();
        assert!(matches!(events.first(), Some(ChatEvent::ThemeChanged { .. })));
        assert!(matches!(events.last(), Some(ChatEvent::ConversationActivated { .. })));
    }

    #[test]
    fn test_key_prefix_isolates_storage() {
        let storage = Rc::new(MockStorage::default());
        let mut config = ChatConfig::default();
        config.storage.key_prefix = "demo:".to_string();
        let ctx = AppContext::new(
            config,
            Ports {
                storage: storage.clone(),
                timer: Rc::new(InstantTimer::default()),
                color_scheme: Rc::new(FixedColorScheme(false)),
            },
        );
        ctx.init();

        assert!(storage.raw("demo:chat-history").is_some());
        assert!(storage.raw("chat-history").is_none());
        assert!(storage.raw("demo:current-chat").is_some());
        assert!(storage.raw("demo:user").is_some());
        assert!(storage.raw("current-chat").is_none());
        assert!(storage.raw("user").is_none());
    }

    #[test]
    fn test_yield_once_completes() {
        let polled = Cell::new(0);
        block_on(async {
            polled.set(polled.get() + 1);
            YieldingTimer.sleep(10).await;
            polled.set(polled.get() + 1);
        });
        assert_eq!(polled.get(), 2);
    }
}
