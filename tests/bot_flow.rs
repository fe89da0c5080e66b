//! End-to-end flows through the normalizer, bus, and stock plugins.
//! Run with: cargo test --test bot_flow

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use wren_bot::application::errors::{BotError, PasteError};
use wren_bot::application::messaging::{EventBus, Normalizer};
use wren_bot::application::BotContext;
use wren_bot::domain::traits::{ChatClient, PasteService};
use wren_bot::infrastructure::config::Config;
use wren_bot::plugins::{self, PluginRegistry};

/// Chat double that records every outbound send
#[derive(Default)]
struct RecordingChat {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingChat {
    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    fn sent_to(&self, target: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(t, _)| t == target)
            .map(|(_, text)| text)
            .collect()
    }
}

#[async_trait]
impl ChatClient for RecordingChat {
    async fn send_channel(&self, channel: &str, text: &str) -> Result<(), BotError> {
        self.sent
            .lock()
            .unwrap()
            .push((channel.to_string(), text.to_string()));
        Ok(())
    }

    async fn send_direct(&self, nick: &str, text: &str) -> Result<(), BotError> {
        self.sent
            .lock()
            .unwrap()
            .push((nick.to_string(), text.to_string()));
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BotError> {
        Ok(())
    }
}

/// Paste double that counts requests
#[derive(Default)]
struct RecordingPaste {
    requests: Mutex<Vec<String>>,
}

impl RecordingPaste {
    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PasteService for RecordingPaste {
    async fn create_paste(&self, contents: &str) -> Result<String, PasteError> {
        self.requests.lock().unwrap().push(contents.to_string());
        Ok("http://paste.example/show/1".to_string())
    }
}

struct Harness {
    chat: Arc<RecordingChat>,
    paste: Arc<RecordingPaste>,
    bus: EventBus,
    normalizer: Normalizer,
    _state_dir: tempfile::TempDir,
    log_dir: PathBuf,
}

async fn start_bot(admins: &[&str]) -> Harness {
    let state_dir = tempfile::tempdir().unwrap();
    let log_dir = state_dir.path().join("channel_logs");

    let mut config = Config::default();
    config.bot.nick = "wren".to_string();
    config.bot.channels = vec!["#ops".to_string(), "#dev".to_string()];
    config.bot.admins = admins.iter().map(|s| s.to_string()).collect();
    config.storage.brain_dir = state_dir.path().to_path_buf();
    config.logging.dir = log_dir.clone();

    let chat = Arc::new(RecordingChat::default());
    let paste = Arc::new(RecordingPaste::default());
    let ctx = BotContext::new(config, chat.clone());

    let mut bus = EventBus::new();
    let mut registry = PluginRegistry::new();
    registry.register(Box::new(plugins::brain::BrainPlugin));
    registry.register(Box::new(plugins::help::HelpPlugin));
    registry.register(Box::new(plugins::authz::AuthzPlugin));
    registry.register(Box::new(plugins::logging::LoggingPlugin::with_paste(
        paste.clone(),
    )));
    registry.register(Box::new(plugins::echo::EchoPlugin));
    registry.register(Box::new(plugins::choose::ChoosePlugin));
    registry.load_all(&ctx, &mut bus).await.unwrap();

    let normalizer = Normalizer::new("wren", chat.clone());
    Harness {
        chat,
        paste,
        bus,
        normalizer,
        _state_dir: state_dir,
        log_dir,
    }
}

#[tokio::test]
async fn channel_help_request_gets_a_pointer_not_a_dump() {
    let bot = start_bot(&[]).await;
    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "wren: help")
        .await;

    let replies = bot.chat.sent_to("#ops");
    assert_eq!(
        replies,
        vec!["alice: to get help, use \"/msg wren help [command]\"".to_string()]
    );
    // nothing went to alice directly
    assert!(bot.chat.sent_to("alice").is_empty());
}

#[tokio::test]
async fn direct_help_lists_sorted_summaries() {
    let bot = start_bot(&[]).await;
    bot.normalizer.private_text(&bot.bus, "alice", "help").await;

    let replies = bot.chat.sent_to("alice");
    assert_eq!(replies.first().map(String::as_str), Some("Available commands:"));
    assert_eq!(replies.last().map(String::as_str), Some("End of help."));

    let summaries = &replies[1..replies.len() - 1];
    assert!(!summaries.is_empty());
    let mut sorted = summaries.to_vec();
    sorted.sort();
    assert_eq!(summaries, sorted.as_slice());
}

#[tokio::test]
async fn direct_help_for_unknown_command() {
    let bot = start_bot(&[]).await;
    bot.normalizer
        .private_text(&bot.bus, "alice", "help frobnicate")
        .await;

    let replies = bot.chat.sent_to("alice");
    assert_eq!(
        replies,
        vec!["No help for \"frobnicate\"".to_string(), "End of help.".to_string()]
    );
}

#[tokio::test]
async fn grant_flow_and_permission_scoping() {
    let bot = start_bot(&["root"]).await;

    bot.normalizer
        .private_text(&bot.bus, "root", "authz grant alice #ops history")
        .await;
    assert_eq!(bot.chat.sent_to("root"), vec!["ok".to_string()]);

    bot.normalizer
        .private_text(&bot.bus, "alice", "authz list")
        .await;
    let replies = bot.chat.sent_to("alice");
    assert_eq!(
        replies,
        vec![
            "Your permissions:".to_string(),
            "#ops: history".to_string(),
            "End of permissions.".to_string(),
        ]
    );
}

#[tokio::test]
async fn non_admin_cannot_grant_or_list_others() {
    let bot = start_bot(&["root"]).await;

    bot.normalizer
        .private_text(&bot.bus, "mallory", "authz grant mallory #ops admin")
        .await;
    bot.normalizer
        .private_text(&bot.bus, "mallory", "authz list root")
        .await;

    let replies = bot.chat.sent_to("mallory");
    assert_eq!(
        replies,
        vec![
            "Permission denied: you are not an admin for channel #ops".to_string(),
            "Permission denied: you are not a bot admin".to_string(),
        ]
    );
}

#[tokio::test]
async fn malformed_authz_command_is_reported() {
    let bot = start_bot(&[]).await;
    bot.normalizer
        .private_text(&bot.bus, "alice", "authz frob #ops")
        .await;
    assert_eq!(
        bot.chat.sent_to("alice"),
        vec!["Unknown or malformed command; say 'help authz' for help".to_string()]
    );
}

#[tokio::test]
async fn unauthorized_history_is_denied_without_a_paste_request() {
    let bot = start_bot(&["root"]).await;

    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "something to log")
        .await;
    bot.normalizer
        .private_text(&bot.bus, "bob", "history #ops")
        .await;

    assert_eq!(
        bot.chat.sent_to("bob"),
        vec!["Permission denied: you lack the 'history' permission for #ops".to_string()]
    );
    assert_eq!(bot.paste.request_count(), 0);
}

#[tokio::test]
async fn history_for_unknown_channel() {
    let bot = start_bot(&["root"]).await;
    bot.normalizer
        .private_text(&bot.bus, "root", "history #elsewhere")
        .await;
    assert_eq!(bot.chat.sent_to("root"), vec!["Unknown channel".to_string()]);
    assert_eq!(bot.paste.request_count(), 0);
}

#[tokio::test]
async fn authorized_history_pastes_the_log_and_replies_with_the_url() {
    let bot = start_bot(&["root"]).await;

    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "first line")
        .await;
    bot.normalizer
        .channel_text(&bot.bus, "bob", "#ops", "second line")
        .await;

    bot.normalizer
        .private_text(&bot.bus, "root", "authz grant alice #ops history")
        .await;
    bot.normalizer
        .private_text(&bot.bus, "alice", "history #ops")
        .await;

    assert_eq!(
        bot.chat.sent_to("alice"),
        vec!["http://paste.example/show/1".to_string()]
    );
    assert_eq!(bot.paste.request_count(), 1);
    let pasted = bot.paste.requests.lock().unwrap().join("");
    assert!(pasted.contains("<alice> first line"));
    assert!(pasted.contains("<bob> second line"));
}

#[tokio::test]
async fn history_with_no_logged_lines() {
    let bot = start_bot(&["root"]).await;
    bot.normalizer
        .private_text(&bot.bus, "root", "history #ops")
        .await;
    assert_eq!(bot.chat.sent_to("root"), vec!["No history found".to_string()]);
    assert_eq!(bot.paste.request_count(), 0);
}

#[tokio::test]
async fn addressed_echo_replies_in_the_channel() {
    let bot = start_bot(&[]).await;
    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "wren: echo hello world")
        .await;
    assert_eq!(bot.chat.sent_to("#ops"), vec!["hello world".to_string()]);
}

#[tokio::test]
async fn unaddressed_channel_chatter_gets_no_reply_but_is_logged() {
    let bot = start_bot(&[]).await;
    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "echo hello world")
        .await;
    assert!(bot.chat.sent().is_empty());

    // the line still landed in today's log
    let contents = read_log_until(&bot, "#ops", "<alice> echo hello world").await;
    assert!(contents.contains("<alice> echo hello world"));
}

/// Poll today's log for a channel until `needle` shows up; the drain
/// task runs concurrently and settles quickly.
async fn read_log_until(bot: &Harness, channel: &str, needle: &str) -> String {
    let today = chrono::Utc::now().format("%Y%m%d");
    let log_file = bot.log_dir.join(channel).join(format!("{}.txt", today));
    let mut contents = String::new();
    for _ in 0..100 {
        if let Ok(text) = std::fs::read_to_string(&log_file) {
            contents = text;
            if contents.contains(needle) {
                break;
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    contents
}

#[tokio::test]
async fn choose_replies_with_one_of_the_options() {
    let bot = start_bot(&[]).await;
    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "wren: choose north south")
        .await;
    let replies = bot.chat.sent_to("#ops");
    assert_eq!(replies.len(), 1);
    assert!(replies[0] == "I choose north" || replies[0] == "I choose south");
}

#[tokio::test]
async fn self_echo_lands_in_the_log_attributed_to_the_bot() {
    let bot = start_bot(&[]).await;

    bot.normalizer
        .channel_text(&bot.bus, "alice", "#ops", "wren: echo ping")
        .await;
    bot.normalizer.self_echo(&bot.bus, "#ops", "ping").await;

    let contents = read_log_until(&bot, "#ops", "<wren> ping").await;
    let user_line = contents.find("<alice> wren: echo ping").unwrap();
    let bot_line = contents.find("<wren> ping").unwrap();
    assert!(user_line < bot_line, "user line must precede the bot's echo");
}
