use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use wren_bot::application::errors::BotError;
use wren_bot::application::messaging::{EventBus, Normalizer};
use wren_bot::application::BotContext;
use wren_bot::domain::traits::ChatClient;
use wren_bot::infrastructure::adapters::ConsoleAdapter;
use wren_bot::infrastructure::config::Config;
use wren_bot::plugins::PluginRegistry;

#[derive(Parser)]
#[command(name = "wren-bot")]
#[command(about = "A plugin-based chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on a console session
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli.config) {
                error!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("wren-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = Config::default().save(&cli.config) {
                error!("Failed to write {}: {}", cli.config, e);
                std::process::exit(1);
            }
            println!("Wrote {}", cli.config);
        }
    }
}

fn run_bot(config_path: &str) -> Result<(), BotError> {
    let config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        Config::load_env()
    };

    info!("Starting wren-bot as {}", config.bot.nick);

    // Dispatch assumes cooperative, one-event-at-a-time scheduling.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BotError::Internal(e.to_string()))?;

    rt.block_on(run_console(config))
}

/// Dev-mode session: stdin lines become direct messages from the
/// "console" user; lines starting with a channel name (e.g.
/// "#ops hello") become channel messages said there.
async fn run_console(config: Config) -> Result<(), BotError> {
    let chat = Arc::new(ConsoleAdapter::new());
    let ctx = BotContext::new(config, chat.clone());

    let mut bus = EventBus::new();
    let mut registry = PluginRegistry::with_defaults();
    registry.load_all(&ctx, &mut bus).await?;

    let normalizer = Normalizer::new(ctx.nick(), chat.clone());

    info!("Console session ready; type 'quit' to exit");
    loop {
        let Some(line) = chat.read_line("> ").await else {
            break;
        };
        if line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let (channel, text) = match rest.split_once(' ') {
                Some((name, text)) => (format!("#{}", name), text),
                None => continue,
            };
            normalizer.channel_text(&bus, "console", &channel, text).await;
        } else {
            normalizer.private_text(&bus, "console", &line).await;
        }
    }

    chat.disconnect().await
}
