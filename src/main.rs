use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use memobot::application::services::{CommandMatcher, DefaultHandlers, MessageProcessor};
use memobot::domain::entities::Vocabulary;
use memobot::domain::traits::KvBackend;
use memobot::infrastructure::adapters::console::ConsoleAdapter;
use memobot::infrastructure::config::{Config, Secrets};
use memobot::infrastructure::store::{ProfileStore, RedisBackend};

#[derive(Parser)]
#[command(name = "memobot")]
#[command(about = "An SMS assistant that remembers who it is talking to", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the assistant with the console adapter
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
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
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("memobot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };

    // An unsalted deployment would hash identities wrong for its entire
    // lifetime; refuse to start instead.
    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            tracing::error!("Fatal misconfiguration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting {}", config.bot.name);

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let op_timeout = Duration::from_millis(config.store.timeout_ms);
        let backend: Option<Arc<dyn KvBackend>> = match &secrets.redis_url {
            Some(url) => match RedisBackend::connect(url, op_timeout).await {
                Ok(backend) => Some(Arc::new(backend)),
                Err(e) => {
                    tracing::warn!("Store unreachable, running degraded (every user appears new): {}", e);
                    None
                }
            },
            None => {
                tracing::warn!("REDIS_URL not set, running degraded (every user appears new)");
                None
            }
        };

        let store = match ProfileStore::new(backend, &secrets.hash_salt) {
            Ok(store) => store.with_ttl(Duration::from_secs(
                config.store.profile_ttl_days * 24 * 60 * 60,
            )),
            Err(e) => {
                tracing::error!("Fatal misconfiguration: {}", e);
                std::process::exit(1);
            }
        };
        tracing::info!(available = store.is_available().await, "Profile store ready");

        let matcher =
            CommandMatcher::new(Vocabulary::standard()).with_threshold(config.matcher.threshold);
        let processor = MessageProcessor::new(store, matcher, DefaultHandlers);

        ConsoleAdapter::new(&config.bot.dev_phone).run(&processor).await;
    });
}

fn init_config(path: &str) {
    if std::path::Path::new(path).exists() {
        tracing::warn!("Config file already exists: {}", path);
        return;
    }
    match serde_yaml::to_string(&Config::default()) {
        Ok(content) => match std::fs::write(path, content) {
            Ok(()) => println!("Wrote default config to {}", path),
            Err(e) => tracing::error!("Failed to write config: {}", e),
        },
        Err(e) => tracing::error!("Failed to serialize default config: {}", e),
    }
}
