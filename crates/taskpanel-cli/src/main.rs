use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use taskpanel_core::app::auth::redact_token;
use taskpanel_core::app::{AppBuilder, DEFAULT_TOKEN, ServerConfig};
use taskpanel_core::impls::{InMemoryTaskStore, JsonFilePersistence};
use taskpanel_core::ports::TaskStore;

/// Remote task control panel: stores scheduled tasks behind a bearer token.
#[derive(Debug, Parser)]
#[command(name = "taskpanel", version, about)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "TASKPANEL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, env = "TASKPANEL_PORT", default_value_t = 8080)]
    port: u16,

    /// Shared secret required as `Authorization: Bearer <token>`.
    #[arg(
        short,
        long,
        env = "TASKPANEL_TOKEN",
        default_value = DEFAULT_TOKEN,
        hide_env_values = true
    )]
    token: String,

    /// JSON file the task list is persisted to.
    #[arg(long, env = "TASKPANEL_TASKS_FILE", default_value = JsonFilePersistence::DEFAULT_FILE)]
    tasks_file: PathBuf,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            token: cli.token,
            tasks_file: cli.tasks_file,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG で上書き可能
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("taskpanel=info,taskpanel_core=info,tower_http=info")
            }),
        )
        .init();

    let config = ServerConfig::from(Cli::parse());
    if config.uses_default_token() {
        warn!("using the placeholder token, pass --token for any real deployment");
    }

    // (A) store を永続化ファイルから復元（読めなければ空で開始）
    let persistence = JsonFilePersistence::new(&config.tasks_file);
    let store = InMemoryTaskStore::open(persistence).await;
    let task_count = store.list().await.len();
    let store: Arc<dyn TaskStore> = Arc::new(store);

    // (B) Router を組み立てて待ち受け
    let app = AppBuilder::new(store).token(config.token.as_str()).build()?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    info!(
        addr = %config.bind_addr(),
        tasks_file = %config.tasks_file.display(),
        tasks = task_count,
        token = %redact_token(&config.token),
        "control panel starting"
    );

    // (C) Ctrl+C で graceful shutdown
    app.serve(listener, shutdown_signal()).await?;
    info!("control panel stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => warn!(error = %e, "could not listen for ctrl-c, shutting down"),
    }
}
