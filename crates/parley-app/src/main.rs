mod cli;
mod repl;

use std::process::ExitCode;
use std::time::Duration;

use parley_ai::{ModelRouter, SessionController, ToolDispatcher, ToolRegistry};
use parley_common::{BackendKind, ParleyError};
use parley_config::ParleyConfig;
use parley_store::MessageStore;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already set in the process environment win.
fn load_dotenv() {
    let mut candidates = vec![std::path::PathBuf::from(".env")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("parley").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let line = line.strip_prefix("export ").unwrap_or(line);
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn init_logging(directive: &str) {
    let directive = directive
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

/// Wire store, router, tools and controller from config.
fn build_session(
    config: &ParleyConfig,
    args: &cli::Args,
) -> Result<SessionController, ParleyError> {
    let db_path = match &args.db {
        Some(path) => path.clone(),
        None => config.storage.resolved_path()?,
    };
    let store = MessageStore::open(&db_path)?;

    let http = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| ParleyError::Other(format!("failed to build HTTP client: {e}")))?;
    let registry = ToolRegistry::builtin(&config.tools, http);
    let dispatcher = ToolDispatcher::new(registry)
        .with_tool_timeout(Duration::from_secs(u64::from(config.timeouts.tool_secs)))
        .with_backend_timeout(Duration::from_secs(u64::from(config.timeouts.backend_secs)))
        .with_max_rounds(config.session.max_tool_rounds);

    let router = ModelRouter::from_config(config);
    let mut session = SessionController::from_config(config, store, router, dispatcher);

    if let Some(name) = &args.model {
        session.switch_backend(name.parse::<BackendKind>()?);
    }

    tracing::info!(
        db = %db_path.display(),
        backend = %session.active_backend(),
        "session ready"
    );
    Ok(session)
}

async fn run(config: ParleyConfig, args: cli::Args) -> Result<(), ParleyError> {
    let mut session = build_session(&config, &args)?;

    // Surface a missing key at startup instead of on the first message.
    let active = session.active_backend();
    if !session.router().has_credential(active) {
        let descriptor = session.router().descriptor(active);
        eprintln!(
            "warning: {} has no credential; set {} or switch with /model",
            descriptor.logical_name, descriptor.credential_env
        );
    }

    repl::run(&mut session).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file before anything else
    load_dotenv();

    let args = cli::parse();

    let config = parley_config::load_config(args.config.as_deref());

    let directive = match (&args.log_level, &config) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => "parley=info".to_string(),
    };
    init_logging(&directive);

    tracing::info!("Parley v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = match config {
        Ok(config) => run(config, args).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
