mod ask;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use logging::{init_file_logger, init_logger};
use skycast_client::AgentClient;
use skycast_config::schema::{AgentConfig, MemoryConfig};
use skycast_config::{
    config_dir, config_file_path, default_log_dir, load_and_prepare, redact, validate,
    write_config, SkycastConfig,
};
use skycast_memory::{RemoteTurnStore, TurnStore};
use tui::TuiOptions;

#[derive(Parser)]
#[command(name = "skycast")]
#[command(about = "SkyCast — streaming weather chat over a hosted agent runtime")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.skycast/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the local agent endpoint URL
    #[arg(long, global = true)]
    local_url: Option<String>,

    /// Override the cloud runtime id (switches to cloud mode)
    #[arg(long, global = true)]
    runtime_id: Option<String>,

    /// Override the cloud region
    #[arg(long, global = true)]
    region: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive chat UI
    Chat,
    /// Ask a single question and print the final answer
    Ask {
        /// The prompt to send
        prompt: String,
        /// Print plain text instead of markdown
        #[arg(long)]
        plain: bool,
    },
    /// Print the current config with secrets redacted
    Config {
        /// Write a starter config file if none exists yet
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dir = config_dir();
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&dir));
    let mut config = load_and_prepare(&path).await?;
    apply_overrides(&mut config, &cli);

    let log_dir = config
        .logging
        .as_ref()
        .and_then(|l| l.dir.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_log_dir(&dir));
    let level = config.log_level();

    match cli.command {
        Commands::Chat => {
            // Console logging would corrupt the alternate screen.
            init_file_logger(&log_dir, &level);
            report_config_findings(&config);
            run_chat(config).await?;
        }
        Commands::Ask { prompt, plain } => {
            init_logger(&log_dir, &level);
            report_config_findings(&config);
            ask::run(&config, &prompt, plain).await?;
        }
        Commands::Config { init } => {
            init_logger(&log_dir, &level);
            if init && !path.exists() {
                write_config(&starter_config(), &path).await?;
                println!("# wrote starter config to {}", path.display());
            }
            let value = serde_json::to_value(&config)?;
            println!("{}", serde_yaml::to_string(&redact(&value))?);
        }
    }

    Ok(())
}

/// CLI flags win over the config file.
fn apply_overrides(config: &mut SkycastConfig, cli: &Cli) {
    if cli.local_url.is_none() && cli.runtime_id.is_none() && cli.region.is_none() {
        return;
    }

    let agent = config.agent.get_or_insert_with(AgentConfig::default);
    if let Some(url) = &cli.local_url {
        agent.mode = Some("local".into());
        agent.local_url = Some(url.clone());
    }
    if let Some(runtime_id) = &cli.runtime_id {
        agent.mode = Some("cloud".into());
        agent.runtime_id = Some(runtime_id.clone());
    }
    if let Some(region) = &cli.region {
        agent.region = Some(region.clone());
    }
}

/// Log validation findings now that a subscriber is installed.
fn report_config_findings(config: &SkycastConfig) {
    let report = validate(config);
    for warning in &report.warnings {
        warn!(path = %warning.path, message = %warning.message, "config warning");
    }
    for err in &report.errors {
        error!(path = %err.path, message = %err.message, "config error");
    }
}

pub(crate) fn build_client(config: &SkycastConfig) -> Result<AgentClient> {
    let endpoint = config.endpoint()?;
    info!(%endpoint, "agent endpoint selected");

    let mut client = AgentClient::new(endpoint);
    if let Some(token) = config.agent.as_ref().and_then(|a| a.bearer_token.clone()) {
        client = client.with_bearer_token(token);
    }
    Ok(client)
}

pub(crate) fn build_store(config: &SkycastConfig) -> Option<Arc<dyn TurnStore>> {
    let memory = config.memory.as_ref()?;
    if !memory.is_enabled() {
        return None;
    }
    let base_url = memory.base_url.clone()?;
    info!(%base_url, "memory service enabled");
    Some(Arc::new(RemoteTurnStore::new(base_url)))
}

async fn run_chat(config: SkycastConfig) -> Result<()> {
    let memory = config.memory.clone().unwrap_or_default();
    let options = TuiOptions {
        client: build_client(&config)?,
        store: build_store(&config),
        actor_id: memory.effective_actor_id(),
        memory_session: memory.effective_session_id(),
        last_k: memory.effective_last_k(),
        show_thinking: config.show_thinking(),
        refresh_delay: config.refresh_delay(),
    };

    let conversation = tui::run(options).await?;
    info!(messages = conversation.transcript.len(), "chat session ended");
    Ok(())
}

fn starter_config() -> SkycastConfig {
    SkycastConfig {
        agent: Some(AgentConfig {
            mode: Some("local".into()),
            local_url: Some(skycast_core::endpoint::DEFAULT_LOCAL_URL.into()),
            ..Default::default()
        }),
        memory: Some(MemoryConfig {
            enabled: Some(false),
            ..Default::default()
        }),
        ..Default::default()
    }
}
