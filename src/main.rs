use anyhow::Result;
use clap::Parser;
use parlance::cli::{Cli, Commands};
use parlance::config::Config;
use parlance::llm::{OllamaConfig, OllamaGenerator};
use parlance::server;
use parlance::session::Engines;
use parlance::stt::{RemoteTranscriber, RemoteTranscriberConfig};
use parlance::tts::{HttpSynthesizer, HttpSynthesizerConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parlance=info,tower_http=warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Config) => {
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        Some(Commands::Serve { port, host }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
        }
        None => {}
    }

    let engines = build_engines(&config)?;
    server::serve(config, engines).await?;
    Ok(())
}

/// Wires the configured HTTP-backed engines.
fn build_engines(config: &Config) -> Result<Engines> {
    Ok(Engines {
        transcriber: Arc::new(RemoteTranscriber::new(RemoteTranscriberConfig {
            endpoint: config.stt.endpoint.clone(),
            timeout_ms: config.stt.timeout_ms,
        })?),
        generator: Arc::new(OllamaGenerator::new(OllamaConfig {
            url: config.llm.url.clone(),
            model: config.llm.model.clone(),
        })),
        synthesizer: Arc::new(HttpSynthesizer::new(HttpSynthesizerConfig {
            endpoint: config.tts.endpoint.clone(),
            voice: config.tts.voice.clone(),
            timeout_ms: config.tts.timeout_ms,
        })?),
    })
}
