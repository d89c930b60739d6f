use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;

use glowcheck_agent::{Agent, AgentProfile, OpenAiProvider};
use glowcheck_config::AppConfig;
use glowcheck_core::{ImageInput, ImageSource, PhaseEvent, Tool};
use glowcheck_gateway::{start_server, GatewayState};
use glowcheck_ocr::TesseractExtractor;
use glowcheck_orchestrator::Orchestrator;
use glowcheck_tools::WebSearchTool;

#[derive(Parser)]
#[command(name = "glowcheck")]
#[command(about = "Glowcheck — cosmetic ingredient analyzer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI and analysis API
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze one ingredient-label image from the command line
    Analyze {
        /// Path to a PNG/JPEG/GIF image of the ingredient list
        image: PathBuf,
        /// Tag the input as a camera capture instead of an upload
        #[arg(long)]
        camera: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Config first: a missing API key should fail fast, before anything
    // else starts.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("glowcheck: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => serve(config, port).await,
        Commands::Analyze { image, camera } => analyze_file(config, image, camera).await,
    }
}

/// Wire up the process-lifetime pipeline: one provider, two agents, one OCR
/// backend. Constructed once and reused by every session.
fn build_orchestrator(config: &AppConfig) -> Orchestrator {
    let provider = Arc::new(
        OpenAiProvider::new(config.openai_api_key.clone())
            .with_base_url(config.openai_base_url.clone()),
    );
    let search: Arc<dyn Tool> = Arc::new(WebSearchTool::new());

    let analyzer = Arc::new(Agent::new(
        AgentProfile::ingredient_analyzer(),
        config.model.clone(),
        provider.clone() as Arc<dyn glowcheck_core::ChatProvider>,
        vec![search.clone()],
    ));
    let health = Arc::new(Agent::new(
        AgentProfile::health_assessor(),
        config.model.clone(),
        provider as Arc<dyn glowcheck_core::ChatProvider>,
        vec![search],
    ));
    let extractor = Arc::new(TesseractExtractor::new(
        config.tesseract_command.clone(),
        config.tesseract_language.clone(),
    ));

    Orchestrator::new(analyzer, health, extractor)
}

async fn serve(config: AppConfig, port: Option<u16>) -> Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        config.bind_address,
        port.unwrap_or(config.port)
    )
    .parse()
    .context("invalid bind address")?;

    let state = GatewayState {
        orchestrator: Arc::new(build_orchestrator(&config)),
    };
    info!(model = %config.model, "glowcheck starting");
    start_server(addr, state).await
}

async fn analyze_file(config: AppConfig, path: PathBuf, camera: bool) -> Result<()> {
    let mime = glowcheck_media::detect_mime_type(&path);
    if !glowcheck_media::is_supported_upload(mime) {
        tracing::warn!(%mime, "unrecognized image type, attempting to decode anyway");
    }
    let bytes = std::fs::read(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    // Validate before spending any model calls.
    glowcheck_media::decode_image(&bytes)?;

    let source = if camera {
        ImageSource::Camera
    } else {
        ImageSource::Upload
    };
    let orchestrator = build_orchestrator(&config);

    let (tx, mut rx) = mpsc::channel(16);
    let handle = tokio::spawn(async move {
        orchestrator.run(ImageInput::new(bytes, source), tx).await
    });

    while let Some(event) = rx.recv().await {
        match event {
            PhaseEvent::ExtractionStarted { .. } => eprintln!("Extracting text from image…"),
            PhaseEvent::ExtractionCompleted { characters, .. } => {
                eprintln!("Extracted {characters} characters")
            }
            PhaseEvent::PhaseStarted { phase, .. } => {
                eprintln!("Running {phase}…")
            }
            PhaseEvent::PhaseCompleted { phase, content, .. } => {
                println!("\n## {}\n\n{content}\n", phase.label());
            }
            PhaseEvent::AnalysisFailed { stage, message, .. } => {
                eprintln!("Analysis failed during {stage}: {message}");
            }
            PhaseEvent::AnalysisComplete { .. } => eprintln!("Done."),
        }
    }

    let session = handle.await?;
    if !matches!(session.status, glowcheck_core::SessionStatus::Complete) {
        std::process::exit(2);
    }
    Ok(())
}
