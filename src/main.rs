mod config;
mod script;
mod services;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use canvas::doc::LoadError;
use canvas::engine::EngineCore;
use canvas::session::{InitError, SurfaceConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use config::{ConfigError, EditorConfig};
use script::{ScriptError, ScriptRunner, read_script};
use services::export::{ExportError, export};
use services::project::{ProjectFileError, load_project, read_project, save_project, write_project};
use state::EditorContext;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("canvas init failed: {0}")]
    Init(#[from] InitError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    ProjectFile(#[from] ProjectFileError),
    #[error("project load failed: {0}")]
    Load(#[from] LoadError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("http client init failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "designer", about = "Headless design editor")]
struct Cli {
    #[command(flatten)]
    config: EditorConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a JSON command script to a new or saved design.
    Run {
        script: PathBuf,
        /// Start from this project file instead of a blank surface.
        #[arg(long)]
        project: Option<PathBuf>,
        /// Write the project here when the script finishes.
        #[arg(long)]
        save_to: Option<PathBuf>,
    },
    /// Render a saved surface document.
    Export {
        document: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum OutputFormat {
    Json,
    Png,
}

impl From<OutputFormat> for canvas::input::ExportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => Self::Json,
            OutputFormat::Png => Self::Png,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring malformed .env: {e}");
        }
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "designer failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    cli.config.validate()?;
    let mut engine = EngineCore::new();
    let mut ctx = EditorContext::new();

    match cli.command {
        Command::Run { script, project, save_to } => {
            let commands = read_script(&script).await?;
            match project {
                Some(path) => {
                    let project = read_project(&path).await?;
                    engine.initialize(
                        &SurfaceConfig::new(project.width, project.height).with_background(project.background.clone()),
                    )?;
                    if project.canvas_state.is_some() {
                        load_project(&mut engine, &project)?;
                    }
                    ctx.set_project(Some(project));
                }
                None => engine.initialize(&cli.config.surface())?,
            }

            let client = reqwest::Client::builder().build()?;
            let report = ScriptRunner::new(&mut engine, &mut ctx, &cli.config, client).run(commands).await?;
            tracing::info!(steps = report.steps, saves = report.saves, exports = report.exports.len(), "script applied");

            if let Some(path) = save_to {
                let project = save_project(&mut ctx, &engine)?.clone();
                write_project(&path, &project).await?;
            }
        }
        Command::Export { document, format } => {
            let raw = tokio::fs::read_to_string(&document).await?;
            engine.initialize(&cli.config.surface())?;
            engine.load_document_json(&raw)?;
            let path = export(&engine, format.into(), &cli.config.out_dir, cli.config.export_scale).await?;
            tracing::info!(path = %path.display(), "export written");
        }
    }

    engine.teardown();
    Ok(())
}
