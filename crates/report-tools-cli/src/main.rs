mod logger;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use report_async_runtime::{ReportCommand, ReportUpdate, handle_command};
use report_compose::canvas::{Canvas, RecordingCanvas};
use report_compose::collab::{BuiltinTemplates, FsImageResolver, LogProgress, MarkerMapProvider};
use report_compose::{Collaborators, PaperSize, ReportOptions, ReportSpec};

use logger::CliLogger;

#[derive(Parser)]
#[command(name = "rept", about = "Project report composer", version)]
struct Cli {
    /// Log every composed page
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the report PDF
    Build {
        /// Report description (JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Layout options (JSON)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Directory image references are resolved against
        #[arg(long, default_value = ".")]
        assets: PathBuf,

        /// Output paper size, overriding the options file
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,
    },

    /// Print the page outline without writing a PDF
    Outline {
        /// Report description (JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Layout options (JSON)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Directory image references are resolved against
        #[arg(long, default_value = ".")]
        assets: PathBuf,
    },

    /// Show how a block of markup is split into pages
    Paginate {
        /// Markup file
        #[arg(short, long)]
        input: PathBuf,

        /// Layout options (JSON) providing the pagination budgets
        #[arg(long)]
        options: Option<PathBuf>,
    },

    /// Export the marker map of all selected projects as PNG
    Map {
        /// Report description (JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Layout options (JSON)
        #[arg(long)]
        options: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

async fn load_options(path: Option<&Path>) -> Result<ReportOptions> {
    match path {
        Some(path) => ReportOptions::load(path)
            .await
            .with_context(|| format!("failed to load options from {}", path.display())),
        None => Ok(ReportOptions::default()),
    }
}

async fn load_spec(path: &Path) -> Result<ReportSpec> {
    ReportSpec::load(path)
        .await
        .with_context(|| format!("failed to load report from {}", path.display()))
}

/// Run `command` on the worker and print its progress
async fn run_worker(command: ReportCommand) -> Result<ReportUpdate> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(handle_command(command, tx));

    let mut outcome = None;
    while let Some(update) = rx.recv().await {
        match update {
            ReportUpdate::Progress {
                operation,
                current,
                total,
            } => println!("[{}/{}] {}", current + 1, total, operation),
            other => outcome = Some(other),
        }
    }
    worker.await?;

    match outcome {
        Some(ReportUpdate::Error { message }) => Err(anyhow!(message)),
        Some(update) => Ok(update),
        None => Err(anyhow!("worker stopped without reporting a result")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Build {
            spec,
            output,
            options,
            assets,
            paper,
        } => {
            let spec = load_spec(&spec).await?;
            let mut options = load_options(options.as_deref()).await?;
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }

            let update = run_worker(ReportCommand::Build {
                spec: Box::new(spec),
                options,
                assets,
                output_path: output.clone(),
            })
            .await
            .context("document generation failed")?;

            if let ReportUpdate::Complete { path, pages } = update {
                println!("Generated {} pages → {}", pages, path.display());
            }
        }

        Commands::Outline {
            spec,
            options,
            assets,
        } => {
            let spec = load_spec(&spec).await?;
            let options = load_options(options.as_deref()).await?;
            let (width, height) = options.page_size();

            let images = FsImageResolver::new(assets);
            let collab = Collaborators {
                renderer: &BuiltinTemplates,
                images: &images,
                maps: &MarkerMapProvider,
                progress: &LogProgress,
            };
            let mut canvas = RecordingCanvas::new(width, height);
            let pages = report_compose::compose_report(&spec, &options, collab, &mut canvas)
                .context("document generation failed")?;

            print!("{}", String::from_utf8_lossy(&canvas.finish()?));
            println!("{} pages", pages.len());
        }

        Commands::Paginate { input, options } => {
            let markup = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;
            let options = load_options(options.as_deref()).await?;

            let chunks = report_compose::paginate_with(&markup, &options.pagination);
            println!("{} chunk(s)", chunks.len());
            for (index, chunk) in chunks.iter().enumerate() {
                println!(
                    "  #{}: {} chars",
                    index + 1,
                    report_compose::markup::plain_len(&chunk.markup)
                );
            }
        }

        Commands::Map {
            spec,
            output,
            options,
        } => {
            let spec = load_spec(&spec).await?;
            let options = load_options(options.as_deref()).await?;

            run_worker(ReportCommand::ExportMap {
                spec: Box::new(spec),
                options,
                output_path: output.clone(),
            })
            .await
            .context("map export failed")?;
            println!("Map → {}", output.display());
        }
    }

    Ok(())
}
