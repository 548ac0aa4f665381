use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pdf_spread::{PairingTable, SpreadConfig, SpreadOptions, SpreadStatistics};
use pdf_spread_server::ServerConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfspread", about = "Two-up spread imposition for PDFs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impose a PDF into wrapped two-up spreads
    Impose {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Show how a pairing table uses a document's pages
    Stats {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Options JSON file (geometry and pairing table)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Pairing table JSON file, e.g. [[2,"blank"],["blank",1]]
        #[arg(long)]
        pairings: Option<PathBuf>,
    },

    /// Run the HTTP upload service
    Serve {
        /// Bind address (overrides SPREAD_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides SPREAD_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Options JSON file (overrides SPREAD_OPTIONS)
        #[arg(long)]
        options: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Options JSON file (geometry and pairing table)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Pairing table JSON file, e.g. [[2,"blank"],["blank",1]]
    #[arg(long)]
    pairings: Option<PathBuf>,

    /// Starting layout, before the flags below are applied
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Bleed in mm
    #[arg(long)]
    bleed_mm: Option<f32>,

    /// Width and height of each placed page in points
    #[arg(long)]
    image_size: Option<f32>,

    /// Padding added around every sheet in points
    #[arg(long)]
    wrap_padding: Option<f32>,

    /// Add a tick at the gutter between the two pages
    #[arg(long)]
    center_mark: bool,

    /// Omit the corner cut marks
    #[arg(long)]
    no_cut_marks: bool,

    /// Stroke a border around each sheet
    #[arg(long)]
    border: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Default,
    LegacyOffset,
    Bordered,
}

impl From<PresetArg> for SpreadConfig {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => Self::default(),
            PresetArg::LegacyOffset => Self::legacy_offset(),
            PresetArg::Bordered => Self::bordered(),
        }
    }
}

async fn load_options(options: Option<&Path>, pairings: Option<&Path>) -> Result<SpreadOptions> {
    let mut loaded = match options {
        Some(path) => SpreadOptions::load(path)
            .await
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SpreadOptions::default(),
    };

    if let Some(path) = pairings {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        loaded.pairings = serde_json::from_str::<PairingTable>(&json)
            .with_context(|| format!("parsing pairing table {}", path.display()))?;
    }

    Ok(loaded)
}

impl LayoutArgs {
    async fn resolve(&self) -> Result<SpreadOptions> {
        let mut options = load_options(self.options.as_deref(), self.pairings.as_deref()).await?;
        let config = &mut options.config;

        if let Some(preset) = self.preset {
            *config = preset.into();
        }
        if let Some(bleed_mm) = self.bleed_mm {
            config.bleed_mm = bleed_mm;
        }
        if let Some(image_size) = self.image_size {
            config.image_size_pt = image_size;
        }
        if let Some(wrap_padding) = self.wrap_padding {
            config.wrap_padding_pt = wrap_padding;
        }
        if self.center_mark {
            config.marks.center_mark = true;
        }
        if self.no_cut_marks {
            config.marks.cut_marks = false;
        }
        if self.border {
            config.marks.border = true;
        }

        options.validate()?;
        Ok(options)
    }
}

fn print_statistics(stats: &SpreadStatistics) {
    println!("Spread Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Spread sheets: {}", stats.sheets);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Placed slots: {}", stats.placed_slots);
    println!("  Blank slots: {}", stats.blank_slots);
    println!("  Unique pages used: {}", stats.unique_pages_used);
    if !stats.reused_pages.is_empty() {
        println!("  Reused pages: {:?}", stats.reused_pages);
    }
    if !stats.unused_pages.is_empty() {
        println!("  Unused pages: {:?}", stats.unused_pages);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pdf_spread_server::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Impose {
            input,
            output,
            layout,
            stats_only,
        } => {
            let options = layout.resolve().await?;
            let document = pdf_spread::load_pdf(&input).await?;

            let stats =
                pdf_spread::calculate_statistics(&options.pairings, document.get_pages().len())?;
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }

            let imposed =
                pdf_spread::impose_spreads(document, options.pairings, options.config).await?;
            pdf_spread::save_pdf(imposed, &output).await?;
            println!("Imposed → {}", output.display());
        }

        Commands::Stats {
            input,
            options,
            pairings,
        } => {
            let options = load_options(options.as_deref(), pairings.as_deref()).await?;
            let document = pdf_spread::load_pdf(&input).await?;
            let stats =
                pdf_spread::calculate_statistics(&options.pairings, document.get_pages().len())?;
            print_statistics(&stats);
        }

        Commands::Serve {
            host,
            port,
            options,
        } => {
            let mut config = ServerConfig::from_env().await?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(path) = options {
                config.options = load_options(Some(path.as_path()), None).await?;
            }
            tracing::debug!("Server configuration: {:?}", config);
            pdf_spread_server::serve(config).await?;
        }
    }

    Ok(())
}
