use anyhow::{Result, bail};
use card_layout::{
    ImageCatalog, LayoutError, LayoutSummary, Placement, ProjectConfig, Skip,
    layout::page_count, load_manifest, plan_layout, summarize,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardsheets", about = "Lay out rendered cards on printable sheets", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a deck of rendered cards as front and back sheets
    Layout {
        /// Game directory containing cards.csv and a cards/ image folder
        game_dir: Option<PathBuf>,

        /// Project configuration (JSON); command-line options override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Card manifest CSV (columns: id, count, optional type)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Directory of rendered card images named by card id
        #[arg(short, long)]
        images: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Card width in mm
        #[arg(long)]
        card_width_mm: Option<f32>,

        /// Card height in mm
        #[arg(long)]
        card_height_mm: Option<f32>,

        /// Page margin in mm (uniform on all sides)
        #[arg(long)]
        margin_mm: Option<f32>,

        /// Order of front and back pages in the output
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        /// Draw backs at the mirrored column (long-edge duplex)
        #[arg(long)]
        mirror_backs: bool,

        /// Add crop marks around every card
        #[arg(long)]
        cut_marks: bool,

        /// Show the summary only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write a default project configuration file
    InitConfig {
        /// Where to write the configuration
        path: PathBuf,

        /// Game directory the configuration points at
        #[arg(long, default_value = ".")]
        game_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Sequential,
    Interleaved,
}

impl From<PaperArg> for card_layout::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for card_layout::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<OrderArg> for card_layout::PageOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Sequential => Self::Sequential,
            OrderArg::Interleaved => Self::Interleaved,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            game_dir,
            config,
            manifest,
            images,
            output,
            paper,
            orientation,
            card_width_mm,
            card_height_mm,
            margin_mm,
            order,
            mirror_backs,
            cut_marks,
            stats_only,
        } => {
            let mut config = match (config, game_dir) {
                (Some(path), _) => ProjectConfig::load(&path).await?,
                (None, Some(dir)) => ProjectConfig::for_game_dir(dir),
                (None, None) => ProjectConfig::for_game_dir("."),
            };

            if let Some(path) = manifest {
                config.manifest_path = path;
            }
            if let Some(dir) = images {
                config.image_dir = dir;
            }
            if let Some(path) = output {
                config.output_path = path;
            }
            let layout = &mut config.layout;
            if let Some(paper) = paper {
                layout.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                layout.orientation = orientation.into();
            }
            if let Some(width) = card_width_mm {
                layout.card_width_mm = width;
            }
            if let Some(height) = card_height_mm {
                layout.card_height_mm = height;
            }
            if let Some(margin) = margin_mm {
                layout.margin_mm = margin;
            }
            if let Some(order) = order {
                layout.page_order = order.into();
            }
            layout.mirror_backs |= mirror_backs;
            layout.cut_marks |= cut_marks;

            run_layout(&config, stats_only).await?;
        }

        Commands::InitConfig { path, game_dir } => {
            ProjectConfig::for_game_dir(&game_dir).save(&path).await?;
            println!("Wrote default configuration → {}", path.display());
        }
    }

    Ok(())
}

async fn run_layout(config: &ProjectConfig, stats_only: bool) -> Result<()> {
    config.validate()?;
    log::debug!(
        "Manifest {}, images {}",
        config.manifest_path.display(),
        config.image_dir.display()
    );

    let manifest = load_manifest(&config.manifest_path).await?;
    let catalog = ImageCatalog::scan(&config.image_dir).await?;

    let mut backs = catalog.back_images();
    backs.merge(&config.back_images);

    let mut plan = match plan_layout(&manifest.entries, &catalog, &backs, &config.layout) {
        Ok(plan) => plan,
        Err(LayoutError::MissingBackImage { face_type, fronts }) => {
            print!("{}", unfinished_layout_report(&fronts, &manifest.skips));
            bail!(
                "No back image for {} cards: add {} to {} or set it in the configuration",
                face_type,
                face_type.back_image_stem(),
                config.image_dir.display()
            );
        }
        Err(e) => return Err(e.into()),
    };
    plan.prepend_skips(manifest.skips);

    print_summary(&summarize(&plan));
    print_skips(&plan.skips);

    if stats_only {
        return Ok(());
    }

    card_pdf::write_pdf(&plan, &catalog, &config.layout, &config.output_path).await?;
    println!("Card sheets → {}", config.output_path.display());

    Ok(())
}

fn print_summary(summary: &LayoutSummary) {
    println!("Layout Summary:");
    println!("  Cards placed: {}", summary.instances_placed);
    for (face_type, count) in &summary.per_face_type {
        println!("    {} cards: {}", face_type, count);
    }
    println!("  Front pages: {}", summary.front_pages);
    println!("  Back pages: {}", summary.back_pages);
    if summary.skipped > 0 {
        println!("  Skipped: {}", summary.skipped);
    }
}

fn print_skips(skips: &[Skip]) {
    for skip in skips {
        println!("  - {}", skip);
    }
}

/// What was laid out, and what was dropped, before a run failed
fn unfinished_layout_report(fronts: &[Placement], skips: &[Skip]) -> String {
    let mut report = format!(
        "Front layout: {} cards on {} pages (not written)\n",
        fronts.len(),
        page_count(fronts)
    );
    if !skips.is_empty() {
        report.push_str(&format!("  Skipped: {}\n", skips.len()));
        for skip in skips {
            report.push_str(&format!("  - {}\n", skip));
        }
    }
    report
}
