use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statmap::models::{
    AppConfig, ConfigSource, Dimensions, ResolutionTier, Scene, TimeSeriesData,
};
use statmap::rendering::{DocumentBuilder, SvgRenderer};
use statmap::services::{ChoroplethStyler, Exporter, HttpVideoService};

#[derive(Parser)]
#[command(name = "statmap")]
#[command(about = "Statistical map snapshots and video export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the SVG snapshot of a scene
    Snapshot {
        /// Scene file (.json, .geojson, .yaml)
        #[arg(short, long)]
        scene: PathBuf,

        /// Time series used to color the regions
        #[arg(short, long)]
        timeseries: Option<PathBuf>,

        /// Year to color by (default: first year of the series)
        #[arg(short, long)]
        year: Option<i32>,

        /// Output SVG file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render a PNG preview of a scene snapshot
    Preview {
        #[arg(short, long)]
        scene: PathBuf,

        #[arg(short, long)]
        timeseries: Option<PathBuf>,

        #[arg(short, long)]
        year: Option<i32>,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Resolution tier: FULL_HD, 2K or 4K (default: scene viewport size)
        #[arg(short, long)]
        resolution: Option<String>,
    },
    /// Submit a scene and its time series to the video service
    Export {
        #[arg(short, long)]
        scene: PathBuf,

        #[arg(short, long)]
        timeseries: PathBuf,

        /// Year used for the initial coloring
        #[arg(short, long)]
        year: Option<i32>,

        /// Resolution tier: FULL_HD, 2K or 4K
        #[arg(short, long, default_value = "FULL_HD")]
        resolution: String,
    },
    /// Print the choropleth color of every region for a year
    Colors {
        #[arg(short, long)]
        timeseries: PathBuf,

        #[arg(short, long)]
        year: Option<i32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Snapshot {
            scene,
            timeseries,
            year,
            output,
        }) => {
            init_logging();
            run_snapshot_command(&scene, timeseries.as_deref(), year, &output)
        }
        Some(Commands::Preview {
            scene,
            timeseries,
            year,
            output,
            resolution,
        }) => {
            init_logging();
            run_preview_command(&scene, timeseries.as_deref(), year, &output, resolution).await
        }
        Some(Commands::Export {
            scene,
            timeseries,
            year,
            resolution,
        }) => {
            init_logging();
            run_export_command(&scene, &timeseries, year, &resolution).await
        }
        Some(Commands::Colors { timeseries, year }) => {
            init_logging();
            run_colors_command(&timeseries, year)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot CLI commands
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statmap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load a scene and, when a time series is given, color it for `year`.
fn load_styled_scene(
    config: &AppConfig,
    scene_path: &Path,
    timeseries: Option<&Path>,
    year: Option<i32>,
) -> anyhow::Result<(Scene, Option<TimeSeriesData>)> {
    let mut scene = Scene::load(scene_path)
        .with_context(|| format!("Failed to load scene {}", scene_path.display()))?;

    let Some(path) = timeseries else {
        return Ok((scene, None));
    };

    let data = TimeSeriesData::load(path)?;
    let year = year.unwrap_or(data.meta.min_year);
    if !data.contains_year(year) {
        tracing::warn!(
            year,
            min = data.meta.min_year,
            max = data.meta.max_year,
            "Year outside the time series range"
        );
    }

    let styler = ChoroplethStyler::from_config(&config.choropleth)?;
    let summary = styler.apply(scene.layers_mut(), &data, year)?;
    tracing::info!(
        year,
        styled = summary.styled,
        unstyled = summary.unstyled,
        "Colored regions"
    );

    Ok((scene, Some(data)))
}

fn run_snapshot_command(
    scene_path: &Path,
    timeseries: Option<&Path>,
    year: Option<i32>,
    output: &Path,
) -> anyhow::Result<()> {
    let (config, _) = AppConfig::from_env();
    let (scene, _) = load_styled_scene(&config, scene_path, timeseries, year)?;

    let snapshot = DocumentBuilder::build(&scene, scene.viewport)?;
    let svg = snapshot.document.to_svg();

    std::fs::write(output, &svg)?;
    println!(
        "Wrote {} ({} paths, {} skipped points)",
        output.display(),
        snapshot.document.elements.len(),
        snapshot.gaps.len()
    );
    Ok(())
}

async fn run_preview_command(
    scene_path: &Path,
    timeseries: Option<&Path>,
    year: Option<i32>,
    output: &Path,
    resolution: Option<String>,
) -> anyhow::Result<()> {
    let (config, _) = AppConfig::from_env();
    let (scene, _) = load_styled_scene(&config, scene_path, timeseries, year)?;

    let target = match resolution {
        Some(name) => config.resolutions.resolve_name(&name)?,
        None => Dimensions::new(scene.viewport.width, scene.viewport.height),
    };

    let snapshot = DocumentBuilder::build(&scene, scene.viewport)?;
    let png_bytes = SvgRenderer::new()
        .render_in_background(snapshot.document.to_svg(), target)
        .await
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    std::fs::write(output, &png_bytes)?;
    println!(
        "Rendered {} at {} ({} bytes)",
        output.display(),
        target,
        png_bytes.len()
    );
    Ok(())
}

async fn run_export_command(
    scene_path: &Path,
    timeseries: &Path,
    year: Option<i32>,
    resolution: &str,
) -> anyhow::Result<()> {
    let (config, _) = AppConfig::from_env();
    let tier: ResolutionTier = resolution.parse()?;
    let (scene, data) = load_styled_scene(&config, scene_path, Some(timeseries), year)?;
    let data = data.context("Time series missing")?;

    let service = HttpVideoService::from_config(&config.service)?;
    let exporter = Exporter::new(Arc::new(service), config.resolutions);

    let response = exporter
        .export_video(&scene, scene.viewport, &data, tier)
        .await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_colors_command(timeseries: &Path, year: Option<i32>) -> anyhow::Result<()> {
    let (config, _) = AppConfig::from_env();
    let data = TimeSeriesData::load(timeseries)?;
    let year = year.unwrap_or(data.meta.min_year);

    let styler = ChoroplethStyler::from_config(&config.choropleth)?;
    let colors = styler.region_colors(&data, year)?;

    println!("{} ({year})", data.meta.name);
    for (region, (value, color)) in &colors {
        println!("  {region:<12} {value:>14} {color}");
    }
    if colors.is_empty() {
        println!("  (no values for {year})");
    }
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let (config, source) = AppConfig::from_env();

    println!("statmap v{VERSION}");
    println!("Statistical map snapshots and video export\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE         = {}",
        std::env::var("CONFIG_FILE").as_deref().unwrap_or("(not set)")
    );
    println!(
        "  STATMAP_SERVICE_URL = {}",
        std::env::var("STATMAP_SERVICE_URL")
            .as_deref()
            .unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    match source {
        ConfigSource::File(path) => println!("  Source:   {}", path.display()),
        ConfigSource::Defaults => println!("  Source:   built-in defaults"),
    }
    println!("  Service:  {}", config.service.base_url);
    println!("  Timeout:  {}s", config.service.timeout_secs);
    println!(
        "  Contract: {:?} (version {})",
        config.service.contract,
        config.service.contract.version()
    );
    println!(
        "  Ramp:     {} ({})",
        config.choropleth.ramp.join(" "),
        config.choropleth.interpolation
    );

    println!("\nResolutions:");
    for tier in ResolutionTier::ALL {
        println!("  {:<8} {}", tier.name(), config.resolutions.resolve(tier));
    }

    println!("\nCommands:");
    println!("  statmap snapshot  Write the SVG snapshot of a scene");
    println!("  statmap preview   Render a PNG preview");
    println!("  statmap export    Submit a video export");
    println!("  statmap colors    Print region colors for a year");
    println!("  statmap --help    Show all options");
}
