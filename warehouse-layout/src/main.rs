/// Warehouse layout command line: generate manifests, plan trajectories, try suggestions.
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use warehouse_layout::manifest::{ManifestGenerator, SceneManifest};
use warehouse_layout::suggestion::{CannedSuggestionService, request_suggestion};
use warehouse_layout::trajectory::{sample_times, sample_trajectory_with};
use warehouse_layout::warehouse::generate_with_rng;
use warehouse_layout::{LayoutCompiler, MotionPlanner, WarehouseConfig};

#[derive(Parser)]
#[command(name = "warehouse-layout", about = "Procedural warehouse layout and pallet motion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a warehouse and write its compiled scene manifest.
    Generate {
        #[command(flatten)]
        warehouse: WarehouseArgs,
        #[arg(short, long, default_value = "manifest.json")]
        output: PathBuf,
    },
    /// Plan one pallet animation and write its sampled trajectory.
    Plan {
        #[command(flatten)]
        warehouse: WarehouseArgs,
        #[arg(long, default_value_t = 30)]
        fps: u32,
        #[arg(short, long, default_value = "trajectory.json")]
        output: PathBuf,
    },
    /// Ask the offline suggestion service for scene ideas.
    Suggest {
        #[arg(short, long)]
        prompt: String,
    },
}

#[derive(Args)]
struct WarehouseArgs {
    #[arg(long)]
    racks: Option<usize>,
    #[arg(long)]
    columns: Option<usize>,
    #[arg(long)]
    layers: Option<usize>,
    #[arg(long)]
    bins: Option<usize>,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file overriding dimensions and layout constants.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl WarehouseArgs {
    /// Config file first, then flags on top.
    fn resolve(&self) -> Result<(WarehouseConfig, StdRng)> {
        let mut config = match &self.config {
            Some(path) => WarehouseConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WarehouseConfig::default(),
        };

        let dimensions = &mut config.dimensions;
        dimensions.racks = self.racks.unwrap_or(dimensions.racks);
        dimensions.columns = self.columns.unwrap_or(dimensions.columns);
        dimensions.layers = self.layers.unwrap_or(dimensions.layers);
        dimensions.bins = self.bins.unwrap_or(dimensions.bins);
        config.dimensions.validate()?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok((config, rng))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Generate { warehouse, output } => generate(&warehouse, output),
        Command::Plan {
            warehouse,
            fps,
            output,
        } => plan(&warehouse, fps, output),
        Command::Suggest { prompt } => suggest(&prompt),
    }
}

fn generate(args: &WarehouseArgs, output: PathBuf) -> Result<()> {
    let (config, mut rng) = args.resolve()?;
    let warehouse = generate_with_rng(&config.dimensions, &mut rng);
    let objects = LayoutCompiler::new(config.layout.clone()).compile(&warehouse);

    let manifest = SceneManifest::new(config.dimensions, config.layout, warehouse, objects);
    ManifestGenerator::new(&output)
        .write(&manifest)
        .with_context(|| format!("writing manifest {}", output.display()))?;
    Ok(())
}

fn plan(args: &WarehouseArgs, fps: u32, output: PathBuf) -> Result<()> {
    let (config, mut rng) = args.resolve()?;
    let warehouse = generate_with_rng(&config.dimensions, &mut rng);
    let objects = LayoutCompiler::new(config.layout).compile(&warehouse);

    let mut planner = MotionPlanner::new(rng);
    let Some(state) = planner.plan(&warehouse, &objects, &HashSet::new()) else {
        bail!("no pallet can be animated: the warehouse has no full bins");
    };
    tracing::info!(
        pallet = %state.pallet_id,
        duration_ms = state.total_duration_ms,
        "planned animation"
    );

    let pb = ProgressBar::new(sample_times(state.total_duration_ms, fps).len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} samples ({percent}%) {msg}")?
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message("Sampling trajectory");

    let trajectory = sample_trajectory_with(&state, fps, |_| pb.inc(1));
    pb.finish_with_message("Trajectory sampled");

    let json = serde_json::to_string_pretty(&trajectory)?;
    fs::write(&output, json).with_context(|| format!("writing trajectory {}", output.display()))?;
    tracing::info!(path = %output.display(), samples = trajectory.samples.len(), "wrote trajectory");
    Ok(())
}

fn suggest(prompt: &str) -> Result<()> {
    let suggestion = request_suggestion(&CannedSuggestionService, prompt)?;
    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}
