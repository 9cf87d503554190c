//! Fixture generation binary.

use anyhow::{bail, Context};
use bst_fixtures::{FixtureConfig, FixtureRunner, Presets};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gen-fixtures")]
#[command(about = "Generate labeled level-order fixtures for a BST validity checker")]
struct Args {
    /// JSON config file (fields not given keep their preset or default values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from a named preset (standard, tiny, edge_cases, stress)
    #[arg(long)]
    preset: Option<String>,

    /// Root directory for the test<N> directories
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of the first fixture directory
    #[arg(long)]
    start_index: Option<u32>,

    /// Number of fixtures labeled true
    #[arg(long)]
    valid: Option<u32>,

    /// Number of fixtures labeled false
    #[arg(long)]
    invalid: Option<u32>,

    /// Minimum employee count for ordinary fixtures
    #[arg(long)]
    min: Option<usize>,

    /// Maximum employee count for ordinary fixtures
    #[arg(long)]
    max: Option<usize>,

    /// Minimum employee count for the last fixture of each kind
    #[arg(long)]
    special_min: Option<usize>,

    /// Maximum employee count for the last fixture of each kind
    #[arg(long)]
    special_max: Option<usize>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fail when a fixture's label disagrees with its tree
    #[arg(long)]
    strict: bool,

    /// Write a JSON run manifest to this path
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Print one line per fixture
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let mut runner = FixtureRunner::new(config).context("invalid configuration")?;
    let result = runner.run().with_context(|| {
        format!(
            "fixture generation failed under '{}'",
            runner.config().output_dir.display()
        )
    })?;

    if args.verbose {
        for fixture in &result.fixtures {
            println!(
                "test{}: {} | records={} depth={} lines={}",
                fixture.index,
                fixture.kind.name(),
                fixture.record_count,
                fixture.depth,
                fixture.line_count
            );
        }
    }

    for failure in &result.validation_failures {
        eprintln!(
            "warning: test{} is labeled {} but its {}-node tree is {}",
            failure.index,
            failure.expected,
            failure.node_count,
            if failure.actual { "a valid BST" } else { "not a valid BST" }
        );
    }

    let config = runner.config();
    println!(
        "Generated {} valid and {} invalid tests starting at {} in '{}'",
        config.valid_count,
        config.invalid_count,
        config.start_index,
        config.output_dir.display()
    );
    if let Some(path) = &config.manifest_path {
        println!("Manifest: {}", path.display());
    }

    Ok(())
}

/// Defaults, then preset, then config file, then command-line flags.
fn resolve_config(args: &Args) -> anyhow::Result<FixtureConfig> {
    let mut config = match &args.preset {
        Some(name) => match Presets::by_name(name) {
            Some(config) => config,
            None => {
                let names: Vec<_> = Presets::all().into_iter().map(|(n, _)| n).collect();
                bail!("unknown preset {name:?}; available: {}", names.join(", "));
            }
        },
        None => FixtureConfig::default(),
    };

    if let Some(path) = &args.config {
        config = config
            .overlay_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
    }

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(index) = args.start_index {
        config.start_index = index;
    }
    if let Some(valid) = args.valid {
        config.valid_count = valid;
    }
    if let Some(invalid) = args.invalid {
        config.invalid_count = invalid;
    }
    config.employee_range = override_range(&config.employee_range, args.min, args.max);
    config.special_range = override_range(&config.special_range, args.special_min, args.special_max);
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.strict {
        config.strict = true;
    }
    if let Some(path) = &args.manifest {
        config.manifest_path = Some(path.clone());
    }

    Ok(config)
}

fn override_range(
    range: &std::ops::RangeInclusive<usize>,
    min: Option<usize>,
    max: Option<usize>,
) -> std::ops::RangeInclusive<usize> {
    min.unwrap_or(*range.start())..=max.unwrap_or(*range.end())
}
