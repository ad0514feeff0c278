//! newton-gbt training CLI
//!
//! Trains a boosted ensemble on a delimited text file and reports the final
//! training loss, the misclassification count for logistic runs and the
//! elapsed time.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use newton_gbt::metrics::{misclassification_count, DEFAULT_DECISION_THRESHOLD};
use newton_gbt::{
    Config, CsvLoader, GainFormula, LossType, ShrinkageMode, ThresholdMode, GBDT,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "newton-gbt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Exact-greedy Newton gradient boosted trees", long_about = None)]
struct Args {
    /// Training data file, one row per line
    #[arg(short, long)]
    input: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = '\t')]
    delimiter: char,

    /// Zero-based index of the label column
    #[arg(long, default_value_t = 0)]
    label_column: usize,

    /// First line of the file holds column names
    #[arg(long)]
    has_header: bool,

    /// Configuration file (.json or .toml); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of boosting rounds
    #[arg(long)]
    num_rounds: Option<usize>,

    /// Maximum splitting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Nominal shrinkage rate
    #[arg(long)]
    shrinkage_rate: Option<f64>,

    /// Minimum split gain
    #[arg(long)]
    min_split_gain: Option<f64>,

    /// Minimum rows for a node to be split
    #[arg(long)]
    min_node_size: Option<usize>,

    /// L2 leaf regularization
    #[arg(long)]
    lambda: Option<f64>,

    /// Loss function: squared or logistic
    #[arg(long)]
    loss: Option<LossType>,

    /// Node score: multiplicative or standard
    #[arg(long)]
    gain_formula: Option<GainFormula>,

    /// Threshold recording: scan_row or sorted_boundary
    #[arg(long)]
    threshold_mode: Option<ThresholdMode>,

    /// Shrinkage handling: recorded or applied
    #[arg(long)]
    shrinkage_mode: Option<ShrinkageMode>,

    /// Print every tree after training
    #[arg(long)]
    print_trees: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Defaults, then the config file, then the environment, then flags.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };
        config
            .apply_environment_overrides()
            .context("Invalid NEWTON_GBT_* environment variable")?;

        if let Some(v) = self.num_rounds {
            config.num_rounds = v;
        }
        if let Some(v) = self.max_depth {
            config.max_depth = v;
        }
        if let Some(v) = self.shrinkage_rate {
            config.shrinkage_rate = v;
        }
        if let Some(v) = self.min_split_gain {
            config.min_split_gain = v;
        }
        if let Some(v) = self.min_node_size {
            config.min_node_size = v;
        }
        if let Some(v) = self.lambda {
            config.lambda = v;
        }
        if let Some(v) = self.loss {
            config.loss = v;
        }
        if let Some(v) = self.gain_formula {
            config.gain_formula = v;
        }
        if let Some(v) = self.threshold_mode {
            config.threshold_mode = v;
        }
        if let Some(v) = self.shrinkage_mode {
            config.shrinkage_mode = v;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    info!("newton-gbt v{}", env!("CARGO_PKG_VERSION"));

    let config = args.resolve_config()?;
    let dataset = CsvLoader::new()
        .with_delimiter(args.delimiter)
        .with_label_column(args.label_column)
        .with_header(args.has_header)
        .load(&args.input)
        .with_context(|| format!("Failed to load dataset from {}", args.input.display()))?;

    let loss = config.loss;
    let mut model = GBDT::new(config).context("Invalid training configuration")?;

    let start = Instant::now();
    let final_loss = model
        .train(&dataset)
        .context("Training failed")?
        .final_loss()
        .unwrap_or(f64::NAN);

    if loss == LossType::Logistic {
        let probabilities = model.predict_transformed(&dataset.features())?;
        let wrong = misclassification_count(
            &probabilities.view(),
            &dataset.labels(),
            DEFAULT_DECISION_THRESHOLD,
        )?;
        println!("misclassified: {} of {}", wrong, dataset.num_data());
    }
    let elapsed = start.elapsed();

    println!("final training loss: {:.6}", final_loss);
    println!("training cost {} ms", elapsed.as_millis());

    if args.print_trees {
        for (round, tree) in model.ensemble().trees().iter().enumerate() {
            println!("tree {} {}", round, tree);
            print!("{}", tree.to_string_representation());
        }
    }

    Ok(())
}
