//! Activity Recognition Pipeline - Main Entry Point
//!
//! Walks the full flow: load recordings and labels, extract features, train
//! a baseline tree, filter features per class via one-vs-rest relevance
//! selection, retrain on the filtered table, and compare both reports.
//!
//! Usage: har-pipeline --data train/body_acc_x_train.txt --labels train/y_train.txt

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use feature_extract::{ExtractorConfig, FeatureExtractor};
use har_dataset::{reshape_long, DatasetLoader, LoaderConfig};
use relevance_filter::{
    DegeneratePolicy, OneVsRestSelection, SelectionConfig, SignificanceSelector,
};
use tree_classifier::{train_test_split, ClassificationReport, DecisionTree, TreeConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Activity recognition with relevance-filtered features")]
struct Args {
    /// Wide-format recording file (.txt whitespace or .csv)
    #[arg(long)]
    data: PathBuf,

    /// Activity label file, one code (1-6) per line
    #[arg(long)]
    labels: PathBuf,

    /// Channel name used for feature column prefixes
    #[arg(long, default_value = "body_acc_x")]
    channel: String,

    /// Cache directory for the parsed dataset (caching off when omitted)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Recording sample rate in Hz
    #[arg(long, default_value = "50.0")]
    sample_rate: f64,

    /// False discovery rate for per-class relevance tests
    #[arg(long, default_value = "0.05")]
    fdr: f64,

    /// Max tree depth
    #[arg(long, default_value = "10")]
    max_depth: usize,

    /// Test set ratio
    #[arg(long, default_value = "0.3")]
    test_ratio: f64,

    /// Random seed for splitting and training
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Skip classes with degenerate one-vs-rest targets instead of aborting
    #[arg(long)]
    skip_degenerate: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    println!("===========================================");
    println!("  Activity Recognition Pipeline v{}", env!("CARGO_PKG_VERSION"));
    println!("===========================================\n");

    // Load
    let loader = DatasetLoader::new(LoaderConfig {
        cache_dir: args.cache_dir.clone(),
    });
    let set = loader
        .load_set(&args.data, &args.labels, &args.channel)
        .context("loading recording set")?;
    println!(
        "Loaded {} samples x {} timesteps from {}",
        set.recording.n_samples(),
        set.recording.n_timesteps,
        args.data.display()
    );

    // Extract
    let records = reshape_long(&set.recording);
    let mut extractor = FeatureExtractor::new(ExtractorConfig {
        sample_rate_hz: args.sample_rate,
        ..Default::default()
    });
    let table = extractor
        .extract(&records, &args.channel)
        .context("extracting features")?;
    println!(
        "Extracted {} features for {} samples\n",
        table.n_columns(),
        table.n_rows()
    );

    // Split
    let split = train_test_split(&table, &set.labels, args.test_ratio, args.seed)
        .context("splitting dataset")?;
    println!("Train set: {} samples", split.train_table.n_rows());
    println!("Test set:  {} samples\n", split.test_table.n_rows());

    let tree_config = TreeConfig {
        max_depth: args.max_depth,
        seed: args.seed,
        ..Default::default()
    };

    // Baseline on all features
    info!("training baseline tree on all features");
    let mut baseline = DecisionTree::new(tree_config.clone());
    baseline
        .fit(&split.train_table, &split.train_labels)
        .context("training baseline tree")?;
    let baseline_pred = baseline.predict(&split.test_table)?;
    let baseline_report =
        ClassificationReport::compute(split.test_labels.labels(), &baseline_pred);

    println!("=== Baseline: all {} features ===\n", table.n_columns());
    println!("{}\n", baseline_report);

    // One-vs-rest relevance selection on the training split
    info!(fdr = args.fdr, "selecting relevant features per class");
    let selection = OneVsRestSelection::with_config(
        SignificanceSelector::with_fdr(args.fdr),
        SelectionConfig {
            degenerate_policy: if args.skip_degenerate {
                DegeneratePolicy::Skip
            } else {
                DegeneratePolicy::Abort
            },
        },
    );
    let outcome = selection
        .select(&split.train_table, &split.train_labels)
        .context("selecting relevant features")?;

    println!("=== Per-class relevance selection ===\n");
    for class in &outcome.per_class {
        if class.skipped {
            println!("{:<22} skipped (degenerate target)", class.label);
        } else {
            println!(
                "{:<22} {:>3} of {} features",
                class.label,
                class.selected,
                table.n_columns()
            );
        }
    }
    println!(
        "\nRelevant feature union: {} of {} features{}\n",
        outcome.features.len(),
        table.n_columns(),
        if outcome.partial { " (partial)" } else { "" }
    );

    if outcome.features.is_empty() {
        bail!("no features survived relevance selection; try a higher --fdr");
    }

    // Retrain on the filtered table
    let train_filtered = split.train_table.select_columns(&outcome.features)?;
    let test_filtered = split.test_table.select_columns(&outcome.features)?;

    info!("retraining tree on filtered features");
    let mut filtered = DecisionTree::new(tree_config);
    filtered
        .fit(&train_filtered, &split.train_labels)
        .context("training filtered tree")?;
    let filtered_pred = filtered.predict(&test_filtered)?;
    let filtered_report =
        ClassificationReport::compute(split.test_labels.labels(), &filtered_pred);

    println!(
        "=== Filtered: {} selected features ===\n",
        outcome.features.len()
    );
    println!("{}\n", filtered_report);

    println!(
        "Accuracy: {:.4} (all features) -> {:.4} (selected features)",
        baseline_report.accuracy, filtered_report.accuracy
    );

    Ok(())
}
