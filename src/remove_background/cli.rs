//
// cli.rs
// Toolsuite-rs
//
// remove-background tool entry: typed options, argument validation, and the run writing denoised outputs.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::ambient::{self, EstimateOptions, FprSummary, RemovalMetrics};
use super::argparser::NAME;
use super::matrix::CountMatrix;
use crate::args::ParsedArgs;
use crate::contract::{ToolCli, ValidationError};

const OUTPUT_EXTENSION: &str = "csv";

/// Typed view of the `remove-background` fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub input: PathBuf,
    pub output: PathBuf,
    pub expected_cells: Option<u32>,
    pub total_droplets_included: Option<u32>,
    pub low_count_threshold: u32,
    pub fpr: Vec<f64>,
    pub exclude_features: Vec<String>,
    pub debug: bool,
}

impl TryFrom<&ParsedArgs> for Options {
    type Error = ValidationError;

    fn try_from(args: &ParsedArgs) -> Result<Self, Self::Error> {
        let path = |id: &str| {
            args.value(id)
                .map(PathBuf::from)
                .ok_or_else(|| ValidationError::new(format!("--{} is required", id)))
        };

        Ok(Self {
            input: path("input")?,
            output: path("output")?,
            expected_cells: args.parse_value("expected_cells")?,
            total_droplets_included: args.parse_value("total_droplets_included")?,
            low_count_threshold: args.parse_value("low_count_threshold")?.unwrap_or(5),
            fpr: args.parse_values("fpr")?,
            exclude_features: args.values("exclude_features").to_vec(),
            debug: args.flag("debug"),
        })
    }
}

impl Options {
    fn output_stem(&self) -> String {
        self.output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string())
    }

    /// Sibling of the output file: `<stem><suffix>`.
    pub fn companion(&self, suffix: &str) -> PathBuf {
        self.output.with_file_name(format!("{}{}", self.output_stem(), suffix))
    }

    /// Output path for the `index`-th requested false positive rate.
    pub fn output_for(&self, index: usize, fpr: f64) -> PathBuf {
        if index == 0 {
            self.output.clone()
        } else {
            self.companion(&format!("_FPR_{}.{}", fpr, OUTPUT_EXTENSION))
        }
    }
}

/// `remove-background` entry point for the dispatcher.
pub struct Cli;

pub fn factory() -> Box<dyn ToolCli> {
    Box::new(Cli)
}

impl ToolCli for Cli {
    fn get_name(&self) -> &str {
        NAME
    }

    fn validate_args(&self, mut args: ParsedArgs) -> Result<ParsedArgs, ValidationError> {
        let options = Options::try_from(&args)?;

        if !options.input.is_file() {
            return Err(ValidationError::new(format!(
                "Input file {:?} does not exist",
                options.input
            )));
        }

        if options.fpr.is_empty() {
            return Err(ValidationError::new("At least one --fpr value is required"));
        }
        for &fpr in &options.fpr {
            if !(0.0..1.0).contains(&fpr) {
                return Err(ValidationError::new(format!(
                    "--fpr must be in [0, 1), got {}",
                    fpr
                )));
            }
        }
        // Each value names its own output file, so repeats would overwrite each other.
        for (index, fpr) in options.fpr.iter().enumerate() {
            if options.fpr[..index].contains(fpr) {
                return Err(ValidationError::new(format!(
                    "--fpr value {} was given more than once",
                    fpr
                )));
            }
        }

        if let (Some(cells), Some(total)) = (options.expected_cells, options.total_droplets_included)
        {
            if total <= cells {
                return Err(ValidationError::new(format!(
                    "--total-droplets-included ({}) must exceed --expected-cells ({})",
                    total, cells
                )));
            }
        }

        if options.low_count_threshold == 0 {
            return Err(ValidationError::new("--low-count-threshold must be at least 1"));
        }

        if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(ValidationError::new(format!(
                    "Output directory {:?} does not exist",
                    parent
                )));
            }
        }

        let extension_ok = options
            .output
            .extension()
            .map_or(false, |ext| ext == OUTPUT_EXTENSION);
        if !extension_ok {
            let normalized = options.output.with_extension(OUTPUT_EXTENSION);
            tracing::warn!(
                requested = %options.output.display(),
                output = %normalized.display(),
                "output renamed to a .csv file"
            );
            args.set_value("output", normalized.to_string_lossy());
        }

        Ok(args)
    }

    fn run(&self, args: &ParsedArgs) -> Result<()> {
        let options = Options::try_from(args)?;
        let metrics = remove_background(&options)?;

        println!(
            "Background removed for {:?} | cells: {} | empty droplets: {}",
            options.input, metrics.cells, metrics.empty_droplets
        );
        for run in &metrics.runs {
            println!(
                "  FPR {}: removed {:.0} counts ({:.2}%) -> {}",
                run.fpr,
                run.counts_removed,
                run.fraction_removed * 100.0,
                run.output
            );
        }
        Ok(())
    }
}

/// Estimate and subtract ambient counts, writing every output file.
pub fn remove_background(options: &Options) -> Result<RemovalMetrics> {
    let matrix = CountMatrix::read_csv(&options.input)?;
    tracing::info!(
        droplets = matrix.n_droplets(),
        features = matrix.features.len(),
        "loaded count matrix"
    );

    let excluded = feature_indices(&matrix, &options.exclude_features)?;
    let estimate_options = EstimateOptions {
        expected_cells: options.expected_cells.map(|n| n as usize),
        total_droplets_included: options.total_droplets_included.map(|n| n as usize),
        low_count_threshold: f64::from(options.low_count_threshold),
        excluded,
    };
    let estimate = ambient::estimate(&matrix, &estimate_options)?;
    if options.debug {
        tracing::info!(ambient = ?estimate.ambient.to_vec(), "ambient profile");
    }

    let totals = matrix.totals();
    let cell_counts: f64 = estimate.cells.iter().map(|&d| totals[d]).sum();
    let mut runs = Vec::with_capacity(options.fpr.len());
    for (index, &fpr) in options.fpr.iter().enumerate() {
        let denoised = ambient::subtract(&matrix, &estimate, fpr);
        let output = options.output_for(index, fpr);
        matrix.write_csv(&output, &estimate.cells, denoised.view())?;

        let counts_removed = cell_counts - denoised.sum();
        runs.push(FprSummary {
            fpr,
            output: output.display().to_string(),
            counts_removed,
            fraction_removed: if cell_counts > 0.0 {
                counts_removed / cell_counts
            } else {
                0.0
            },
        });
    }

    write_barcodes(&options.companion("_cell_barcodes.csv"), &matrix, &estimate.cells)?;

    let metrics = RemovalMetrics {
        droplets: matrix.n_droplets(),
        features: matrix.features.len(),
        cells: estimate.cells.len(),
        empty_droplets: estimate.empties.len(),
        cell_counts,
        ambient_top_features: ambient::top_features(&matrix, &estimate.ambient, 10),
        runs,
    };
    let metrics_path = options.companion("_metrics.json");
    let json = serde_json::to_string_pretty(&metrics).context("Failed to serialize metrics")?;
    fs::write(&metrics_path, json)
        .with_context(|| format!("Failed to write metrics to {:?}", metrics_path))?;

    Ok(metrics)
}

fn feature_indices(matrix: &CountMatrix, names: &[String]) -> Result<Vec<usize>> {
    names
        .iter()
        .map(|name| {
            matrix
                .features
                .iter()
                .position(|f| f == name)
                .with_context(|| format!("Excluded feature '{}' is not in the count matrix", name))
        })
        .collect()
}

fn write_barcodes(path: &Path, matrix: &CountMatrix, cells: &[usize]) -> Result<()> {
    let mut text = String::new();
    for &cell in cells {
        text.push_str(&matrix.barcodes[cell]);
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("Failed to write cell barcodes to {:?}", path))
}
