//
// ambient.rs
// Toolsuite-rs
//
// Calls cells, estimates the ambient RNA profile from empty droplets, and subtracts it from each cell.
//
// Thales Matheus Mendonça Santos - November 2025

use anyhow::{bail, Result};
use ndarray::{Array1, Array2, Axis};
use serde::Serialize;

use super::matrix::CountMatrix;

/// Fraction of the top droplet's count a droplet needs to be called a cell when
/// no expected cell count is given.
const KNEE_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct EstimateOptions {
    pub expected_cells: Option<usize>,
    pub total_droplets_included: Option<usize>,
    pub low_count_threshold: f64,
    /// Feature columns left out of the ambient profile.
    pub excluded: Vec<usize>,
}

/// Which droplets are cells, which are empty, and what the empties look like.
#[derive(Debug, Clone)]
pub struct BackgroundEstimate {
    pub cells: Vec<usize>,
    pub empties: Vec<usize>,
    /// Normalized ambient profile; sums to 1 over the non-excluded features.
    pub ambient: Array1<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FprSummary {
    pub fpr: f64,
    pub output: String,
    pub counts_removed: f64,
    pub fraction_removed: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovalMetrics {
    pub droplets: usize,
    pub features: usize,
    pub cells: usize,
    pub empty_droplets: usize,
    pub cell_counts: f64,
    pub ambient_top_features: Vec<(String, f64)>,
    pub runs: Vec<FprSummary>,
}

/// Droplet indices ordered by total count, highest first. Ties keep input order.
pub fn rank_droplets(totals: &Array1<f64>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..totals.len()).collect();
    order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
    order
}

pub fn estimate(matrix: &CountMatrix, options: &EstimateOptions) -> Result<BackgroundEstimate> {
    let totals = matrix.totals();
    let ranked = rank_droplets(&totals);
    let nonzero: Vec<usize> = ranked.iter().copied().filter(|&d| totals[d] > 0.0).collect();
    if nonzero.is_empty() {
        bail!("Count matrix has no droplets with counts");
    }

    let n_cells = match options.expected_cells {
        Some(expected) => expected.min(nonzero.len()),
        None => {
            let cutoff = totals[nonzero[0]] * KNEE_FRACTION;
            nonzero.iter().take_while(|&&d| totals[d] >= cutoff).count()
        }
    };
    let cells: Vec<usize> = nonzero[..n_cells].to_vec();

    let included = options
        .total_droplets_included
        .unwrap_or(ranked.len())
        .min(ranked.len());
    let empties: Vec<usize> = ranked[..included]
        .iter()
        .skip(n_cells)
        .copied()
        .filter(|&d| totals[d] >= options.low_count_threshold)
        .collect();
    if empties.is_empty() {
        bail!(
            "No empty droplets left to estimate the ambient profile ({} cells, {} droplets included); \
             raise --total-droplets-included or lower --low-count-threshold",
            n_cells,
            included
        );
    }

    let mut ambient = matrix.counts.select(Axis(0), &empties).sum_axis(Axis(0));
    for &feature in &options.excluded {
        ambient[feature] = 0.0;
    }
    let mass = ambient.sum();
    if mass <= 0.0 {
        bail!("Empty droplets carry no counts outside the excluded features");
    }
    ambient /= mass;

    tracing::debug!(cells = cells.len(), empties = empties.len(), "called droplets");
    Ok(BackgroundEstimate {
        cells,
        empties,
        ambient,
    })
}

/// Remove `fpr * cell_total * ambient` counts from each cell, never going below zero.
pub fn subtract(matrix: &CountMatrix, estimate: &BackgroundEstimate, fpr: f64) -> Array2<f64> {
    let cell_counts = matrix.counts.select(Axis(0), &estimate.cells);
    let mut denoised = cell_counts.clone();
    for (mut row, observed) in denoised.rows_mut().into_iter().zip(cell_counts.rows()) {
        let total = observed.sum();
        let background = estimate.ambient.mapv(|p| (fpr * total * p).floor());
        row.zip_mut_with(&background, |count, &bg| *count = (*count - bg).max(0.0));
    }
    denoised
}

/// Highest-weight ambient features, for reporting.
pub fn top_features(matrix: &CountMatrix, ambient: &Array1<f64>, n: usize) -> Vec<(String, f64)> {
    let mut order: Vec<usize> = (0..ambient.len()).collect();
    order.sort_by(|&a, &b| ambient[b].total_cmp(&ambient[a]));
    order
        .into_iter()
        .take(n)
        .filter(|&f| ambient[f] > 0.0)
        .map(|f| (matrix.features[f].clone(), ambient[f]))
        .collect()
}
