//
// matrix.rs
// Toolsuite-rs
//
// Dense count matrix backed by ndarray, read from and written to CSV.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Dense droplet-by-feature count matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    pub barcodes: Vec<String>,
    pub features: Vec<String>,
    /// One row per droplet, one column per feature.
    pub counts: Array2<f64>,
}

impl CountMatrix {
    pub fn read_csv(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read count matrix {:?}", path))?;
        Self::parse_csv(&text).with_context(|| format!("Malformed count matrix {:?}", path))
    }

    pub fn parse_csv(text: &str) -> Result<Self> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next().context("Count matrix is empty")?;
        let features: Vec<String> = header
            .split(',')
            .skip(1)
            .map(|f| f.trim().to_string())
            .collect();
        if features.is_empty() {
            bail!("Header must name at least one feature after the barcode column");
        }

        let mut barcodes = Vec::new();
        let mut values = Vec::new();
        for (idx, line) in lines.enumerate() {
            let mut cells = line.split(',').map(str::trim);
            let barcode = cells.next().unwrap_or_default().to_string();
            let row: Vec<&str> = cells.collect();
            if row.len() != features.len() {
                bail!(
                    "Row {} ({}) has {} counts, expected {}",
                    idx + 2,
                    barcode,
                    row.len(),
                    features.len()
                );
            }
            for raw in row {
                let count: f64 = raw
                    .parse()
                    .with_context(|| format!("Invalid count '{}' for droplet {}", raw, barcode))?;
                if !count.is_finite() || count < 0.0 {
                    bail!("Counts must be non-negative, got {} for droplet {}", raw, barcode);
                }
                values.push(count);
            }
            barcodes.push(barcode);
        }

        let counts = Array2::from_shape_vec((barcodes.len(), features.len()), values)?;
        Ok(Self {
            barcodes,
            features,
            counts,
        })
    }

    /// Total counts per droplet.
    pub fn totals(&self) -> Array1<f64> {
        self.counts.sum_axis(Axis(1))
    }

    pub fn n_droplets(&self) -> usize {
        self.barcodes.len()
    }

    /// Write the given droplets with their (already processed) counts in the input layout.
    pub fn write_csv(&self, path: &Path, droplets: &[usize], counts: ArrayView2<f64>) -> Result<()> {
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create output {:?}", path))?;
        let mut out = BufWriter::new(file);

        writeln!(out, "barcode,{}", self.features.join(","))?;
        for (row, &droplet) in counts.rows().into_iter().zip(droplets) {
            let fields: Vec<String> = row.iter().map(|v| format!("{}", v.round() as u64)).collect();
            writeln!(out, "{},{}", self.barcodes[droplet], fields.join(","))?;
        }
        out.flush()?;
        Ok(())
    }
}
