//
// argparser.rs
// Toolsuite-rs
//
// Argument schema of the remove-background tool, registered as a sub-command.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

pub const NAME: &str = "remove-background";

/// Register `remove-background` and its flags on the shared sub-command set.
pub fn add_subparser_args(subparsers: Command) -> Command {
    let tool = Command::new(NAME)
        .about("Remove background RNA from a count matrix.")
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("INPUT")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Count matrix CSV: a 'barcode' column followed by one column per feature."),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("OUTPUT")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("Output CSV for the background-removed matrix. Companion files share its stem."),
        )
        .arg(
            Arg::new("expected_cells")
                .long("expected-cells")
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help("Number of cells expected in the dataset. Defaults to a knee-based call."),
        )
        .arg(
            Arg::new("total_droplets_included")
                .long("total-droplets-included")
                .value_name("N")
                .value_parser(value_parser!(u32))
                .help(
                    "Number of highest-count droplets to consider; droplets beyond the cells \
                     and within this rank are treated as empty.",
                ),
        )
        .arg(
            Arg::new("low_count_threshold")
                .long("low-count-threshold")
                .value_name("UMIS")
                .value_parser(value_parser!(u32))
                .default_value("5")
                .help("Droplets with fewer total counts than this are ignored entirely."),
        )
        .arg(
            Arg::new("fpr")
                .long("fpr")
                .value_name("FPR")
                .value_parser(value_parser!(f64))
                .num_args(1..)
                .default_value("0.01")
                .help(
                    "Target false positive rate in [0, 1). Several values produce one \
                     output per value.",
                ),
        )
        .arg(
            Arg::new("exclude_features")
                .long("exclude-features")
                .value_name("FEATURE")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Features left untouched and excluded from the ambient profile."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Log the estimated ambient profile in full."),
        );

    subparsers.subcommand(tool)
}
