use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::board::HandicapConvention;
use crate::config::{ConvertOptions, DEFAULT_BOARD_SIZE, DEFAULT_SENSITIVITY, DEFAULT_STDEV};
use crate::convert::Converter;

#[derive(Debug, Parser)]
#[command(
    name = "csa2sgf",
    version,
    about = "Convert CrazyStone analysis printouts (XPS/OXPS) into annotated SGF files"
)]
pub struct Cli {
    /// Archives to convert; glob patterns are expanded
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<String>,

    /// Board size used for every input file
    #[arg(
        long,
        default_value_t = DEFAULT_BOARD_SIZE,
        value_parser = clap::value_parser!(u32).range(2..=25)
    )]
    pub size: u32,

    /// Standard deviation of the win-rate calibration curve. At about 0.289
    /// (the uniform limit, sqrt(1/12)) or above, win-rates are shown uncalibrated
    #[arg(long, default_value_t = DEFAULT_STDEV)]
    pub stdev: f64,

    /// Place the third handicap stone top-left (Tygem convention)
    #[arg(long)]
    pub tygem: bool,

    /// Also show uncalibrated win-rate and delta figures in comments
    #[arg(long)]
    pub raw: bool,

    /// Scale relevance thresholds; higher values show more suggestions
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY)]
    pub sensitivity: f64,
}

impl Cli {
    pub fn options(&self) -> ConvertOptions {
        let convention = if self.tygem {
            HandicapConvention::Tygem
        } else {
            HandicapConvention::Standard
        };

        ConvertOptions::new()
            .with_board_size(self.size)
            .with_stdev(self.stdev)
            .with_handicap_convention(convention)
            .with_raw_figures(self.raw)
            .with_sensitivity(self.sensitivity)
    }
}

/// Expand glob patterns; plain arguments are taken literally.
pub fn expand_inputs(args: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for arg in args {
        if !(arg.contains('*') || arg.contains('?')) {
            paths.push(PathBuf::from(arg));
            continue;
        }

        match glob::glob(arg) {
            Ok(entries) => {
                let before = paths.len();
                paths.extend(entries.filter_map(|entry| entry.ok()));
                if paths.len() == before {
                    warn!(pattern = %arg, "pattern matched no files");
                }
            }
            Err(e) => {
                warn!(pattern = %arg, error = %e, "invalid glob pattern, using it as a path");
                paths.push(PathBuf::from(arg));
            }
        }
    }

    paths
}

/// Convert every input independently and return how many failed. A failure
/// is reported and does not stop the remaining files.
pub fn convert_all(converter: &Converter, inputs: &[PathBuf]) -> usize {
    let mut failures = 0usize;

    for input in inputs {
        match converter.convert_file(input) {
            Ok(output) => {
                println!("{} converted to {}", input.display(), output.display());
            }
            Err(err) => {
                failures += 1;
                eprintln!("Couldn't convert {}: {}", input.display(), err);
            }
        }
    }

    failures
}
