use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::calibration::{CalibrationCurve, DECISION_STDEV_FACTOR};
use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::metadata::parse_metadata;
use crate::reader::{PageSource, display_strings, numbered_strings, open_archive, read_pages};
use crate::record::parse_move_records;
use crate::sgf::SgfEmitter;

const OUTPUT_SUFFIX: &str = "_analysis.sgf";

/// Options plus the calibration curves built from them. Immutable after
/// construction and reused for every archive of a run.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
    display_curve: CalibrationCurve,
    decision_curve: CalibrationCurve,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Result<Self, ConvertError> {
        options.validate()?;
        let display_curve = CalibrationCurve::new(options.stdev)?;
        let decision_curve = CalibrationCurve::new(options.stdev * DECISION_STDEV_FACTOR)?;

        Ok(Self {
            options,
            display_curve,
            decision_curve,
        })
    }

    /// SGF text for the archive behind `source`.
    pub fn convert_pages(&self, source: &mut impl PageSource) -> Result<String, ConvertError> {
        let pages = read_pages(source)?;
        let strings = display_strings(pages.iter().map(String::as_str));

        let metadata = parse_metadata(&strings);
        let records = parse_move_records(&numbered_strings(&strings));
        info!(
            display_strings = strings.len(),
            records = records.len(),
            "extracted analysis records"
        );

        let emitter = SgfEmitter::new(&self.options, &self.display_curve, &self.decision_curve);
        Ok(emitter.emit(&metadata, &records).to_string())
    }

    /// Convert one archive file and write `<input>_analysis.sgf` next to it.
    /// Nothing is written unless the whole document was built.
    pub fn convert_file(&self, input: &Path) -> Result<PathBuf, ConvertError> {
        let mut archive = open_archive(input)?;
        let sgf = self.convert_pages(&mut archive)?;

        let output = output_path(input);
        fs::write(&output, sgf).map_err(|source| ConvertError::OutputUnwritable {
            path: output.clone(),
            source,
        })?;
        Ok(output)
    }
}

pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}
