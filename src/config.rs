use crate::board::HandicapConvention;
use crate::error::ConvertError;

pub const DEFAULT_BOARD_SIZE: u32 = 19;
pub const DEFAULT_STDEV: f64 = 0.15;
pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Largest board the human notation can address (25 letters, `I` skipped).
pub const MAX_BOARD_SIZE: u32 = 25;
pub const MIN_BOARD_SIZE: u32 = 2;

/// Options shared by every archive converted in one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub board_size: u32,

    /// Standard deviation of the win-rate calibration curve
    pub stdev: f64,

    pub handicap_convention: HandicapConvention,

    /// Append uncalibrated win-rate and delta figures to comments
    pub show_raw: bool,

    /// Scales relevance thresholds down; higher shows more suggestions
    pub sensitivity: f64,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board_size(mut self, board_size: u32) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_stdev(mut self, stdev: f64) -> Self {
        self.stdev = stdev;
        self
    }

    pub fn with_handicap_convention(mut self, convention: HandicapConvention) -> Self {
        self.handicap_convention = convention;
        self
    }

    pub fn with_raw_figures(mut self, show_raw: bool) -> Self {
        self.show_raw = show_raw;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Reject values the converter cannot work with. The stdev itself is
    /// checked when the calibration curve is built.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConvertError::InvalidOption(format!(
                "board size {} is outside {}..={}",
                self.board_size, MIN_BOARD_SIZE, MAX_BOARD_SIZE
            )));
        }

        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(ConvertError::InvalidOption(format!(
                "sensitivity {} must be a positive number",
                self.sensitivity
            )));
        }

        Ok(())
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            stdev: DEFAULT_STDEV,
            handicap_convention: HandicapConvention::Standard,
            show_raw: false,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}
