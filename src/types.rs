use std::fmt;

/// A move as printed in the analysis list, e.g. `K,16` -> `K16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToken {
    pub column: char,
    pub number: u32,
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.number)
    }
}

/// One numbered line of the analysis list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveRecord {
    pub index: u32,
    pub actual: Option<MoveToken>,
    pub suggested: Option<MoveToken>,
    /// Win-probability the suggestion gains over the played move.
    pub delta: Option<f64>,
    /// Black's win-rate as reported by the engine.
    pub winrate: Option<f64>,

    /// Contains None for fully parsed records or the reasons pieces are missing
    pub parse_error: Option<String>,
}

/// Game information recovered from the printed header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameMetadata {
    pub black: Option<String>,
    pub white: Option<String>,
    pub komi: Option<f64>,
    pub handicap: Option<u32>,
    pub result: Option<String>,
    pub date: Option<String>,
}

impl GameMetadata {
    /// Root node properties in emission order.
    pub fn properties(&self, board_size: u32) -> Vec<(&'static str, String)> {
        let mut props = vec![
            ("GM", "1".to_string()),
            ("FF", "4".to_string()),
            ("CA", "UTF-8".to_string()),
            ("SZ", board_size.to_string()),
        ];

        if let Some(black) = &self.black {
            props.push(("PB", black.clone()));
        }
        if let Some(white) = &self.white {
            props.push(("PW", white.clone()));
        }
        if let Some(komi) = self.komi {
            props.push(("KM", komi.to_string()));
        }
        if let Some(handicap) = self.handicap {
            props.push(("HA", handicap.to_string()));
        }
        if let Some(result) = &self.result {
            props.push(("RE", result.clone()));
        }
        if let Some(date) = &self.date {
            props.push(("DT", date.clone()));
        }

        props
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn sgf_tag(self) -> &'static str {
        match self {
            Self::Black => "B",
            Self::White => "W",
        }
    }
}
