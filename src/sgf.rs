use std::fmt::{self, Write};

use tracing::{debug, warn};

use crate::board::{Point, handicap_points, point_from_notation, sgf_from_point};
use crate::calibration::CalibrationCurve;
use crate::config::ConvertOptions;
use crate::relevance::{MoveHistory, RelevancePolicy};
use crate::types::{Color, GameMetadata, MoveRecord, MoveToken};

/// Display deltas at or above this are flagged as hotspots.
pub const STRONG_DELTA: f64 = 0.08;
pub const MODERATE_DELTA: f64 = 0.04;

const HANDICAP_WARNING: &str = "WARNING: Handicap placement has been guessed at by csa2sgf.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SgfNode {
    properties: Vec<(&'static str, Vec<String>)>,
}

impl SgfNode {
    pub fn push(&mut self, ident: &'static str, value: impl Into<String>) {
        self.properties.push((ident, vec![value.into()]));
    }

    pub fn push_list(&mut self, ident: &'static str, values: Vec<String>) {
        if !values.is_empty() {
            self.properties.push((ident, values));
        }
    }

    pub fn get(&self, ident: &str) -> Option<&[String]> {
        self.properties
            .iter()
            .find(|(key, _)| *key == ident)
            .map(|(_, values)| values.as_slice())
    }
}

impl fmt::Display for SgfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(';')?;
        for (ident, values) in &self.properties {
            f.write_str(ident)?;
            for value in values {
                write!(f, "[{}]", escape_text(value))?;
            }
        }
        Ok(())
    }
}

/// A single game tree without variations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SgfDocument {
    pub nodes: Vec<SgfNode>,
}

impl fmt::Display for SgfDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('(')?;
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        f.write_char(')')
    }
}

/// Escape `\` and `]` inside a property value.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Strong,
    Moderate,
    Slight,
}

impl Severity {
    pub fn classify(display_delta: f64) -> Self {
        if display_delta >= STRONG_DELTA {
            Self::Strong
        } else if display_delta >= MODERATE_DELTA {
            Self::Moderate
        } else {
            Self::Slight
        }
    }

    fn markup(self) -> &'static str {
        match self {
            Self::Strong => "SQ",
            Self::Moderate => "TR",
            Self::Slight => "CR",
        }
    }
}

/// Turns parsed records into an SGF game tree.
pub struct SgfEmitter<'a> {
    options: &'a ConvertOptions,
    display_curve: &'a CalibrationCurve,
    decision_curve: &'a CalibrationCurve,
    policy: RelevancePolicy,
}

impl<'a> SgfEmitter<'a> {
    pub fn new(
        options: &'a ConvertOptions,
        display_curve: &'a CalibrationCurve,
        decision_curve: &'a CalibrationCurve,
    ) -> Self {
        Self {
            options,
            display_curve,
            decision_curve,
            policy: RelevancePolicy::new(options.sensitivity),
        }
    }

    pub fn emit(&self, metadata: &GameMetadata, records: &[MoveRecord]) -> SgfDocument {
        let board_size = self.options.board_size;
        let mut nodes = Vec::with_capacity(records.len() + 1);

        let mut root = SgfNode::default();
        for (ident, value) in metadata.properties(board_size) {
            root.push(ident, value);
        }

        let mut color = Color::Black;
        let handicap = metadata.handicap.unwrap_or(0);
        if handicap >= 2 {
            let stones: Vec<String> =
                handicap_points(board_size, handicap, self.options.handicap_convention)
                    .into_iter()
                    .filter_map(|point| sgf_from_point(point).ok())
                    .collect();
            if !stones.is_empty() {
                root.push_list("AB", stones);
                root.push("C", HANDICAP_WARNING);
                color = Color::White;
            }
        }
        nodes.push(root);

        let center = Point::center(board_size);
        let mut previous = center;
        let mut before_previous = center;

        for record in records {
            let Some(actual) = record.actual else {
                debug!(index = record.index, reason = ?record.parse_error, "record has no move");
                continue;
            };
            let Some((actual_point, actual_sgf)) = self.locate(actual) else {
                warn!(index = record.index, mv = %actual, "skipping move outside the board");
                continue;
            };

            let mut node = SgfNode::default();
            node.push(color.sgf_tag(), actual_sgf);

            let history = MoveHistory {
                current: actual_point,
                previous,
                before_previous,
            };
            let mut comment = String::new();
            self.annotate_suggestion(record, color, &history, &mut node, &mut comment);

            if let Some(winrate) = record.winrate {
                let _ = writeln!(
                    comment,
                    "Black winrate: {:.2} %",
                    self.display_curve.eval(winrate) * 100.0
                );
            }

            if self.options.show_raw {
                if let Some(winrate) = record.winrate {
                    let _ = writeln!(comment, "Raw black winrate: {:.2} %", winrate * 100.0);
                }
                if let Some(delta) = record.delta {
                    let _ = writeln!(comment, "Raw delta: {:.2} %", delta * 100.0);
                }
            }

            let comment = comment.trim_end();
            if !comment.is_empty() {
                node.push("C", comment);
            }
            nodes.push(node);

            before_previous = previous;
            previous = actual_point;
            color = color.opposite();
        }

        SgfDocument { nodes }
    }

    fn annotate_suggestion(
        &self,
        record: &MoveRecord,
        color: Color,
        history: &MoveHistory,
        node: &mut SgfNode,
        comment: &mut String,
    ) {
        let Some(suggested) = record.suggested else {
            return;
        };
        if record.actual == Some(suggested) {
            return;
        }
        let Some((suggested_point, suggested_sgf)) = self.locate(suggested) else {
            debug!(index = record.index, mv = %suggested, "suggestion outside the board");
            return;
        };

        let (Some(delta), Some(winrate)) = (record.delta, record.winrate) else {
            let _ = writeln!(comment, "CS prefers {suggested}");
            return;
        };

        let mover_winrate = match color {
            Color::Black => winrate,
            Color::White => 1.0 - winrate,
        };
        let display_delta = calibrated_delta(self.display_curve, mover_winrate, delta);
        let decision_delta = calibrated_delta(self.decision_curve, mover_winrate, delta);

        if !self.policy.is_relevant(decision_delta, suggested_point, history) {
            debug!(
                index = record.index,
                mv = %suggested,
                decision_delta,
                "suggestion below relevance threshold"
            );
            return;
        }

        let severity = Severity::classify(display_delta);
        node.push(severity.markup(), suggested_sgf);
        if severity == Severity::Strong {
            node.push("HO", "1");
        }
        let _ = writeln!(
            comment,
            "CS prefers {} -- delta: {:.2} %",
            suggested,
            display_delta * 100.0
        );
    }

    fn locate(&self, token: MoveToken) -> Option<(Point, String)> {
        let point = point_from_notation(&token.to_string(), self.options.board_size).ok()?;
        let sgf = sgf_from_point(point).ok()?;
        Some((point, sgf))
    }
}

/// Gain of the suggestion on the calibrated scale, from the mover's side.
fn calibrated_delta(curve: &CalibrationCurve, mover_winrate: f64, delta: f64) -> f64 {
    let played = mover_winrate.clamp(0.0, 1.0);
    let preferred = (played + delta).clamp(0.0, 1.0);
    curve.eval(preferred) - curve.eval(played)
}
