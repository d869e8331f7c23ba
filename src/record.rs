use std::sync::LazyLock;

use regex::Regex;

use crate::error::ErrorAccumulator;
use crate::types::{MoveRecord, MoveToken};

// Example line: "17 K,1600:00:00102260.5070411.5±16 F,170.001037"
// Move 17, K16 played, thinking time 00:00:00, 10226 playouts, Black wins with
// P = 0.507041, projected score 1.5±16, engine prefers F17 by a delta of 0.001037.

static MOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]),([ \d]\d)").expect("valid move regex"));

static SUGGESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]),([ \d]\d)(.*)$").expect("valid suggestion regex"));

static WINRATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0\.\d{4}").expect("valid win-rate regex"));

/// The suggestion is never searched for before this byte offset, so the
/// played move is not picked up twice.
const SUGGESTION_MIN_OFFSET: usize = 8;

/// Parse one accepted analysis line. Pieces that do not parse are left out and
/// explained in `parse_error`.
pub fn parse_move_record(index: u32, line: &str) -> MoveRecord {
    let mut parse_error = ErrorAccumulator::default();

    let actual_match = MOVE_RE.captures(line);
    let actual = actual_match
        .as_ref()
        .and_then(|caps| move_token(&caps[1], &caps[2]));
    if actual.is_none() {
        parse_error.push("no played move");
    }

    let search_from = actual_match
        .as_ref()
        .and_then(|caps| caps.get(0))
        .map_or(0, |m| m.end())
        .max(SUGGESTION_MIN_OFFSET);
    let remainder = tail_from(line, search_from);

    let (suggested, delta) = match SUGGESTION_RE.captures(remainder) {
        Some(caps) => {
            let suggested = move_token(&caps[1], &caps[2]);
            let raw_delta = caps[3].trim();
            let delta = raw_delta.parse::<f64>().ok().filter(|d| d.is_finite());
            if delta.is_none() {
                parse_error.push(&format!("delta '{raw_delta}' is not numeric"));
            }
            (suggested, delta)
        }
        None => (None, None),
    };

    let winrate = WINRATE_RE
        .find(line)
        .and_then(|m| m.as_str().parse::<f64>().ok());
    if winrate.is_none() {
        parse_error.push("no win-rate");
    }

    MoveRecord {
        index,
        actual,
        suggested,
        delta,
        winrate,
        parse_error: parse_error.take(),
    }
}

/// Parse every accepted line; record indices follow the accepted order.
pub fn parse_move_records<S: AsRef<str>>(lines: &[S]) -> Vec<MoveRecord> {
    lines
        .iter()
        .zip(1u32..)
        .map(|(line, index)| parse_move_record(index, line.as_ref()))
        .collect()
}

fn move_token(letter: &str, number: &str) -> Option<MoveToken> {
    Some(MoveToken {
        column: letter.chars().next()?,
        number: number.trim().parse().ok()?,
    })
}

/// `&line[offset..]`, moved forward to the next char boundary if needed.
fn tail_from(line: &str, offset: usize) -> &str {
    let start = (offset..=line.len())
        .find(|&i| line.is_char_boundary(i))
        .unwrap_or(line.len());
    &line[start..]
}
