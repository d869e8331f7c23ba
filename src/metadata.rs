use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::types::GameMetadata;

static WHITE_WINS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"White wins by (.+) points").expect("valid white wins regex"));

static BLACK_WINS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Black wins by (.+) points").expect("valid black wins regex"));

/// Scan every display string for header fields. Later fields overwrite earlier
/// ones; unparseable values are ignored.
pub fn parse_metadata<S: AsRef<str>>(strings: &[S]) -> GameMetadata {
    let mut metadata = GameMetadata::default();

    for s in strings.iter().map(AsRef::as_ref) {
        if let Some(name) = s.strip_prefix("Black: ") {
            metadata.black = Some(player_name(name));
        }
        if let Some(name) = s.strip_prefix("White: ") {
            metadata.white = Some(player_name(name));
        }
        if let Some(komi) = s.strip_prefix("Komi: ") {
            match komi.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => metadata.komi = Some(v),
                _ => debug!(value = komi, "ignoring unparseable komi"),
            }
        }
        if let Some(handicap) = s.strip_prefix("Handicap Stones: ") {
            match handicap.trim().parse::<u32>() {
                Ok(v) => metadata.handicap = Some(v),
                Err(_) => debug!(value = handicap, "ignoring unparseable handicap"),
            }
        }
        if s.starts_with("Status: ")
            && let Some(result) = parse_status(s)
        {
            metadata.result = Some(result);
        }
        if let Some(date) = parse_date_token(s) {
            metadata.date = Some(date);
        }
    }

    metadata
}

fn player_name(raw: &str) -> String {
    raw.replace('\u{2026}', "...")
}

/// Map the free-text game status to an SGF result. The last matching rule
/// wins.
fn parse_status(status: &str) -> Option<String> {
    let mut result = None;

    if status.contains("Time up. Black loses") {
        result = Some("W+T".to_string());
    }
    if status.contains("Time up. White loses") {
        result = Some("B+T".to_string());
    }
    if status.contains("Black has resigned") {
        result = Some("W+R".to_string());
    }
    if status.contains("White has resigned") {
        result = Some("B+R".to_string());
    }
    if let Some(caps) = WHITE_WINS_RE.captures(status) {
        result = Some(format!("W+{}", &caps[1]));
    }
    if let Some(caps) = BLACK_WINS_RE.captures(status) {
        result = Some(format!("B+{}", &caps[1]));
    }

    result
}

/// A bare `YYYY/MM/DD` token becomes `YYYY-MM-DD`.
fn parse_date_token(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'/' || bytes[7] != b'/' {
        return None;
    }

    match NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        Ok(date) => Some(date.format("%Y-%m-%d").to_string()),
        Err(e) => {
            debug!(value = s, error = %e, "ignoring invalid date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_players_komi_handicap() {
        let strings = [
            "Black: Alice",
            "White: CrazyStone Deep Lea\u{2026}",
            "Komi: 6.5",
            "Handicap Stones: 3",
        ];

        let metadata = parse_metadata(&strings);
        assert_eq!(metadata.black.as_deref(), Some("Alice"));
        assert_eq!(metadata.white.as_deref(), Some("CrazyStone Deep Lea..."));
        assert_eq!(metadata.komi, Some(6.5));
        assert_eq!(metadata.handicap, Some(3));
    }

    #[test]
    fn test_unparseable_numbers_are_omitted() {
        let metadata = parse_metadata(&["Komi: six", "Handicap Stones: many"]);
        assert_eq!(metadata.komi, None);
        assert_eq!(metadata.handicap, None);
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let metadata = parse_metadata(&["1 D, 4", "something else"]);
        assert_eq!(metadata, GameMetadata::default());
    }

    #[test]
    fn test_status_results() {
        let cases = [
            ("Status: Time up. Black loses", "W+T"),
            ("Status: Time up. White loses", "B+T"),
            ("Status: Black has resigned", "W+R"),
            ("Status: White has resigned", "B+R"),
            ("Status: White wins by 7.5 points", "W+7.5"),
            ("Status: Black wins by 0.5 points", "B+0.5"),
        ];

        for (status, expected) in cases {
            let metadata = parse_metadata(&[status]);
            assert_eq!(metadata.result.as_deref(), Some(expected), "{status}");
        }
    }

    #[test]
    fn test_status_without_known_outcome() {
        let metadata = parse_metadata(&["Status: In progress"]);
        assert_eq!(metadata.result, None);
    }

    #[test]
    fn test_result_requires_status_prefix() {
        let metadata = parse_metadata(&["Black has resigned"]);
        assert_eq!(metadata.result, None);
    }

    #[test]
    fn test_date_token() {
        let metadata = parse_metadata(&["2016/06/01"]);
        assert_eq!(metadata.date.as_deref(), Some("2016-06-01"));
    }

    #[test]
    fn test_date_token_rejects_invalid() {
        assert_eq!(parse_date_token("2016/13/01"), None);
        assert_eq!(parse_date_token("2016-06-01"), None);
        assert_eq!(parse_date_token("16/06/2016"), None);
        assert_eq!(parse_date_token("2016/06/011"), None);
    }

    #[test]
    fn test_later_fields_overwrite_earlier() {
        let metadata = parse_metadata(&["Black: First", "Black: Second"]);
        assert_eq!(metadata.black.as_deref(), Some("Second"));
    }
}
