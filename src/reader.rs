use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ConvertError;

/// Fixed-page resources of the first document in an XPS/OXPS package.
const PAGE_PATH_PREFIX: &str = "Documents/1/Pages/";
const PAGE_EXTENSION: &str = "fpage";

static DISPLAY_STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"UnicodeString="([^"]+)""#).expect("valid display string regex"));

static CHAR_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(\d+)|#[xX]([0-9a-fA-F]+)|(amp|lt|gt|quot|apos));")
        .expect("valid character reference regex")
});

/// Anything that can hand out numbered page resources.
pub trait PageSource {
    /// Raw bytes of page `index` (1-based), or `None` once past the last page.
    fn page(&mut self, index: usize) -> Result<Option<Vec<u8>>, ConvertError>;
}

impl<R: Read + Seek> PageSource for ZipArchive<R> {
    fn page(&mut self, index: usize) -> Result<Option<Vec<u8>>, ConvertError> {
        let name = page_path(index);
        let mut entry = match self.by_name(&name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| ConvertError::PageUnreadable {
                page: index,
                source,
            })?;
        Ok(Some(bytes))
    }
}

pub fn page_path(index: usize) -> String {
    format!("{PAGE_PATH_PREFIX}{index}.{PAGE_EXTENSION}")
}

pub fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, ConvertError> {
    let file = File::open(path).map_err(ConvertError::InputUnreadable)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// Decoded text of every page, in page order. Stops at the first missing index.
pub fn read_pages(source: &mut impl PageSource) -> Result<Vec<String>, ConvertError> {
    let mut pages = Vec::new();

    let mut index = 1;
    while let Some(bytes) = source.page(index)? {
        pages.push(String::from_utf8_lossy(&bytes).into_owned());
        index += 1;
    }

    if pages.is_empty() {
        return Err(ConvertError::EmptyArchive);
    }

    debug!(pages = pages.len(), "read page resources");
    Ok(pages)
}

/// Every quoted display string on every line, in file order.
pub fn display_strings<'a>(pages: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pages
        .into_iter()
        .flat_map(str::lines)
        .flat_map(|line| DISPLAY_STRING_RE.captures_iter(line))
        .map(|caps| decode_char_references(&caps[1]).into_owned())
        .collect()
}

/// Keep only strings that continue the numbered sequence "1 ", "2 ", ...
/// Anything else is dropped without advancing the expected number.
pub fn numbered_strings<S: AsRef<str>>(strings: &[S]) -> Vec<&str> {
    strings
        .iter()
        .map(AsRef::as_ref)
        .fold((1u32, Vec::new()), |(expected, mut accepted), s| {
            let prefix = format!("{expected} ");
            if s.starts_with(&prefix) {
                accepted.push(s);
                (expected + 1, accepted)
            } else {
                (expected, accepted)
            }
        })
        .1
}

fn decode_char_references(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    CHAR_REFERENCE_RE.replace_all(raw, |caps: &regex::Captures<'_>| {
        let decoded = if let Some(dec) = caps.get(1) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
        } else if let Some(hex) = caps.get(2) {
            u32::from_str_radix(hex.as_str(), 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            match &caps[3] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => None,
            }
        };

        decoded
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    })
}
