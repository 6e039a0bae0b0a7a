//! Line classification for descriptor files.

use regex::Regex;
use std::sync::LazyLock;

/// Line-comment marker; everything after it is dropped.
const COMMENT: &str = "//";

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([a-z0-9_]+)\]$").unwrap());

/// A non-empty line of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// `[section_name]`, holding the name without brackets.
    Header(&'a str),
    /// Anything else, trimmed and without its trailing comment.
    Data(&'a str),
}

/// Classify one raw line. Returns `None` for blank and comment-only lines.
pub fn classify(raw: &str) -> Option<Line<'_>> {
    let mut line = raw.trim();
    if let Some(pos) = line.find(COMMENT) {
        line = line[..pos].trim_end();
    }

    if line.is_empty() {
        return None;
    }

    match SECTION_HEADER.captures(line).and_then(|caps| caps.get(1)) {
        Some(name) => Some(Line::Header(name.as_str())),
        None => Some(Line::Data(line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header() {
        assert_eq!(classify("[start_map]"), Some(Line::Header("start_map")));
        assert_eq!(classify("  [mods]  "), Some(Line::Header("mods")));
        assert_eq!(classify("[loadout] // weapons"), Some(Line::Header("loadout")));
    }

    #[test]
    fn test_classify_skips_blank_and_comments() {
        assert_eq!(classify(""), None);
        assert_eq!(classify("   \t"), None);
        assert_eq!(classify("// just a comment"), None);
        assert_eq!(classify("   // indented comment"), None);
    }

    #[test]
    fn test_classify_data_strips_comment() {
        assert_eq!(classify("c1a0 // first map"), Some(Line::Data("c1a0")));
        assert_eq!(classify("  0 0 64 90  "), Some(Line::Data("0 0 64 90")));
    }

    #[test]
    fn test_uppercase_header_is_data() {
        // Only lowercase names are headers; anything else is data.
        assert_eq!(classify("[Start_Map]"), Some(Line::Data("[Start_Map]")));
        assert_eq!(classify("[a b]"), Some(Line::Data("[a b]")));
    }
}
