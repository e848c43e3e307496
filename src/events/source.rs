//! Event source resolution.
//!
//! An event table comes from either a local file or a shared spreadsheet.
//! Spreadsheet links arrive in several shapes (sharing links, edit links
//! with a tab fragment, or ready-made export links); all of them resolve
//! here, once, into a [`SheetRef`] that renders the canonical CSV export
//! endpoint. Downstream code never re-inspects the source's shape.

use std::fmt;
use std::path::PathBuf;

use crate::constants::sheets;
use crate::error::{Error, Result};

/// Reference to one tab of a remote spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    /// Document identifier from the link path.
    pub sheet_id: String,
    /// Tab identifier; `0` selects the first tab.
    pub gid: String,
}

impl SheetRef {
    /// Render the canonical CSV export endpoint for this sheet tab.
    pub fn export_url(&self) -> String {
        format!(
            "https://{}{}{}/export?format=csv&gid={}",
            sheets::HOST,
            sheets::PATH_PREFIX,
            self.sheet_id,
            self.gid
        )
    }
}

/// Where an event table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    /// CSV file on the local filesystem.
    Local(PathBuf),
    /// Tab of a remote spreadsheet, fetched over HTTP.
    Sheet(SheetRef),
}

impl EventSource {
    /// Resolve a user-supplied source string.
    ///
    /// Detection is by URL shape alone: anything starting with `http://` or
    /// `https://` must be a recognizable spreadsheet link, everything else
    /// is treated as a local path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSheetUrl`] for an http(s) URL that does not
    /// carry the known host and path segment. A URL is never silently
    /// reinterpreted as a local path.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let sheet = parse_sheet_url(trimmed).ok_or_else(|| Error::InvalidSheetUrl {
                url: trimmed.to_string(),
            })?;
            Ok(Self::Sheet(sheet))
        } else {
            Ok(Self::Local(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Sheet(sheet) => write!(f, "{}", sheet.export_url()),
        }
    }
}

/// Extract the sheet id and tab id from a spreadsheet link, if it is one.
fn parse_sheet_url(url: &str) -> Option<SheetRef> {
    let marker = format!("{}{}", sheets::HOST, sheets::PATH_PREFIX);
    let after = &url[url.find(&marker)? + marker.len()..];

    let sheet_id: String = after
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if sheet_id.is_empty() {
        return None;
    }

    Some(SheetRef {
        sheet_id,
        gid: extract_gid(url).unwrap_or_else(|| sheets::DEFAULT_GID.to_string()),
    })
}

/// Find a `gid=` tab identifier introduced by `#` or `&`.
fn extract_gid(url: &str) -> Option<String> {
    for (pos, _) in url.match_indices("gid=") {
        let introducer = url[..pos].chars().next_back();
        if matches!(introducer, Some('#' | '&')) {
            let digits: String = url[pos + 4..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            if !digits.is_empty() {
                return Some(digits);
            }
        }
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sheet(input: &str) -> SheetRef {
        match EventSource::parse(input).unwrap() {
            EventSource::Sheet(s) => s,
            EventSource::Local(p) => panic!("expected sheet, got local path {}", p.display()),
        }
    }

    #[test]
    fn test_edit_link_without_gid_defaults_to_first_tab() {
        let s = sheet("https://docs.google.com/spreadsheets/d/1rydB9tbIIL-CsTYPSPwWzabxe_CRKXeCfH7HCcCFoxM/edit");
        assert_eq!(s.sheet_id, "1rydB9tbIIL-CsTYPSPwWzabxe_CRKXeCfH7HCcCFoxM");
        assert_eq!(s.gid, "0");
    }

    #[test]
    fn test_edit_link_with_gid_fragment() {
        let s = sheet("https://docs.google.com/spreadsheets/d/abc-123_X/edit#gid=123");
        assert_eq!(s.sheet_id, "abc-123_X");
        assert_eq!(s.gid, "123");
    }

    #[test]
    fn test_sharing_link() {
        let s = sheet("https://docs.google.com/spreadsheets/d/abc123/edit?usp=sharing");
        assert_eq!(s.sheet_id, "abc123");
        assert_eq!(s.gid, "0");
    }

    #[test]
    fn test_export_link_round_trips() {
        let s = sheet("https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=456");
        assert_eq!(s.sheet_id, "abc123");
        assert_eq!(s.gid, "456");
        assert_eq!(
            s.export_url(),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=456"
        );
    }

    #[test]
    fn test_unknown_url_rejected() {
        let err = EventSource::parse("https://example.com/not-a-sheet").unwrap_err();
        assert!(matches!(err, Error::InvalidSheetUrl { .. }));
    }

    #[test]
    fn test_sheet_link_without_id_rejected() {
        assert!(EventSource::parse("https://docs.google.com/spreadsheets/d/").is_err());
    }

    #[test]
    fn test_plain_path_is_local() {
        let source = EventSource::parse("events/session one.csv").unwrap();
        assert_eq!(
            source,
            EventSource::Local(PathBuf::from("events/session one.csv"))
        );
    }

    #[test]
    fn test_query_param_gid_without_introducer_ignored() {
        // Only `#gid=` and `&gid=` name a tab; a stray `?gid=` does not.
        let s = sheet("https://docs.google.com/spreadsheets/d/abc123?gid=77");
        assert_eq!(s.gid, "0");
    }

    #[test]
    fn test_display_renders_export_endpoint() {
        let source = EventSource::parse("https://docs.google.com/spreadsheets/d/abc/edit").unwrap();
        assert_eq!(
            source.to_string(),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=0"
        );
    }
}
