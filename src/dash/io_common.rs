use std::path::Path;

use log::warn;
use review_sentiment::DatasetKind;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// The name of the data file of an application.
pub fn dataset_file_name(app: &str, kind: DatasetKind) -> String {
    let app = app.trim().to_lowercase();
    match kind {
        DatasetKind::Basic => format!("{}.csv", app),
        DatasetKind::Versioned => format!("{}_with_versions.csv", app),
    }
}

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Removes the byte-order mark and the whitespace around a column name.
pub fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Decodes the content of a file.
///
/// UTF-8 is tried first. Anything else is read as Latin-1, which maps every byte to a character.
pub fn decode_bytes(bytes: &[u8], path: &Path) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!(
                "decode_bytes: {} is not valid UTF-8 ({}), reading it as Latin-1",
                simplify_file_name(path),
                e
            );
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_conventions() {
        assert_eq!(dataset_file_name("Zoom", DatasetKind::Basic), "zoom.csv");
        assert_eq!(
            dataset_file_name(" WebEx ", DatasetKind::Versioned),
            "webex_with_versions.csv"
        );
    }

    #[test]
    fn headers_lose_bom_and_spaces() {
        assert_eq!(normalize_header("\u{feff}Month"), "Month");
        assert_eq!(normalize_header("  Feature Title \t"), "Feature Title");
        assert_eq!(normalize_header(" \u{feff} Version"), "Version");
    }

    #[test]
    fn latin1_fallback() {
        let p = Path::new("firefox.csv");
        assert_eq!(decode_bytes(b"caf\xe9", p), "caf\u{e9}");
        assert_eq!(decode_bytes("café".as_bytes(), p), "café");
        assert_eq!(decode_bytes(b"\xEF\xBB\xBFMonth", p), "Month");
        // A BOM in front of a Latin-1 body
        assert_eq!(decode_bytes(b"\xEF\xBB\xBFna\xefve", p), "na\u{ef}ve");
    }
}
