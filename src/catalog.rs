//! Catalog loading
//!
//! Reads raw catalog records from disk. Accepts either a single JSON array of
//! records or JSON lines (one record per non-blank line).

use anyhow::{Context, Result};
use reelsim_core::RawItem;
use std::path::Path;
use tracing::debug;

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<RawItem>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let items = parse_catalog(&text).with_context(|| format!("invalid catalog {}", path.display()))?;
    debug!(path = %path.display(), records = items.len(), "loaded catalog");
    Ok(items)
}

pub fn parse_catalog(text: &str) -> Result<Vec<RawItem>> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).context("expected a JSON array of records");
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("bad record on line {}", n + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "title": "Avatar", "genres": [{{"id": 28, "name": "Action"}}], "popularity": 150.4}},
                {{"id": 2, "title": "Up", "overview": "A balloon house", "popularity": "92.2"}}]"#
        )
        .unwrap();

        let items = load_catalog(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        let up = items[1].clone().normalize(1).unwrap();
        assert_eq!(up.synopsis, "A balloon house");
        assert_eq!(up.popularity, 92.2);
    }

    #[test]
    fn test_load_json_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"title": "A", "popularity": 1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"title": "B", "popularity": 2}}"#).unwrap();

        let items = load_catalog(file.path()).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_badly_typed_id_reaches_normalization() {
        let items = parse_catalog(
            r#"[{"id": 1, "title": "A", "popularity": 1.0},
                {"id": 2, "title": "B", "popularity": 2.0},
                {"id": -3, "title": "C", "popularity": 3.0},
                {"id": 1.5, "title": "D", "popularity": 4.0}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 4);
        assert!(items[2].clone().normalize(2).is_err());
        assert!(items[3].clone().normalize(3).is_err());
    }

    #[test]
    fn test_errors_carry_context() {
        let err = parse_catalog("{\"title\": \"A\"}\nnot json").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));

        let err = load_catalog("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("failed to read catalog"));
    }
}
