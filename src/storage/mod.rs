//! Crawl result persistence.
//!
//! Results are written as pretty JSON:
//!
//! ```text
//! {
//!   "wordCounts": { "most": 12, "popular": 9 },
//!   "urlsVisited": 4
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::CrawlResult;

/// Writes a [`CrawlResult`] to a file or any writer.
pub struct ResultWriter<'a> {
    result: &'a CrawlResult,
}

impl<'a> ResultWriter<'a> {
    pub fn new(result: &'a CrawlResult) -> Self {
        Self { result }
    }

    /// Write to `path`, replacing it atomically (write to temp, then rename).
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        self.write_to(&mut file)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp, path)?;
        log::info!("Crawl result written to {}", path.display());
        Ok(())
    }

    /// Write to an open writer. The writer is not closed.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self.result)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn sample() -> CrawlResult {
        let mut counts = IndexMap::new();
        counts.insert("zebra".to_string(), 9);
        counts.insert("apple".to_string(), 4);
        counts.insert("mango".to_string(), 4);
        CrawlResult::new(counts, 7)
    }

    #[test]
    fn test_json_preserves_rank_order() {
        let mut buf = Vec::new();
        ResultWriter::new(&sample()).write_to(&mut buf).unwrap();
        let json = String::from_utf8(buf).unwrap();

        let zebra = json.find("zebra").unwrap();
        let apple = json.find("apple").unwrap();
        let mango = json.find("mango").unwrap();
        assert!(zebra < apple && apple < mango);
        assert!(json.contains("\"wordCounts\""));
        assert!(json.contains("\"urlsVisited\": 7"));
    }

    #[test]
    fn test_write_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("result.json");

        ResultWriter::new(&sample()).write_path(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: CrawlResult = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, sample());
        let order: Vec<&String> = parsed.word_counts().keys().collect();
        assert_eq!(order, ["zebra", "apple", "mango"]);
        assert!(!path.with_extension("tmp").exists());
    }
}
