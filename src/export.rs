use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::ExportFormat;

/// Writes store-rendered export blobs to the local export directory.
/// Filenames follow the fixed `forex_signals.<ext>` pattern; a fresh export
/// overwrites the previous one.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn file_name(format: ExportFormat) -> String {
        format!("forex_signals.{}", format.extension())
    }

    pub fn save(&self, format: ExportFormat, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create export dir {}", self.dir.display()))?;

        let path = self.dir.join(Self::file_name(format));
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_export_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("signal_dash_export_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn file_name_follows_pattern() {
        assert_eq!(Exporter::file_name(ExportFormat::Csv), "forex_signals.csv");
        assert_eq!(Exporter::file_name(ExportFormat::Json), "forex_signals.json");
    }

    #[test]
    fn save_creates_dir_and_writes_bytes() {
        let dir = temp_export_dir("save");
        let exporter = Exporter::new(&dir);

        let path = exporter
            .save(ExportFormat::Csv, b"symbol,action\nEURUSD,BUY\n")
            .unwrap();
        assert_eq!(path, dir.join("forex_signals.csv"));
        let written = fs::read(&path).unwrap();
        assert_eq!(written, b"symbol,action\nEURUSD,BUY\n");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn save_overwrites_previous_export() {
        let dir = temp_export_dir("overwrite");
        let exporter = Exporter::new(&dir);

        exporter.save(ExportFormat::Json, b"[1]").unwrap();
        let path = exporter.save(ExportFormat::Json, b"[1,2]").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"[1,2]");

        fs::remove_dir_all(&dir).ok();
    }
}
