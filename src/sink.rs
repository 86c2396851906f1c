use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::record::{HEADER, MatchRecord};

/// Append-only CSV output; one `append` call per processed date.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn open(path: &Path, write_header: bool) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open output {}", path.display()))?;
        let is_empty = file
            .metadata()
            .with_context(|| format!("stat output {}", path.display()))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if write_header && is_empty {
            writer.write_record(HEADER).context("write csv header")?;
            writer.flush().context("flush csv header")?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, records: &[MatchRecord]) -> Result<usize> {
        for record in records {
            self.writer
                .write_record(record.fields())
                .with_context(|| format!("write row to {}", self.path.display()))?;
        }
        self.writer
            .flush()
            .with_context(|| format!("flush {}", self.path.display()))?;
        Ok(records.len())
    }
}
