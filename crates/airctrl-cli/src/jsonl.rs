//! JSON Lines input and output.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// Read every non-blank line of `path` as a `T`.
///
/// Returns `(line_number, value)` pairs; line numbers start at 1.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<(usize, T)>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = serde_json::from_str(trimmed)
            .map_err(|e| CliError::invalid_record(path, index + 1, e.to_string()))?;
        records.push((index + 1, value));
    }

    Ok(records)
}

/// Buffered JSON Lines writer.
pub struct JsonlWriter<W: Write> {
    inner: BufWriter<W>,
    written: usize,
}

impl JsonlWriter<File> {
    /// Create (or truncate) `path`.
    pub fn create(path: &Path) -> CliResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
            written: 0,
        }
    }

    pub fn write<T: Serialize>(&mut self, value: &T) -> CliResult<()> {
        serde_json::to_writer(&mut self.inner, value)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> CliResult<usize> {
        self.inner.flush()?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airctrl_models::FacialFeatures;

    #[test]
    fn test_round_trip_skips_blank_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut writer = JsonlWriter::create(file.path()).unwrap();
        writer.write(&FacialFeatures::new(0.1, 0.2, 0.0, 0.0)).unwrap();
        writer.write(&FacialFeatures::new(0.3, 0.2, 0.0, 0.0)).unwrap();
        assert_eq!(writer.finish().unwrap(), 2);

        let mut contents = std::fs::read_to_string(file.path()).unwrap();
        contents.insert(0, '\n');
        std::fs::write(file.path(), contents).unwrap();

        let records: Vec<(usize, FacialFeatures)> = read_jsonl(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 2);
        assert_eq!(records[1].1.mouth_openness, 0.3);
    }

    #[test]
    fn test_bad_line_reports_position() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            concat!(
                r#"{"mouth_openness": 0.1, "eye_openness": 0.02, "eyebrow_raise": 0.0, "smile_lift": 0.0}"#,
                "\n{oops}\n"
            ),
        )
        .unwrap();

        let err = read_jsonl::<FacialFeatures>(file.path()).unwrap_err();
        match err {
            CliError::InvalidRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
