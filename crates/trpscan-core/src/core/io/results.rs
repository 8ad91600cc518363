use crate::core::models::contact::ContactRecord;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only writer for contact rows.
///
/// Rows are written as headerless CSV in the column order of [`ContactRecord`].
/// The sink is the only writer of its output, so rows never interleave.
pub struct ContactSink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl<W: Write> ContactSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(writer),
            rows_written: 0,
        }
    }

    pub fn write(&mut self, record: &ContactRecord) -> Result<(), ResultsError> {
        self.writer.serialize(record)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_all<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a ContactRecord>,
    ) -> Result<usize, ResultsError> {
        let mut count = 0;
        for record in records {
            self.write(record)?;
            count += 1;
        }
        Ok(count)
    }

    pub fn flush(&mut self) -> Result<(), ResultsError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, ResultsError> {
        self.writer
            .into_inner()
            .map_err(|e| ResultsError::Io(e.into_error()))
    }
}

impl ContactSink<File> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> Result<Self, ResultsError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    /// Creates `path`, discarding any previous content.
    pub fn create(path: &Path) -> Result<Self, ResultsError> {
        Ok(Self::new(File::create(path)?))
    }
}

/// Renders records as the lines they would occupy in the result table.
pub fn to_csv_string(records: &[ContactRecord]) -> Result<String, ResultsError> {
    let mut sink = ContactSink::new(Vec::new());
    sink.write_all(records)?;
    let bytes = sink.into_inner()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::ModelId;
    use std::fs;
    use tempfile::tempdir;

    fn record(model_id: ModelId, successor_index: Option<usize>) -> ContactRecord {
        ContactRecord {
            structure_id: "1abc".to_string(),
            model_id,
            chain: 'A',
            query_index: 12,
            neighbor_name: "OG".to_string(),
            neighbor_serial: 50,
            successor_index,
        }
    }

    #[test]
    fn records_serialize_as_seven_headerless_columns() {
        let text = to_csv_string(&[
            record(ModelId::NotApplicable, None),
            record(ModelId::Numbered(3), Some(14)),
        ])
        .unwrap();
        assert_eq!(text, "1abc,NA,A,12,OG,50,NA\n1abc,3,A,12,OG,50,14\n");
    }

    #[test]
    fn append_extends_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("donor_residue_info.csv");

        let mut sink = ContactSink::append(&path).unwrap();
        sink.write(&record(ModelId::NotApplicable, None)).unwrap();
        sink.flush().unwrap();
        drop(sink);

        let mut sink = ContactSink::append(&path).unwrap();
        sink.write(&record(ModelId::Numbered(0), None)).unwrap();
        assert_eq!(sink.rows_written(), 1);
        sink.flush().unwrap();
        drop(sink);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.lines().nth(1).unwrap().starts_with("1abc,0,"));
    }

    #[test]
    fn create_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale\n").unwrap();

        let mut sink = ContactSink::create(&path).unwrap();
        assert_eq!(sink.write_all([&record(ModelId::NotApplicable, None)]).unwrap(), 1);
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&path).unwrap(), "1abc,NA,A,12,OG,50,NA\n");
    }
}
