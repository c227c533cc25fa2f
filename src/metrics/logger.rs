use super::TableRow;
use anyhow::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub struct TableLogger {
    writer: Writer<File>,
}

impl TableLogger {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_batch(&mut self, rows: &[TableRow]) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
