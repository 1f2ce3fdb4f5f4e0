use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::normalizing::{normalize, FieldMapping, NormalizeError, RawRow, TransactionBatch};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV file not found: {}", .path.display())]
    InputMissing {
        path: PathBuf,
        source: io::Error,
    },
    #[error("unable to create output file: {}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        source: io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Normalize(#[from] NormalizeError),
    #[error("no transactions loaded, nothing to write")]
    NothingToWrite,
}

/// Reads a headed CSV into raw rows. Rows shorter than the header are kept;
/// the columns they lack read as empty.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut rows: Vec<RawRow> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect());
    }

    debug!("read {} rows, headers={:?}", rows.len(), headers);

    Ok(rows)
}

pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::InputMissing {
        path: path.to_path_buf(),
        source,
    })?;

    read_rows(file)
}

pub fn process_csv(path: impl AsRef<Path>, mapping: &FieldMapping) -> Result<TransactionBatch, DataError> {
    let path = path.as_ref();
    let rows = read_rows_from_path(path)?;
    let batch = normalize(rows, mapping)?;

    info!("normalized {} transactions from {}", batch.len(), path.display());

    Ok(batch)
}

/// Writes the batch with the header `date,description,amount,category`.
pub fn export_csv<W: Write>(batch: &TransactionBatch, writer: W) -> Result<(), DataError> {
    if batch.is_empty() {
        return Err(DataError::NothingToWrite);
    }

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for transaction in batch.transactions() {
        csv_writer.serialize(transaction)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

pub fn write_csv_file(batch: &TransactionBatch, path: impl AsRef<Path>) -> Result<(), DataError> {
    let path = path.as_ref();
    // Checked before the file is created so a refused write leaves nothing on disk.
    if batch.is_empty() {
        return Err(DataError::NothingToWrite);
    }

    let file = File::create(path).map_err(|source| DataError::OutputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    export_csv(batch, file)?;

    info!("wrote {} transactions to {}", batch.len(), path.display());

    Ok(())
}
