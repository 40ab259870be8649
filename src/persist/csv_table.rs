//! Pure conversions between CSV bytes and rows.
//!
//! This file MUST NOT talk to the object store. Only bytes <-> rows mapping lives here.

use crate::persist::types::{PersistError, PersistResult, QuoteRow, CSV_HEADER};

fn writer() -> csv::Writer<Vec<u8>> {
    // header is written by hand so serialize() never emits a second one
    csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new())
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> PersistResult<Vec<u8>> {
    wtr.into_inner().map_err(|e| PersistError::Io(e.into_error()))
}

/// A fresh day file: canonical header plus one row.
pub fn new_table(row: &QuoteRow) -> PersistResult<Vec<u8>> {
    let mut wtr = writer();
    wtr.write_record(CSV_HEADER)?;
    wtr.serialize(row)?;
    finish(wtr)
}

/// Parse an existing day file, check its header, and re-serialize it with
/// `row` appended. Existing rows are carried over verbatim and in order.
pub fn append_row(key: &str, existing: &[u8], row: &QuoteRow) -> PersistResult<Vec<u8>> {
    let text = std::str::from_utf8(existing)?;
    if text.trim().is_empty() {
        return new_table(row);
    }

    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
    let header = rdr.headers()?.clone();
    if header.iter().ne(CSV_HEADER.iter().copied()) {
        return Err(PersistError::HeaderMismatch {
            key: key.to_string(),
            found: header.iter().map(str::to_string).collect(),
            expected: CSV_HEADER.iter().map(|s| s.to_string()).collect(),
        });
    }

    let mut wtr = writer();
    wtr.write_record(&header)?;
    for record in rdr.records() {
        wtr.write_record(&record?)?;
    }
    wtr.serialize(row)?;
    finish(wtr)
}

pub fn read_rows(bytes: &[u8]) -> PersistResult<Vec<QuoteRow>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let rows = rdr.deserialize().collect::<Result<Vec<QuoteRow>, _>>()?;
    Ok(rows)
}
