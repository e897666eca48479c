use csv::StringRecord;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    num::IntErrorKind,
    path::Path,
};
use tracing::{debug, info, warn};

use crate::error::{Result, RowParseError, ZipError};

#[derive(Debug, PartialEq, Clone)]
pub struct ZipRecord {
    pub code: i32,
    pub place: String,
    pub state: String,
    pub county: String,
    pub latitude: f64,
    pub longitude: f64,
}

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Vec<ZipRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ZipError::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;

    read_records(file)
}

/// Reads `code,place,state,county,latitude,longitude` rows after a header line.
///
/// The first line is always the header, even when it is blank. Rows that fail
/// to parse are logged and dropped; only an I/O failure on the underlying
/// reader is returned as an error.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ZipRecord>> {
    let mut reader = BufReader::new(reader);
    let mut header = Vec::new();
    reader
        .read_until(b'\n', &mut header)
        .map_err(|err| ZipError::Read(csv::Error::from(err)))?;

    // Quoting is off: a quote character is just part of the field text.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(ZipError::Read(err)),
            Err(err) => {
                warn!("skipping unreadable row: {}", err);
                skipped += 1;
                continue;
            }
        };

        // Positions count from the line after the header.
        let line = row.position().map(|p| p.line() + 1).unwrap_or_default();
        debug!(line, code = row.get(0).unwrap_or(""), "reading zip code");

        match parse_row(&row) {
            Ok(record) => {
                debug!(line, place = %record.place, county = %record.county, "loaded record");
                records.push(record);
            }
            Err(reason) => {
                warn!(line, %reason, "skipping row");
                skipped += 1;
            }
        }
    }

    info!(loaded = records.len(), skipped, "finished loading records");
    Ok(records)
}

/// Builds a record from one row. Missing trailing fields read as empty.
pub fn parse_row(row: &StringRecord) -> std::result::Result<ZipRecord, RowParseError> {
    let field = |i: usize| row.get(i).unwrap_or("");

    let code = parse_code(field(0))?;
    let place = field(1).to_owned();
    let state = field(2).to_owned();
    let county = field(3).to_owned();
    let latitude = parse_coordinate("latitude", field(4))?;
    let longitude = parse_coordinate("longitude", field(5))?;

    Ok(ZipRecord {
        code,
        place,
        state,
        county,
        latitude,
        longitude,
    })
}

fn parse_code(raw: &str) -> std::result::Result<i32, RowParseError> {
    if raw.is_empty() {
        return Err(RowParseError::EmptyKeyField);
    }

    raw.trim().parse::<i32>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RowParseError::CodeOutOfRange {
            value: raw.to_owned(),
        },
        _ => RowParseError::InvalidCode {
            value: raw.to_owned(),
        },
    })
}

fn parse_coordinate(field: &'static str, raw: &str) -> std::result::Result<f64, RowParseError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| RowParseError::InvalidCoordinate {
            field,
            value: raw.to_owned(),
        })
}
