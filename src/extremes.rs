use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
};
use tracing::info;

use crate::error::{Result, UnrecognizedSortField, ZipError};
use crate::records::ZipRecord;

pub type StateCode = String;

pub const SUMMARY_HEADER: &str = "State, Easternmost, Westernmost, Northernmost, Southernmost";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Code,
    PlaceName,
    State,
    Latitude,
    Longitude,
}

impl SortKey {
    pub const NAMES: [&'static str; 5] = ["code", "place name", "state", "latitude", "longitude"];

    fn compare(self, a: &ZipRecord, b: &ZipRecord) -> Ordering {
        match self {
            SortKey::Code => a.code.cmp(&b.code),
            SortKey::PlaceName => a.place.cmp(&b.place),
            SortKey::State => a.state.cmp(&b.state),
            SortKey::Latitude => numeric_cmp(a.latitude, b.latitude),
            SortKey::Longitude => numeric_cmp(a.longitude, b.longitude),
        }
    }
}

/// Total order on coordinates where `-0.0` and `0.0` compare equal.
fn numeric_cmp(a: f64, b: f64) -> Ordering {
    // Adding positive zero turns -0.0 into 0.0 and leaves everything else alone.
    (a + 0.0).total_cmp(&(b + 0.0))
}

impl FromStr for SortKey {
    type Err = UnrecognizedSortField;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "code" => Ok(SortKey::Code),
            "place name" => Ok(SortKey::PlaceName),
            "state" => Ok(SortKey::State),
            "latitude" => Ok(SortKey::Latitude),
            "longitude" => Ok(SortKey::Longitude),
            _ => Err(UnrecognizedSortField(s.to_owned())),
        }
    }
}

/// Stable ascending sort of a copy of `records`.
pub fn sort_records(records: &[ZipRecord], key: SortKey) -> Vec<ZipRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// The four extreme records seen so far for one state.
///
/// East is the smallest longitude and west the largest, matching how the
/// summary has always been labelled.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct StateExtremes {
    pub east: Option<ZipRecord>,
    pub west: Option<ZipRecord>,
    pub north: Option<ZipRecord>,
    pub south: Option<ZipRecord>,
}

impl StateExtremes {
    /// Offers a record to every slot. Ties keep the earlier occupant.
    pub fn offer(&mut self, record: &ZipRecord) {
        replace_if(&mut self.east, record, |new, cur| new.longitude < cur.longitude);
        replace_if(&mut self.west, record, |new, cur| new.longitude > cur.longitude);
        replace_if(&mut self.north, record, |new, cur| new.latitude > cur.latitude);
        replace_if(&mut self.south, record, |new, cur| new.latitude < cur.latitude);
    }

    pub fn codes(&self) -> [Option<i32>; 4] {
        [&self.east, &self.west, &self.north, &self.south].map(|slot| slot.as_ref().map(|r| r.code))
    }
}

fn replace_if<F>(slot: &mut Option<ZipRecord>, record: &ZipRecord, more_extreme: F)
where
    F: Fn(&ZipRecord, &ZipRecord) -> bool,
{
    if slot.as_ref().map_or(true, |current| more_extreme(record, current)) {
        *slot = Some(record.clone());
    }
}

#[derive(Debug, PartialEq)]
pub struct Aggregation {
    /// The records in the order they were scanned.
    pub records: Vec<ZipRecord>,
    pub extremes: BTreeMap<StateCode, StateExtremes>,
}

pub fn aggregate(records: &[ZipRecord], sort: Option<SortKey>) -> Aggregation {
    let records = match sort {
        Some(key) => sort_records(records, key),
        None => records.to_vec(),
    };

    let mut extremes: BTreeMap<StateCode, StateExtremes> = BTreeMap::new();
    for record in &records {
        extremes
            .entry(record.state.clone())
            .or_default()
            .offer(record);
    }

    info!(
        records = records.len(),
        states = extremes.len(),
        ?sort,
        "aggregated state extremes"
    );

    Aggregation { records, extremes }
}

pub fn write_summary<W: Write>(
    extremes: &BTreeMap<StateCode, StateExtremes>,
    mut writer: W,
) -> std::io::Result<()> {
    writeln!(writer, "{}", SUMMARY_HEADER)?;
    for (state, slots) in extremes {
        let codes = slots.codes().map(|code| code.map(|c| c.to_string()).unwrap_or_default());
        writeln!(writer, "{}, {}", state, codes.join(", "))?;
    }
    writer.flush()
}

pub fn write_summary_file<P: AsRef<Path>>(
    extremes: &BTreeMap<StateCode, StateExtremes>,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ZipError::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;

    write_summary(extremes, BufWriter::new(file))?;
    Ok(())
}
