use log::debug;
use snafu::Snafu;
use std::fmt::Display;

use crate::config::*;

/// The numeric columns of a [`RawRecord`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RecordField {
    DistrictId,
    VoteCount,
}

impl Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordField::DistrictId => write!(f, "district id"),
            RecordField::VoteCount => write!(f, "vote count"),
        }
    }
}

/// A numeric column could not be read as a non-negative integer.
///
/// `row` is the 1-based position of the record in the batch.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(display("row {row}: invalid {field}: {raw_value:?} is not a non-negative integer"))]
pub struct ParseError {
    pub field: RecordField,
    pub raw_value: String,
    pub row: usize,
}

/// Checks the numeric columns of all the records.
///
/// The batch is rejected as a whole as soon as one record is malformed.
/// The other columns are copied as they are and the order is preserved.
pub fn normalize(rows: &[RawRecord]) -> Result<Vec<NormalizedRecord>, ParseError> {
    debug!("normalize: {:?} rows", rows.len());
    rows.iter()
        .enumerate()
        .map(|(idx, row)| normalize_record(idx + 1, row))
        .collect()
}

fn normalize_record(row: usize, raw: &RawRecord) -> Result<NormalizedRecord, ParseError> {
    let district_id = parse_integer(&raw.district_id)
        .and_then(|x| u32::try_from(x).ok())
        .map(DistrictId)
        .ok_or_else(|| ParseError {
            field: RecordField::DistrictId,
            raw_value: raw.district_id.clone(),
            row,
        })?;
    let vote_count = parse_integer(&raw.vote_count)
        .and_then(|x| u32::try_from(x).ok())
        .map(|x| VoteCount(x.into()))
        .ok_or_else(|| ParseError {
            field: RecordField::VoteCount,
            raw_value: raw.vote_count.clone(),
            row,
        })?;
    Ok(NormalizedRecord {
        district_id,
        district_name: raw.district_name.clone(),
        candidate_name: raw.candidate_name.clone(),
        vote_count,
        vote_percent_text: raw.vote_percent_text.clone(),
        party_name: raw.party_name.clone(),
    })
}

// Only plain decimal digits: no sign, no separator, no fraction.
// The padding that spreadsheet exports put around cells is accepted.
fn parse_integer(s: &str) -> Option<u64> {
    let digits = s.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok()
}
