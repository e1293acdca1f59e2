// Primitives for reading CSV files.

use crate::app::{io_common::ColumnIndex, *};
use csv::StringRecord;
use serde::Deserialize;

/// A line of the results table, keyed by the column names of the header.
#[derive(Debug, Deserialize)]
struct ResultRow {
    #[serde(rename = "id")]
    district_id: String,
    #[serde(rename = "name")]
    district_name: String,
    #[serde(rename = "candidate")]
    candidate_name: String,
    #[serde(rename = "votes")]
    vote_count: String,
    #[serde(rename = "percent")]
    vote_percent_text: String,
    #[serde(rename = "party")]
    party_name: String,
}

impl From<ResultRow> for RawRecord {
    fn from(row: ResultRow) -> RawRecord {
        RawRecord {
            district_id: row.district_id,
            district_name: row.district_name,
            candidate_name: row.candidate_name,
            vote_count: row.vote_count,
            vote_percent_text: row.vote_percent_text,
            party_name: row.party_name,
        }
    }
}

/// Reads the results table. The columns are found by name in the first line,
/// in any order and regardless of case; the other columns are ignored.
pub fn read_csv_results(path: &str) -> AppResult<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;

    let header: StringRecord = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1usize })?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    debug!("read_csv_results: header: {:?}", header);
    ensure!(!header.is_empty(), EmptyTableSnafu { path });
    let header_cells: Vec<&str> = header.iter().collect();
    ColumnIndex::from_header(&header_cells)?;

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_results: lineno: {:?} row: {:?}", lineno, &line);
        let row: ResultRow = line
            .deserialize(Some(&header))
            .context(CsvLineParseSnafu { lineno })?;
        res.push(row.into());
    }
    info!("Read {} rows from {:?}", res.len(), path);
    Ok(res)
}
