use log::{debug, info, warn};
use std::collections::HashMap;

use crate::config::*;
use crate::normalize::{normalize, ParseError};

/// Groups the candidate rows by riding.
///
/// The ridings are returned in the order in which they first appear in the
/// input. Within a riding, the candidates are sorted by decreasing number of
/// votes; candidates with the same count keep their relative input order.
///
/// The name of a riding is the one of its first row. Rows that carry another
/// name for the same id are still merged, and the mismatch is logged.
pub fn aggregate(rows: &[NormalizedRecord]) -> Vec<District> {
    // Position of each riding in the output.
    let mut positions: HashMap<DistrictId, usize> = HashMap::new();
    let mut districts: Vec<District> = Vec::new();

    for row in rows.iter() {
        let result = CandidateResult {
            candidate_name: row.candidate_name.clone(),
            vote_count: row.vote_count,
            vote_percent: row.vote_percent_text.clone(),
            party_name: row.party_name.clone(),
        };
        match positions.get(&row.district_id) {
            Some(&idx) => {
                let district = &mut districts[idx];
                if district.district_name != row.district_name {
                    warn!(
                        "aggregate: riding {} is named both {:?} and {:?}, keeping the first one",
                        row.district_id, district.district_name, row.district_name
                    );
                }
                district.results.push(result);
            }
            None => {
                debug!(
                    "aggregate: new riding {}: {:?}",
                    row.district_id, row.district_name
                );
                positions.insert(row.district_id, districts.len());
                districts.push(District {
                    district_id: row.district_id,
                    district_name: row.district_name.clone(),
                    results: vec![result],
                });
            }
        }
    }

    for district in districts.iter_mut() {
        // sort_by is stable.
        district
            .results
            .sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
    }

    info!(
        "aggregate: {:?} rows grouped into {:?} ridings",
        rows.len(),
        districts.len()
    );
    districts
}

/// Normalizes then aggregates the rows of a results table.
///
/// A single malformed row fails the whole load.
pub fn load_districts(rows: &[RawRecord]) -> Result<Vec<District>, ParseError> {
    let normalized = normalize(rows)?;
    Ok(aggregate(&normalized))
}
