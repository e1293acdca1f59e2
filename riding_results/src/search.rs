use log::debug;

use crate::config::*;

/// Finds the riding designated by a search query.
///
/// A query made only of digits is a riding number. Any other query is
/// compared with the riding names, ignoring case and surrounding spaces.
/// The first match in collection order is returned.
pub fn find_district(query: &str, districts: &[District]) -> Option<DistrictId> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }
    let by_id = q
        .parse::<u32>()
        .ok()
        .map(DistrictId)
        .filter(|id| districts.iter().any(|d| d.district_id == *id));
    let res = by_id.or_else(|| {
        let needle = q.to_lowercase();
        districts
            .iter()
            .find(|d| d.district_name.trim().to_lowercase() == needle)
            .map(|d| d.district_id)
    });
    debug!("find_district: {:?} -> {:?}", query, res);
    res
}
