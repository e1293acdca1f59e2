use crate::config::*;
use crate::panel::winner;
use crate::party::{fill_color, ColorScale};
use crate::selection::SelectionController;

pub const FILL_OPACITY: f64 = 0.8;
pub const STROKE_COLOR: &str = "#333";

/// How a riding is drawn on the map.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DistrictFeature {
    pub district_id: DistrictId,
    pub district_name: String,
    pub winner_party: String,
    pub fill_color: String,
    pub selected: bool,
}

/// Computes the drawing state of every riding, in collection order.
///
/// A riding is filled with the color of the party of its winner. Only the
/// active riding, if any, is marked as selected.
pub fn map_layer(
    districts: &[District],
    scale: &ColorScale,
    parties: &[PartyInfo],
    selection: &SelectionController,
) -> Vec<DistrictFeature> {
    districts
        .iter()
        .map(|d| {
            let w = winner(d);
            DistrictFeature {
                district_id: d.district_id,
                district_name: d.district_name.clone(),
                winner_party: w.party_name.clone(),
                fill_color: fill_color(&w.party_name, scale, parties).to_string(),
                selected: selection.is_active(d.district_id),
            }
        })
        .collect()
}
