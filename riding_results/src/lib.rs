/*!
Election results by riding, ready to be drawn on a choropleth map.

The crate turns the rows of a results table (one row per candidate and per
riding) into ridings whose candidates are ranked by number of votes, and
keeps track of the single riding that the map, the search box and the
information panel are currently showing.

```
use riding_results::*;

let row = |cand: &str, votes: &str, pct: &str, party: &str| RawRecord {
    district_id: "1".to_string(),
    district_name: "A".to_string(),
    candidate_name: cand.to_string(),
    vote_count: votes.to_string(),
    vote_percent_text: pct.to_string(),
    party_name: party.to_string(),
};
let districts = load_districts(&[
    row("Y", "50", "30%", "P2"),
    row("X", "100", "60%", "P1"),
    row("Z", "20", "10%", "P3"),
])?;
assert_eq!(winner(&districts[0]).candidate_name, "X");
assert_eq!(total_votes(&districts[0]), VoteCount(170));

let mut selection = SelectionController::new();
selection.select(districts[0].district_id);
assert!(selection.active_district(&districts).is_some());
# Ok::<(), ParseError>(())
```
*/

mod config;

pub mod aggregate;
pub mod map_layer;
pub mod normalize;
pub mod panel;
pub mod party;
pub mod search;
pub mod selection;

pub use crate::aggregate::{aggregate, load_districts};
pub use crate::config::*;
pub use crate::map_layer::{map_layer, DistrictFeature};
pub use crate::normalize::{normalize, ParseError, RecordField};
pub use crate::panel::{
    format_votes, parse_percent, party_domain, total_votes, value_range, winner, Bar,
    FormatError, PanelView, ValueRange,
};
pub use crate::party::{bind, fill_color, short_label, ColorScale};
pub use crate::search::find_district;
pub use crate::selection::{SelectionChange, SelectionController, SelectionError};
