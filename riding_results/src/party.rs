use log::{debug, warn};
use std::collections::HashMap;

use crate::config::*;

/// Association from party names to fill colors.
///
/// An empty scale knows no party. Names that were not bound have no color.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ColorScale {
    colors: HashMap<String, String>,
    // Bound names, in configuration order.
    domain: Vec<String>,
}

impl ColorScale {
    pub fn new() -> ColorScale {
        ColorScale::default()
    }

    /// The color configured for this party, if any.
    pub fn color(&self, party_name: &str) -> Option<&str> {
        self.colors.get(party_name).map(|c| c.as_str())
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Configures the scale with the colors of the given parties.
///
/// Any previous content of the scale is replaced. When a name appears more
/// than once, the first entry is kept.
pub fn bind(scale: &mut ColorScale, parties: &[PartyInfo]) {
    scale.colors.clear();
    scale.domain.clear();
    for party in parties.iter() {
        if scale.colors.contains_key(&party.name) {
            warn!(
                "bind: party {:?} is configured more than once, ignoring color {:?}",
                party.name, party.color
            );
            continue;
        }
        scale
            .colors
            .insert(party.name.clone(), party.color.clone());
        scale.domain.push(party.name.clone());
    }
    debug!("bind: color domain: {:?}", scale.domain);
}

/// The abbreviation of the party, or [`OTHER_LABEL`] if it is not configured.
pub fn short_label<'a>(party_name: &str, parties: &'a [PartyInfo]) -> &'a str {
    parties
        .iter()
        .find(|p| p.name == party_name)
        .map(|p| p.abbreviation.as_str())
        .unwrap_or(OTHER_LABEL)
}

/// The color used to draw a candidate of this party.
///
/// The parties without a configured abbreviation are drawn in
/// [`FALLBACK_COLOR`], whatever the scale says about them.
pub fn fill_color<'a>(
    party_name: &str,
    scale: &'a ColorScale,
    parties: &[PartyInfo],
) -> &'a str {
    if short_label(party_name, parties) == OTHER_LABEL {
        return FALLBACK_COLOR;
    }
    scale.color(party_name).unwrap_or(FALLBACK_COLOR)
}
