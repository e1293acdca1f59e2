use log::debug;
use snafu::Snafu;

use crate::config::*;
use crate::party::{fill_color, short_label, ColorScale};

/// A percentage label that does not look like `42,3%` or `42.3%`.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(display("malformed percentage {raw_value:?}"))]
pub struct FormatError {
    pub raw_value: String,
}

/// Reads a percentage label as written in the results table.
///
/// Both `,` and `.` are accepted as decimal separator and the trailing `%`
/// is optional: `"42,3%"`, `"42.3%"` and `"42"` are all valid.
pub fn parse_percent(percent: &str) -> Result<f64, FormatError> {
    let fail = || FormatError {
        raw_value: percent.to_string(),
    };
    let s = percent.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    let (int_part, frac_part) = match s.find(|c: char| c == ',' || c == '.') {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };
    let all_digits = |x: &str| !x.is_empty() && x.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !frac_part.map(all_digits).unwrap_or(true) {
        return Err(fail());
    }
    let normalized = match frac_part {
        Some(frac) => format!("{}.{}", int_part, frac),
        None => int_part.to_string(),
    };
    normalized.parse::<f64>().map_err(|_| fail())
}

/// The winning candidate of the riding.
pub fn winner(district: &District) -> &CandidateResult {
    // Never empty: aggregation creates a riding with its first row.
    &district.results[0]
}

/// Sum of the votes of all the candidates of the riding.
///
/// Saturates instead of overflowing when a riding was built from counts that
/// did not go through the normalizer.
pub fn total_votes(district: &District) -> VoteCount {
    let total = district
        .results
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.vote_count.0));
    VoteCount(total)
}

/// Bounds of the percentages of a riding, used to scale the bar chart.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

pub fn value_range(district: &District) -> Result<ValueRange, FormatError> {
    let mut range: Option<ValueRange> = None;
    for r in district.results.iter() {
        let x = parse_percent(&r.vote_percent)?;
        range = Some(match range {
            None => ValueRange { min: x, max: x },
            Some(ValueRange { min, max }) => ValueRange {
                min: min.min(x),
                max: max.max(x),
            },
        });
    }
    Ok(range.unwrap_or(ValueRange { min: 0.0, max: 0.0 }))
}

/// The parties of the candidates, in rank order.
pub fn party_domain(district: &District) -> Vec<&str> {
    district
        .results
        .iter()
        .map(|r| r.party_name.as_str())
        .collect()
}

/// Formats a vote count with spaces between groups of thousands.
pub fn format_votes(count: VoteCount) -> String {
    let digits = count.0.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(' ');
        }
        res.push(c);
    }
    res
}

/// One bar of the results chart.
#[derive(PartialEq, Debug, Clone)]
pub struct Bar {
    pub candidate_name: String,
    pub party_name: String,
    pub short_label: String,
    pub color: String,
    pub percent_text: String,
    pub percent: Result<f64, FormatError>,
}

/// Everything the information panel displays for a riding.
///
/// The values that depend on the percentage labels are kept as results, so
/// that a malformed label only affects the parts of the panel that use it.
#[derive(PartialEq, Debug, Clone)]
pub struct PanelView {
    pub district_id: DistrictId,
    /// `<name> [<id>]`
    pub heading: String,
    /// `<candidate> (<party>)`
    pub elected: String,
    pub total_votes: VoteCount,
    pub total_votes_text: String,
    pub value_range: Result<ValueRange, FormatError>,
    pub party_domain: Vec<String>,
    pub bars: Vec<Bar>,
}

impl PanelView {
    pub fn new(district: &District, scale: &ColorScale, parties: &[PartyInfo]) -> PanelView {
        let first = winner(district);
        let total = total_votes(district);
        let bars: Vec<Bar> = district
            .results
            .iter()
            .map(|r| Bar {
                candidate_name: r.candidate_name.clone(),
                party_name: r.party_name.clone(),
                short_label: short_label(&r.party_name, parties).to_string(),
                color: fill_color(&r.party_name, scale, parties).to_string(),
                percent_text: r.vote_percent.clone(),
                percent: parse_percent(&r.vote_percent),
            })
            .collect();
        let view = PanelView {
            district_id: district.district_id,
            heading: format!("{} [{}]", district.district_name, district.district_id),
            elected: format!("{} ({})", first.candidate_name, first.party_name),
            total_votes: total,
            total_votes_text: format_votes(total),
            value_range: value_range(district),
            party_domain: party_domain(district)
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            bars,
        };
        debug!("panel: {:?}", view);
        view
    }

    /// The first percentage error of the panel, if any.
    pub fn format_error(&self) -> Option<&FormatError> {
        self.value_range.as_ref().err()
    }
}
