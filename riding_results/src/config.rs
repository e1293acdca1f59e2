// ********* Input data structures ***********

use std::fmt::Display;

/// One row of the results table, as produced by the readers.
///
/// All the fields are kept as text: the numeric columns are only
/// interpreted by [`crate::normalize::normalize`].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawRecord {
    pub district_id: String,
    pub district_name: String,
    pub candidate_name: String,
    pub vote_count: String,
    /// The percentage as written in the source, for example `42,3%`.
    pub vote_percent_text: String,
    pub party_name: String,
}

/// The number identifying a riding.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct DistrictId(pub u32);

impl Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A number of votes.
///
/// The normalizer only accepts counts that fit in a `u32`, so that the total
/// of a riding always fits in the `u64`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash, Default)]
pub struct VoteCount(pub u64);

impl Display for VoteCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A [`RawRecord`] whose numeric columns have been checked.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NormalizedRecord {
    pub district_id: DistrictId,
    pub district_name: String,
    pub candidate_name: String,
    pub vote_count: VoteCount,
    pub vote_percent_text: String,
    pub party_name: String,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateResult {
    pub candidate_name: String,
    pub vote_count: VoteCount,
    /// Kept verbatim from the source. See [`crate::panel::parse_percent`].
    pub vote_percent: String,
    pub party_name: String,
}

/// The results of a riding.
///
/// Invariant: `results` is never empty and is sorted by decreasing number of
/// votes. Candidates with the same number of votes keep their order of
/// appearance in the input. The first element is the winner.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct District {
    pub district_id: DistrictId,
    pub district_name: String,
    pub(crate) results: Vec<CandidateResult>,
}

impl District {
    pub fn results(&self) -> &[CandidateResult] {
        &self.results
    }
}

// ********* Configuration **********

/// The display settings of a political party.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartyInfo {
    pub name: String,
    pub abbreviation: String,
    pub color: String,
}

/// Label used on the chart axis for the parties that are not configured.
pub const OTHER_LABEL: &str = "Autre";

/// Fill color of the bars (and ridings) of the parties that are not configured.
pub const FALLBACK_COLOR: &str = "grey";
