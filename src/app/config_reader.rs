use crate::app::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// An entry of the party configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyConfig {
    pub name: String,
    /// The label of the bar chart axis. Older files call it `shortName`.
    #[serde(rename = "abbreviation", alias = "shortName")]
    pub short_name: String,
    pub color: String,
}

impl From<PartyConfig> for PartyInfo {
    fn from(p: PartyConfig) -> PartyInfo {
        PartyInfo {
            name: p.name,
            abbreviation: p.short_name,
            color: p.color,
        }
    }
}

pub fn read_parties(path: &str) -> AppResult<Vec<PartyInfo>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let configs: Vec<PartyConfig> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_parties: {:?}", configs);
    info!("Read {} parties from {:?}", configs.len(), path);
    Ok(configs.into_iter().map(PartyInfo::from).collect())
}

pub fn read_reference(path: &str) -> AppResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
