//! Player and pairing records produced by the scraper.

use serde::{Deserialize, Serialize};

/// Tournament participant as listed on a Chess-Results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fide_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    /// Lichess username, taken from the repurposed "Club/City" column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lichess: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl Player {
    /// Minimal record carrying only a display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Lichess username if known, otherwise `<Name>`
    pub fn bulk_handle(&self) -> String {
        match &self.lichess {
            Some(username) => username.clone(),
            None => format!("<{}>", self.name),
        }
    }
}

/// One scheduled game, colours already assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub white: Player,
    pub black: Player,
    /// "<round>.<board>" for team events, "<board>" for individual events
    pub board: String,
    /// Black was listed before white in the source row
    pub reversed: bool,
}

/// Source URLs remembered for a bulk pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlayerUrls {
    pub pairings_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players_url: Option<String>,
}
