//! HTML parsers for Chess-Results report pages.

pub mod pairings;
pub mod players;

pub use pairings::{format_pairing_lines, parse_pairings, Layout, PairingsParser};
pub use players::{parse_players, PlayerListParser};
