//! Persistent storage for form helper state
//!
//! Keeps the Chess-Results URLs last used for each bulk pairing.

pub mod url_store;

pub use url_store::UrlStore;
