//! Column names of the reading schema
//!
//! Names are lowercase. Storage backends are free to use any casing;
//! [`crate::schema::prepare`] folds names to lowercase before matching.

pub const ID: &str = "id";
pub const TIMESTAMP: &str = "timestamp";
pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const LIGHT: &str = "light";
pub const BTN_P: &str = "btn_p";
pub const BTN_K: &str = "btn_k";
pub const RELAY_STATUS: &str = "relay_status";
