use serde::{Deserialize, Serialize};

use super::LineRef;

/// A phone device, read-only in this crate (discovery only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    pub name: String,
    pub description: Option<String>,
    pub owner_user_name: Option<String>,
    pub calling_search_space: Option<String>,
    pub lines: Vec<PhoneLine>,
}

/// A line appearance on a phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneLine {
    pub index: Option<u32>,
    pub pattern: String,
    pub route_partition: Option<String>,
    pub calling_search_space: Option<String>,
}

/// A directory number as returned by `getLine`, with the device names it
/// appears on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub pattern: String,
    pub route_partition: Option<String>,
    pub description: Option<String>,
    pub calling_search_space: Option<String>,
    pub associated_devices: Vec<String>,
}

/// Filters for the composite phone search.
///
/// The line filter and the substring filters trigger independent queries
/// whose results are unioned; substring matching is case-insensitive and
/// all provided substrings must match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneSearch {
    pub line: Option<LineRef>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub name: Option<String>,
    /// Cap on how many matches are expanded to full detail.
    pub limit: usize,
}

impl Default for PhoneSearch {
    fn default() -> Self {
        Self {
            line: None,
            description: None,
            owner: None,
            name: None,
            limit: 25,
        }
    }
}

/// Search outcome. `truncated` is set whenever `limit` cut the candidate
/// set, so a partial result is never mistaken for a complete one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneSearchResult {
    pub phones: Vec<Phone>,
    pub truncated: bool,
}
