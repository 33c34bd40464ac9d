use serde::{Deserialize, Serialize};

use super::LineRef;

/// One (profile, line) pair from `listRemoteDestinationProfile`.
///
/// A profile with several associated lines produces one row per line. A
/// profile with none still produces exactly one row with the line fields
/// empty, so a profile is never silently absent from a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdpRow {
    pub name: String,
    pub description: Option<String>,
    pub device_pool: Option<String>,
    pub calling_search_space: Option<String>,
    pub reroute_calling_search_space: Option<String>,
    pub line_index: Option<u32>,
    pub line_pattern: Option<String>,
    pub line_partition: Option<String>,
}

/// A line slot on a profile: position plus the directory number it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedLine {
    pub index: u32,
    pub line: LineRef,
}

/// Input for `addRemoteDestinationProfile`.
///
/// Profiles are created once per logical mobile endpoint and never
/// updated or deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRemoteDestinationProfile {
    /// Unique across the administrative domain.
    pub name: String,
    pub description: Option<String>,
    /// Owning directory user.
    pub user_id: String,
    pub device_pool: String,
    pub calling_search_space: Option<String>,
    pub reroute_calling_search_space: Option<String>,
    pub line: Option<AssociatedLine>,
}
