use serde::{Deserialize, Serialize};

/// A directory number reference: route pattern plus its partition.
///
/// Used everywhere a line is named without being fetched: the user's
/// primary extension, profile line associations, and search criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRef {
    pub pattern: String,
    pub route_partition: String,
}

impl LineRef {
    pub fn new(pattern: impl Into<String>, route_partition: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            route_partition: route_partition.into(),
        }
    }
}

/// A directory user as returned by `getUser`.
///
/// `remote_destination_profiles` holds the names of associated Remote
/// Destination Profiles. The server encodes these under two alternative
/// child tag spellings depending on version; both are merged into this
/// one list, and a user with no association element yields an empty list
/// rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndUser {
    pub user_id: String,
    pub enable_mobility: bool,
    pub max_desk_pickup_wait: Option<u32>,
    pub remote_destination_limit: Option<u32>,
    /// Pattern and partition of the user's primary extension, read from
    /// the nested `primaryExtension` element.
    pub primary_extension: Option<LineRef>,
    pub remote_destination_profiles: Vec<String>,
}

/// Fields written by `updateUser` when enabling Single Number Reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobilityUpdate {
    pub enable_mobility: bool,
    /// Milliseconds a call keeps ringing the desk after the mobile answers.
    pub max_desk_pickup_wait: u32,
    pub remote_destination_limit: u32,
}
