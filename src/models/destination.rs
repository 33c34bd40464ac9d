use serde::{Deserialize, Serialize};

use super::LineRef;

/// A remote destination as returned by `listRemoteDestination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDestination {
    pub name: Option<String>,
    /// The mobile number calls are extended to.
    pub destination: String,
    /// Name of the owning Remote Destination Profile.
    pub profile: Option<String>,
}

/// Input for `addRemoteDestination`.
///
/// Timer values are in milliseconds. `new` fills the stock Single Number
/// Reach defaults; callers override fields afterwards when a deployment
/// needs different ring behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRemoteDestination {
    /// Unique across the administrative domain.
    pub name: String,
    pub destination: String,
    /// Must name an existing Remote Destination Profile.
    pub profile: String,
    pub mobility_calling_search_space: Option<String>,
    /// A mobile answer faster than this is treated as voicemail pickup.
    pub answer_too_soon_timer: u32,
    pub answer_too_late_timer: u32,
    pub delay_before_ringing: u32,
    pub is_mobile_phone: bool,
    pub enable_unified_mobility: bool,
    pub enable_mobile_connect: bool,
    pub line: Option<LineRef>,
}

impl NewRemoteDestination {
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            profile: profile.into(),
            mobility_calling_search_space: None,
            answer_too_soon_timer: 1500,
            answer_too_late_timer: 19000,
            delay_before_ringing: 4000,
            is_mobile_phone: true,
            enable_unified_mobility: true,
            enable_mobile_connect: true,
            line: None,
        }
    }
}
