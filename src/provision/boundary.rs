//! Collaborator seams.
//!
//! Two external collaborators drive or accompany provisioning but are
//! not implemented here: the calling-system voice-enablement capability
//! (a vendor module with its own failure domain) and the batch row
//! source feeding multi-user runs. Only their shapes live in this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ProvisionRequest;
use crate::models::LineRef;

/// Phone-number classification on the calling-system side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberType {
    DirectRouting,
    CallingPlan,
    OperatorConnect,
}

/// Parameters for enabling voice on the calling-system side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceEnablementRequest {
    pub identity: String,
    pub e164_number: String,
    pub number_type: NumberType,
    pub dial_plan_policy: Option<String>,
    pub voice_routing_policy: Option<String>,
    pub calling_policy: Option<String>,
    pub voicemail_policy: Option<String>,
}

/// Confirmation record returned by the capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfirmation {
    pub identity: String,
    pub enabled: bool,
    pub detail: Option<String>,
}

#[derive(Debug, Error)]
#[error("voice enablement failed: {0}")]
pub struct VoiceError(pub String);

/// The vendor-supplied voice-enablement capability. Opaque to this
/// crate: one call per user, never retried or compensated here.
#[async_trait]
pub trait VoiceEnablement {
    async fn enable(
        &self,
        request: &VoiceEnablementRequest,
    ) -> Result<VoiceConfirmation, VoiceError>;
}

/// One row from a batch source: the fields needed to drive both the
/// provisioning workflow and the voice-enablement call for one user.
///
/// Rows touching a shared line, partition or CSS must be driven
/// serially; the server risks lost updates under concurrent writers to
/// the same object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionRow {
    pub user_id: String,
    pub mobile_number: String,
    pub desk_pattern: String,
    pub desk_partition: String,
    pub device_pool: String,
    pub calling_search_space: Option<String>,
    pub reroute_calling_search_space: Option<String>,
    pub mobility_calling_search_space: Option<String>,
    pub e164_number: String,
    pub number_type: NumberType,
    pub dial_plan_policy: Option<String>,
    pub voice_routing_policy: Option<String>,
    pub calling_policy: Option<String>,
    pub voicemail_policy: Option<String>,
}

impl From<&ProvisionRow> for ProvisionRequest {
    fn from(row: &ProvisionRow) -> Self {
        let mut request = ProvisionRequest::new(
            row.user_id.clone(),
            row.mobile_number.clone(),
            LineRef::new(row.desk_pattern.clone(), row.desk_partition.clone()),
            row.device_pool.clone(),
        );
        request.calling_search_space = row.calling_search_space.clone();
        request.reroute_calling_search_space = row.reroute_calling_search_space.clone();
        request.mobility_calling_search_space = row.mobility_calling_search_space.clone();
        request
    }
}

impl From<&ProvisionRow> for VoiceEnablementRequest {
    fn from(row: &ProvisionRow) -> Self {
        Self {
            identity: row.user_id.clone(),
            e164_number: row.e164_number.clone(),
            number_type: row.number_type,
            dial_plan_policy: row.dial_plan_policy.clone(),
            voice_routing_policy: row.voice_routing_policy.clone(),
            calling_policy: row.calling_policy.clone(),
            voicemail_policy: row.voicemail_policy.clone(),
        }
    }
}
