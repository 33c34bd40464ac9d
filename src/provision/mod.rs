//! Provisioning and verification workflows for Single Number Reach.
//!
//! The server gives no transactional guarantee across the three writes a
//! provisioning run needs, and a step's reported verdict does not
//! reliably predict whether the next step's precondition actually holds
//! (a duplicate-name fault usually means the resource already exists).
//! The workflow therefore runs every step best-effort, records each
//! outcome, and ends with an authoritative read-back of live state —
//! echoed write responses are never trusted as ground truth.

pub mod boundary;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::axl::{AxlClient, AxlError};
use crate::models::{
    AssociatedLine, EndUser, LineRef, MobilityUpdate, NewRemoteDestination,
    NewRemoteDestinationProfile, RdpRow, RemoteDestination,
};

/// Deterministic name for a user's Single Number Reach profile. Also the
/// verification fallback when the user record does not show the
/// association yet.
pub fn rdp_name(user_id: &str) -> String {
    format!("RDP_Teams_{user_id}")
}

/// Deterministic name for the remote destination under that profile.
pub fn rd_name(user_id: &str) -> String {
    format!("RD_{user_id}_test")
}

/// Everything needed to provision one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionRequest {
    pub user_id: String,
    /// The mobile number calls are extended to.
    pub mobile_number: String,
    /// The user's desk line, associated with the new profile.
    pub desk_line: LineRef,
    pub device_pool: String,
    pub calling_search_space: Option<String>,
    pub reroute_calling_search_space: Option<String>,
    pub mobility_calling_search_space: Option<String>,
    pub max_desk_pickup_wait: u32,
    pub remote_destination_limit: u32,
}

impl ProvisionRequest {
    pub fn new(
        user_id: impl Into<String>,
        mobile_number: impl Into<String>,
        desk_line: LineRef,
        device_pool: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            mobile_number: mobile_number.into(),
            desk_line,
            device_pool: device_pool.into(),
            calling_search_space: None,
            reroute_calling_search_space: None,
            mobility_calling_search_space: None,
            max_desk_pickup_wait: 10000,
            remote_destination_limit: 4,
        }
    }
}

/// One step of the provisioning workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStep {
    EnableMobility,
    CreateProfile,
    ApplyLine,
    CreateDestination,
    Verify,
}

/// Furthest point the workflow has confirmed. Advanced only by step
/// successes; a failed step leaves it where it was while later steps
/// still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionState {
    Init,
    MobilityEnabled,
    ProfileCreated,
    DestinationCreated,
    Verified,
}

/// Outcome of one step, with enough fault detail for a batch driver to
/// aggregate results across users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: ProvisionStep,
    pub ok: bool,
    /// Advisory steps are reported but never gate overall success; the
    /// read-back is the authority on whether their effect landed.
    pub advisory: bool,
    pub error: Option<String>,
    pub fault_code: Option<String>,
    pub fault_detail: Option<String>,
}

impl StepReport {
    fn applied(step: ProvisionStep) -> Self {
        Self {
            step,
            ok: true,
            advisory: false,
            error: None,
            fault_code: None,
            fault_detail: None,
        }
    }

    fn failed(step: ProvisionStep, err: &AxlError) -> Self {
        let (fault_code, fault_detail) = match err {
            AxlError::Fault { code, detail, .. } => (Some(code.clone()), detail.clone()),
            _ => (None, None),
        };
        Self {
            step,
            ok: false,
            advisory: false,
            error: Some(err.to_string()),
            fault_code,
            fault_detail,
        }
    }

    fn advisory(mut self) -> Self {
        self.advisory = true;
        self
    }
}

/// Live configuration read back for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnrSnapshot {
    pub user: Option<EndUser>,
    pub profiles: Vec<RdpRow>,
    pub destinations: Vec<RemoteDestination>,
}

/// Result of a provisioning run: per-step outcomes, the furthest
/// confirmed state, and the read-back snapshot (absent only when the
/// final read itself failed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub state: ProvisionState,
    pub steps: Vec<StepReport>,
    pub snapshot: Option<SnrSnapshot>,
}

impl ProvisionReport {
    pub fn fully_applied(&self) -> bool {
        self.steps.iter().all(|step| step.ok || step.advisory)
    }
}

/// Provision Single Number Reach for one user.
///
/// Steps, in order: enable mobility on the user, create the profile
/// (then push the desk-line association with `applyLine`), create the
/// destination, and read live state back. Every failure is recorded and
/// the workflow continues; nothing escapes unreported.
pub async fn provision(client: &AxlClient, request: &ProvisionRequest) -> ProvisionReport {
    let mut steps = Vec::new();
    let mut state = ProvisionState::Init;

    info!(user_id = %request.user_id, "provisioning Single Number Reach");

    let update = MobilityUpdate {
        enable_mobility: true,
        max_desk_pickup_wait: request.max_desk_pickup_wait,
        remote_destination_limit: request.remote_destination_limit,
    };
    match client.update_user_mobility(&request.user_id, &update).await {
        Ok(()) => {
            state = ProvisionState::MobilityEnabled;
            steps.push(StepReport::applied(ProvisionStep::EnableMobility));
        }
        Err(err) => {
            warn!(user_id = %request.user_id, error = %err, "enabling mobility failed");
            steps.push(StepReport::failed(ProvisionStep::EnableMobility, &err));
        }
    }

    let profile = NewRemoteDestinationProfile {
        name: rdp_name(&request.user_id),
        description: Some(format!("SNR profile for {}", request.user_id)),
        user_id: request.user_id.clone(),
        device_pool: request.device_pool.clone(),
        calling_search_space: request.calling_search_space.clone(),
        reroute_calling_search_space: request.reroute_calling_search_space.clone(),
        line: Some(AssociatedLine {
            index: 1,
            line: request.desk_line.clone(),
        }),
    };
    match client.add_remote_destination_profile(&profile).await {
        Ok(()) => {
            state = ProvisionState::ProfileCreated;
            steps.push(StepReport::applied(ProvisionStep::CreateProfile));
        }
        Err(err) => {
            warn!(profile = %profile.name, error = %err, "profile creation failed");
            steps.push(StepReport::failed(ProvisionStep::CreateProfile, &err));
        }
    }
    // The new line association may need an activate before it takes
    // effect. Advisory: reported, but the read-back decides.
    match client.apply_line(&request.desk_line).await {
        Ok(()) => steps.push(StepReport::applied(ProvisionStep::ApplyLine).advisory()),
        Err(err) => {
            warn!(pattern = %request.desk_line.pattern, error = %err, "applyLine failed");
            steps.push(StepReport::failed(ProvisionStep::ApplyLine, &err).advisory());
        }
    }

    // Attempted even when the profile step faulted: a duplicate-name
    // fault means the profile is already there from an earlier run.
    let mut destination = NewRemoteDestination::new(
        rd_name(&request.user_id),
        request.mobile_number.clone(),
        profile.name.clone(),
    );
    destination.mobility_calling_search_space =
        request.mobility_calling_search_space.clone();
    destination.line = Some(request.desk_line.clone());
    match client.add_remote_destination(&destination).await {
        Ok(()) => {
            state = ProvisionState::DestinationCreated;
            steps.push(StepReport::applied(ProvisionStep::CreateDestination));
        }
        Err(err) => {
            warn!(destination = %destination.name, error = %err, "destination creation failed");
            steps.push(StepReport::failed(ProvisionStep::CreateDestination, &err));
        }
    }

    match verify(client, &request.user_id).await {
        Ok(snapshot) => {
            state = ProvisionState::Verified;
            steps.push(StepReport::applied(ProvisionStep::Verify));
            ProvisionReport {
                state,
                steps,
                snapshot: Some(snapshot),
            }
        }
        Err(err) => {
            warn!(user_id = %request.user_id, error = %err, "verification read failed");
            steps.push(StepReport::failed(ProvisionStep::Verify, &err));
            ProvisionReport {
                state,
                steps,
                snapshot: None,
            }
        }
    }
}

/// Read the live Single Number Reach state for a user.
///
/// Profile names come from the user record; when none are recorded yet
/// (the association can lag a fresh creation) the deterministic naming
/// convention is used instead. Destinations are listed by wildcard and
/// filtered to those profiles client-side.
pub async fn verify(client: &AxlClient, user_id: &str) -> Result<SnrSnapshot, AxlError> {
    let user = client.get_user(user_id).await?;
    let mut names: Vec<String> = user
        .as_ref()
        .map(|user| user.remote_destination_profiles.clone())
        .unwrap_or_default();
    if names.is_empty() {
        names.push(rdp_name(user_id));
    }

    let mut profiles = Vec::new();
    for name in &names {
        profiles.extend(client.list_remote_destination_profiles(name).await?);
    }
    let destinations = client.list_remote_destinations(&names).await?;

    Ok(SnrSnapshot {
        user,
        profiles,
        destinations,
    })
}
