//! Single Number Reach provisioning for Cisco Unified CM.
//!
//! Talks to the AXL administrative API over SOAP to enable mobility on a
//! user, create the Remote Destination Profile / Remote Destination pair
//! backing Single Number Reach, and read the live configuration back for
//! verification. The interesting work is all in the client layer: the
//! server answers with structurally inconsistent payloads (bare item vs.
//! collection, scalar vs. wrapped element) and reports operation failures
//! as faults inside HTTP-successful exchanges, so every response goes
//! through one normalization layer before anything interprets it.
//!
//! - [`axl`]: transport, response normalizer, and per-resource operations.
//! - [`models`]: the configuration entities read and written over AXL.
//! - [`provision`]: the provisioning and verification workflows.

pub mod axl;
pub mod models;
pub mod provision;
