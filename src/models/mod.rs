//! Configuration entities read from and written to the AXL API.
//!
//! These mirror the vendor schema loosely: only the fields this crate
//! actually reads or writes are modeled, and every optional server-side
//! field stays `Option` so an absent element never fails a parse.
//!
//! - [`EndUser`]: a directory user with its mobility settings.
//! - [`RdpRow`]: one (profile, line) pair from a profile listing.
//! - [`RemoteDestination`]: a mobile number under a profile.
//! - [`Phone`] / [`Line`]: read-only discovery objects.

mod destination;
mod phone;
mod profile;
mod user;

pub use destination::*;
pub use phone::*;
pub use profile::*;
pub use user::*;
