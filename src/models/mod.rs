//! Domain Models Module
//!
//! Canonical shapes the accessors map backend responses into.

mod auth;
mod profile;
mod waitlist;

pub use auth::{AuthSession, Permissions};
pub use profile::{ProfilePatch, UserProfile};
pub use waitlist::{AdminStats, LeadEntry, WaitlistStats};
