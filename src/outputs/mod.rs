//! Renderers for an aggregation [`Digest`](crate::models::Digest).
//!
//! # Submodules
//!
//! - [`html`]: The dashboard page served at `/`
//! - [`console`]: The plain-text run report printed by the `report` command
//!
//! Both are pure functions of the digest, so they can be tested without any
//! network access.

pub mod console;
pub mod html;
