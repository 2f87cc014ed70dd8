//! Output generation for the digest.
//!
//! # Submodules
//!
//! - [`html`]: Renders the grouped [`crate::models::Digest`] as a static page
//! - [`json`]: Optional machine-readable copy of the same digest
//!
//! Both writers overwrite their target on every run.

pub mod html;
pub mod json;
