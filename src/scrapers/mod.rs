//! News sources.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | RSS/Atom feeds | [`feed`] | HTTP GET + `feed-rs` | Static feeds and Google News search feeds |
//! | FiRa Consortium | [`fira`] | Fixed entry | Press-release page is linked, not parsed |
//!
//! Feed fetching never fails the run: a source that cannot be reached or
//! decoded yields [`feed::FetchOutcome::Skipped`] and contributes no items.

pub mod feed;
pub mod fira;
