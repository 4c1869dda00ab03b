//! reviewdesk: browse your own pull requests and reply to review threads.
//!
//! The functionality lives in the workspace crates; this crate re-exports
//! them under one name.

pub use reviewdesk_api as api;
pub use reviewdesk_core as domain;
pub use reviewdesk_github as github;
