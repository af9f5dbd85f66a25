//! Pure analytics over the data returned by the analysis service.
//!
//! Everything in here is synchronous, deterministic, and free of any
//! rendering or browser dependency so it can be unit tested on the host.

pub mod insights;
pub mod replay;
pub mod risk;
pub mod timeline;
