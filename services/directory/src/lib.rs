//! Endpoint directory service for the flotilla platform.
//!
//! Resolves the fleet's persisted task records into a queryable directory of
//! reachable endpoints: every query recomputes the full mapping of group
//! names (VIP names or bare port names) to endpoint records from the state
//! store, with no cross-query caching. The directory is best-effort and
//! eventually consistent with whatever the scheduler last recorded; it never
//! probes the network itself.

pub mod api;
pub mod config;
pub mod directory;
pub mod registry;
pub mod state;
pub mod store;
