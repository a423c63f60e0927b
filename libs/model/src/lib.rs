//! # flotilla-model
//!
//! Shared fleet data model for the flotilla platform: task records as the
//! scheduler persists them, liveness status snapshots, and the endpoint
//! naming conventions used by the internal resolver.
//!
//! ## Design Principles
//!
//! - The scheduler is the only writer; the endpoint directory and other
//!   read paths treat these records as immutable snapshots
//! - Tasks are identified by name, unique within one service
//! - Discovery metadata is declarative: a task that declares nothing is
//!   invisible to resolution, never an error
//! - Naming conventions are fixed strings, not configuration

mod status;
mod task;

pub mod naming;
pub mod vip;

pub use status::{TaskState, TaskStatusRecord};
pub use task::{DiscoverySpec, PortDeclaration, PortLabels, PortVisibility, TaskRecord};
pub use vip::{parse_vip_label, VipMembership, VIP_LABEL_PREFIX};
