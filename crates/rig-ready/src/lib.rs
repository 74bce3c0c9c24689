//! Readiness screening for welding résumés: a deterministic rubric engine plus the
//! configuration, telemetry and HTTP plumbing shared by the `rig-ready` binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
