//! Domain records and backend wire protocol shared across the dashboard
//! workspace.

pub mod domain;
pub mod error;
pub mod protocol;
