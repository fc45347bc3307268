//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod common;
mod filters;
mod global;
mod pagination;

pub use common::OutputFormat;
pub use filters::{
    AuditTaskFilterArgs, EventFilterArgs, FindingFilterArgs, MitigationFilterArgs,
    SuppressionFilterArgs, ThingFilterArgs, ViolationFilterArgs, parse_time_arg,
};
pub use global::GlobalOptions;
pub use pagination::PaginationArgs;
