//! # Autopostr Core
//!
//! The scheduling and content-planning engine behind Autopostr.
//! This crate holds the domain records, the pure planning components
//! (recurrence, plan expansion, calendar aggregation, alarm linking) and
//! the ports the store has to implement. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{PlannerError, RepoError};
