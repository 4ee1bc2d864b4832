//! Core domain types
//!
//! This module contains the entities exposed by the simulation service.
//! They are deserialized by the HTTP client and observed (never mutated)
//! by the job poller.

pub mod intervention;
pub mod patient;
pub mod simulation;
pub mod user;

mod timestamp;
