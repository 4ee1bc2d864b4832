//! Aesthetic Core
//!
//! Core types shared by the simulation client, the job poller and the CLI.
//!
//! This crate contains:
//! - Domain types: entities returned by the simulation service (Simulation, Patient, etc.)
//! - DTOs: request bodies sent to the service

pub mod domain;
pub mod dto;
