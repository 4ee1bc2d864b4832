//! Data Transfer Objects
//!
//! Request payloads sent to the simulation service.

pub mod auth;
pub mod patient;
pub mod simulation;
