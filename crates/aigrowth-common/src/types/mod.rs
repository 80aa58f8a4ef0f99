//! Core value types for the AI growth/risk model

pub mod equilibrium;
pub mod parameters;
pub mod summary;
pub mod sweep;
