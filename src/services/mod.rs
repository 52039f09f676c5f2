// src/services/mod.rs
pub mod admissions;
pub mod assistant;
pub mod directory;
pub mod form_flow;
