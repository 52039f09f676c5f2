// src/routes/mod.rs
pub mod admissions_routes;
pub mod assistant_routes;
pub mod auth_routes;
pub mod catalog_routes;
pub mod dashboard_routes;
pub mod directory_routes;
