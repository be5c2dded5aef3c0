pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
