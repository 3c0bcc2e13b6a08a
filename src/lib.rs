//! # HR Records Library
//!
//! Employees, departments, teams, memberships and medical leave records
//! behind an axum HTTP API backed by SeaORM.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
