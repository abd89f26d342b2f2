//! Common library for the portfolio backend
//!
//! This crate provides shared functionality used across the workspace:
//! PostgreSQL connectivity and the database error types the services
//! build their own error handling on.

pub mod database;
pub mod error;
