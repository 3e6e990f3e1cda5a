//! # Back-Office API Library
//!
//! This library provides the core functionality for the multi-tenant
//! back-office API service, including handlers, models, repositories, and
//! server configuration.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
