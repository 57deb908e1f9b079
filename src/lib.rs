//! CRDA workflow server library.
//!
//! Role-based workflow for citizen service requests: a chef d'entreprise
//! registers requests, a gerant files inspection reports, a directeur records
//! the final decision and approves staff accounts.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
pub mod views;
