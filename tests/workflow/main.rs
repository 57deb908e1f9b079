//! Workflow test suite.
//!
//! Drives the full route table against sea-orm's mock MySQL backend and
//! checks both the HTTP answers and the statements each request issued.
//!
//! Run with: cargo test --test workflow

mod helpers;

mod auth_test;
mod gate_test;
mod health_test;
mod reports_test;
mod results_test;
mod services_test;
