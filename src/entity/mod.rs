//! SeaORM entity definitions for the MySQL database.

pub mod account;
pub mod decision;
pub mod report;
pub mod service_request;
pub mod session;
