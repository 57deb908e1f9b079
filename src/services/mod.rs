//! Business logic services.

pub mod accounts;

pub use accounts::{
    OpenedSession, authenticate, close_session, create_account, open_session, register,
};
