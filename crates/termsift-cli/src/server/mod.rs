//! Review server: a JSON API over a shared session.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
