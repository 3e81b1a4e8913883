//! Shopper authentication: users and bearer sessions.

mod errors;
pub mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
