//! Tipos compartilhados do querybind.

pub mod config;
pub mod errors;
pub mod value;

pub use config::Config;
pub use errors::{QueryError, QueryResult};
pub use value::Value;
