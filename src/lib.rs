//! Tuition fee service: cleans course and degree fee CSVs, serves them as a page
//! and JSON API, accepts replacement data through a token-guarded webhook and
//! exports a selection as a PDF.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod logging;
pub mod quote;
pub mod server;

pub use error::{Error, Result, SchemaError};
