//! League website backend: standings, schedule, regulations and the admin
//! endpoints that edit them, all behind a single dispatch function.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::ApiError;
pub use handler::{handle, Context, Event, HandlerResponse};
