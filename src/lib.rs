pub mod api;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod geo;
pub mod service;

pub use error::DustwatchError;
pub use geo::Grade;
