//! Sales

pub mod models;
mod repository;
pub mod service;

pub use service::*;
