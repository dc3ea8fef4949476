//! Core document translation pipeline

pub mod client;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod pipeline;
