//! Library exports for learnhub, shared between the binary and tests.

pub mod api;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
pub mod views;
