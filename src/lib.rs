//! Rust SDK and console for the LearnMate e-learning backend.
//!
//! [`api::ApiClient`] wraps the REST surface and always answers with an
//! [`api::ApiResponse`] envelope, [`normalize`] reads the fenced JSON the AI
//! endpoint returns, and [`view`] holds the screen state the console drives.

pub mod api;
pub mod config;
pub mod model;
pub mod normalize;
pub mod session;
pub mod view;
