//! # Taskboard API Server Library
//!
//! Core functionality for the Taskboard API server.
//!
//! ## Modules
//!
//! - `app`: Application state, router builder, and the auth layer
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP envelope mapping
//! - `extract`: `Path`/`Json` extractors with envelope-shaped rejections
//! - `response`: The uniform success/error response envelope
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
