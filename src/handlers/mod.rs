//! # HTTP Request Handlers
//!
//! This module contains the HTTP request handlers of the relay. Each handler
//! is responsible for processing specific HTTP requests and returning
//! appropriate responses.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Submit** (`submit`) - Submission relay endpoint

mod health_check;
mod submit;

pub use health_check::*;
pub use submit::*;
