//! # Utility Modules
//!
//! This module contains utility functions and constants used throughout the
//! relay.
//!
//! ## Available Utilities
//!
//! - **Constants** (`constant`) - Defaults, captions, and limits
//! - **HTML** (`html`) - Escaping for the messaging platform's HTML markup
//! - **Secrets** (`secret`) - Reading secrets from files or environment variables

pub mod constant;
pub mod html;
pub mod secret;
