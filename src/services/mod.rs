//! # Relay Services
//!
//! This module contains the logic behind the submission endpoint. Services
//! encapsulate the messaging platform and the relay sequence and provide
//! clean interfaces for use by HTTP handlers.
//!
//! ## Available Services
//!
//! - **Messenger** (`messenger`) - Delivery to the messaging platform with multiple implementations
//! - **Relay** (`relay`) - The summary-then-attachments relay sequence
//! - **Summary** (`summary`) - Rendering of the summary message

pub mod messenger;
pub mod relay;
pub mod summary;
