//! API handlers
//!
//! Author: hephaex@gmail.com

pub mod extract;

pub use extract::{dispatch, ALLOWED_METHODS, JSON_CONTENT_TYPE, TEXT_PARAM};
