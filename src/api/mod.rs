//! API module
//!
//! Contains HTTP request handlers for the place-search endpoints

pub mod places;
