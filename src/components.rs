//! Reusable HTML components for page generation
//!
//! This module provides Maud component functions shared across the page
//! types (landing, document, error).

pub mod blocks;
pub mod footer;
pub mod layout;
pub mod nav;
pub mod source_list;
