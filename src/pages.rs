//! Page generation modules for different view types
//!
//! Each page module renders one kind of [`crate::viewer::Page`] using the
//! shared components from the components module.

pub mod document;
pub mod error;
pub mod landing;
