//! Core domain entities.
//!
//! - [`ShortLink`] - A stored code-to-destination mapping with its visit counter
//! - [`NewShortLink`] - Input for inserting a new mapping

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
