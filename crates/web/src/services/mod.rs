//! Application services.

pub mod images;

pub use images::{ImageKind, ImageRejection, ImageStore};
