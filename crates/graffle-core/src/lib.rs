//! Graffle Core Types and Definitions
//!
//! This crate provides the foundational types shared by the graffle parser
//! and renderer. It includes:
//!
//! - **Geometry**: Points, bounds and the point-set transforms used for
//!   flipped and rotated shapes ([`geometry`] module)
//! - **Colors**: RGB colors and their hex encoding ([`color::Rgb`])
//! - **Styles**: The scoped style stack used while walking a page
//!   ([`style::CascadingStyles`])
//! - **Document**: The typed document model extracted from a graffle file
//!   ([`document`] module)

pub mod color;
pub mod document;
pub mod geometry;
pub mod style;
