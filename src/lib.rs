//! # qishape
//!
//! Renders a scannable QR code inside a pixelated triangle, circle or square,
//! with the background pixels and the QR modules tinted by one three-stop
//! horizontal gradient.
//!
//! A render pass is built from a handful of small pieces:
//!
//! - Encode the text at error-correction level H into a [`matrix::BitMatrix`].
//! - Size the silhouette on a 550 x 550 canvas ([`shape::ShapeGeometry`]).
//! - Reserve a rectangle for the code ([`mask::MaskRegion`]).
//! - Scatter gradient-colored pixels over the rest of the shape ([`field`]).
//! - Place the colored QR modules inside the reserved rectangle ([`placer`]).
//! - Assemble both layers into a [`scene::RenderScene`] that exports to SVG or PNG ([`helper`]).
//!
//! ## Example
//!
//! ```rust
//! use qishape::color::Gradient;
//! use qishape::config::RenderConfig;
//! use qishape::helper::to_svg_string;
//! use qishape::render::{RenderController, RenderOptions};
//! use qishape::shape::ShapeKind;
//!
//! let config = RenderConfig::new(
//!     "https://example.com",
//!     "42",
//!     Gradient::from_hex_or_black("#FF0000", "#00FF00", "#0000FF"),
//!     ShapeKind::Circle,
//! );
//! let mut controller = RenderController::with_default_encoder(RenderOptions::default());
//! let svg = to_svg_string(controller.update(config).unwrap());
//! assert!(svg.contains("class=\"qr-code\""));
//! ```
//!
//! ## Modules
//!
//! - [`color`]: RGB colors and the three-stop gradient.
//! - [`shape`]: Silhouette sizing and point membership.
//! - [`matrix`]: QR bit matrices and the encoder seam.
//! - [`mask`]: The rectangle reserved for the QR code.
//! - [`field`]: The random decorative pixel field.
//! - [`placer`]: QR module placement and run merging.
//! - [`scene`]: Rendered elements in paint order.
//! - [`helper`]: SVG, embedded-raster and PNG export.
//! - [`config`] and [`render`]: Render passes and the controller.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod helper;
pub mod logging;
pub mod mask;
pub mod matrix;
pub mod placer;
pub mod render;
pub mod scene;
pub mod shape;

pub use error::Error;
