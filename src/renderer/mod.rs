//! Repaint pass: draws resolved layout through a [`Painter`]
//!
//! The SVG painter turns a resolved table into a standalone document with CSS
//! classes for styling; hosts with their own canvas implement [`Painter`].

pub mod config;
pub mod paint;
pub mod svg;

pub use config::{Palette, SvgConfig};
pub use paint::{PaintOp, Painter, RecordingPainter};
pub use svg::{render_table_svg, SvgPainter};
