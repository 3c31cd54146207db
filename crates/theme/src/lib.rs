//! Fixed visual constants for rendered feedback reports.
//!
//! - `color`: the report palette
//! - `text`: text and border style primitives
//! - `blocks`: per-node style table (headings, lists, code, tables, ...)
//! - `page`: A4 geometry and header/score/footer band styles

pub mod blocks;
pub mod color;
pub mod page;
pub mod text;

pub use blocks::{HeadingStyle, heading_style};
pub use color::Color;
pub use text::{Border, FontWeight, TextStyle};
