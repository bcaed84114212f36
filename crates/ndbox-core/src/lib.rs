#![forbid(unsafe_code)]

//! Shape parsing, style configuration and geometry for ndbox diagrams (headless).
//!
//! A shape like `2 3 4` describes an N-dimensional array; `ndbox-render` turns it into a
//! nested-box diagram using the constants in [`StyleConfig`].

pub mod color;
pub mod error;
pub mod geom;
pub mod shape;
pub mod style;

pub use color::Color;
pub use error::{Error, Result};
pub use shape::{MAX_ELEMENTS, MAX_RANK, Shape, parse_dims};
pub use style::StyleConfig;
