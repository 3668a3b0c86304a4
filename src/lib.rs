//! Convert Python docstrings between documentation styles.
//!
//! The pipeline: scan a source file for `def` and `class` headers,
//! detect the style of each docstring, extract the documented facts,
//! merge them with what the signature declares and render the result
//! in the requested style. Supported styles are javadoc, reST, cstyle
//! and groups plus the sectioned google and numpydoc layouts.

pub mod config;
pub mod engine;
pub mod merge;
pub mod model;
pub mod parse;
pub mod render;
pub mod scan;
pub mod section;
pub mod signature;
pub mod style;
