#![forbid(unsafe_code)]

//! Markdown outline parser + mind-map configuration model (headless).
//!
//! Design goals:
//! - tolerate loosely formatted outlines (mixed markers, tabs, uneven indentation)
//! - deterministic outputs for byte-identical inputs
//! - "no structure" is data (`None`), never an error

pub mod config;
pub mod error;
pub mod outline;

pub use config::{LayoutConfig, MindmapConfig, OutlineConfig, PaletteEntry, StyleConfig};
pub use error::{Error, Result};
pub use outline::{OutlineNode, clean_text, parse_outline, parse_outline_with};
