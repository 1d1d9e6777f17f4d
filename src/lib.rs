// Public library interface for collage-rs
// The binaries build on these modules; nothing here does I/O except catalog
// scanning and canvas output.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod populate;
pub mod render;
pub mod tree;

pub use config::{GeneratorConfig, Resolution};
pub use error::LayoutError;
pub use generator::{generate_layout, GeneratedLayout};
pub use layout::{Layout, Placement, Size};
pub use tree::arena::{ItemTree, NodeId};
