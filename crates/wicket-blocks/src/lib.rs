//! Block types, packed state, and the door-aware block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod state;
pub mod types;

pub use registry::{BlockRegistry, BlockType, DoorBehavior};
pub use types::{Block, BlockId, BlockState};
