//! Block catalog, item/tool table, and the read-only block registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod item;
pub mod registry;
pub mod types;

pub use item::{Item, Tool, ToolKind, ToolTier};
pub use registry::{Block, BlockProps, BlockRegistry, DropRule, Hazard, ItemStack, RegistryError};
pub use types::{BlockType, Model};
