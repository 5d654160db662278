//! Face-visibility meshing: turns a chunk's voxels into batched instance lists.
#![forbid(unsafe_code)]

mod build;
pub mod visibility;

pub use build::{billboard_yaw, build_chunk_mesh};
pub use visibility::{exposed_faces, exposes, is_block_visible, neighbor_type};
