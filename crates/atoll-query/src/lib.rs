//! Spatial queries over world voxels: ray picking, box collision, spawn search.
#![forbid(unsafe_code)]

mod collision;
mod raycast;
mod spawn;

pub use collision::{Contact, collision, collision_box};
pub use raycast::{DEFAULT_REACH, RAY_STEPS, RayHit, raycast};
pub use spawn::{SpawnSite, find_safe_spawn};
