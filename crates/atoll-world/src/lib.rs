//! World sizing, chunk addressing, noise, and island generation rules.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod dims;
pub mod generation;
pub mod noise;
pub mod worldgen;

use atoll_blocks::{Block, BlockRegistry, BlockType};
use atoll_geom::BlockPos;

pub use chunk_coord::ChunkCoord;
pub use dims::WorldDims;
pub use generation::{ColumnProfile, NoiseChannels, Placement, WorldGen, Zone};
pub use noise::{NoiseSource, SimplexNoise};
pub use worldgen::{ConfigError, WorldGenConfig, WorldGenParams, load_params_from_path};

/// Edge length of a cubic chunk in blocks.
pub const CHUNK_SIZE: usize = 32;
pub const CHUNK_SIZE_I32: i32 = CHUNK_SIZE as i32;
/// Blocks per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Read access to world voxels by world position.
pub trait VoxelAccess {
    fn dims(&self) -> WorldDims;

    fn registry(&self) -> &BlockRegistry;

    /// Air outside the world and inside chunks that were never allocated.
    fn block_type(&self, pos: BlockPos) -> BlockType;

    #[inline]
    fn block(&self, pos: BlockPos) -> Block<'_> {
        self.registry().describe(self.block_type(pos))
    }
}
