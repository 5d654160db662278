//! Island terrain rules: per-column classification, material fill, and
//! decoration placement. Chunk buffers drive these; nothing here stores voxels.

mod column;
mod decor;
mod surface;

use std::fmt;

use atoll_blocks::BlockType;
use atoll_geom::BlockPos;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::noise::{NoiseSource, SimplexNoise};
use crate::{ChunkCoord, WorldDims, WorldGenParams};

pub use column::{ColumnProfile, NoiseChannels, Zone};

/// A block write produced by generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub pos: BlockPos,
    pub block: BlockType,
}

impl Placement {
    #[inline]
    pub const fn new(pos: BlockPos, block: BlockType) -> Self {
        Self { pos, block }
    }
}

/// Folds the high half of a world seed into the 32-bit noise seed.
fn noise_seed(seed: u64) -> i32 {
    (seed ^ (seed >> 32)) as i32
}

/// Generation context: parameters plus the single noise source seeded at creation.
pub struct WorldGen {
    params: WorldGenParams,
    noise: Box<dyn NoiseSource>,
    seed: u64,
}

impl WorldGen {
    /// Simplex noise seeded from `seed`.
    pub fn new(seed: u64, params: WorldGenParams) -> Self {
        Self::with_noise(seed, params, SimplexNoise::new(noise_seed(seed)))
    }

    pub fn with_noise(seed: u64, params: WorldGenParams, noise: impl NoiseSource + 'static) -> Self {
        Self {
            params,
            noise: Box::new(noise),
            seed,
        }
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.params.dims
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn sea_level(&self) -> i32 {
        self.params.sea_level
    }

    /// Noise remapped to `[0, 1]` at world column `(x, z) / scale`.
    #[inline]
    fn sample01(&self, x: f32, z: f32, scale: f32) -> f32 {
        (self.noise.noise2d(x / scale, z / scale) + 1.0) * 0.5
    }

    /// Decoration RNG for one chunk; identical for the same seed and coordinate.
    pub fn chunk_rng(&self, coord: ChunkCoord) -> ChaCha12Rng {
        let mix = (coord.cx as i64 as u64)
            .wrapping_mul(341_873_128_712)
            .wrapping_add((coord.cy as i64 as u64).wrapping_mul(2_654_435_761))
            .wrapping_add((coord.cz as i64 as u64).wrapping_mul(132_897_987_541));
        ChaCha12Rng::seed_from_u64(self.seed.wrapping_add(mix))
    }
}

impl fmt::Debug for WorldGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldGen")
            .field("seed", &self.seed)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
