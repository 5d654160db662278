use atoll_geom::BlockPos;

use crate::{CHUNK_SIZE_I32, ChunkCoord};

/// Bounds of the world in blocks; valid positions are `[0, size)` per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldDims {
    pub width: i32,
    pub height: i32,
    pub depth: i32,
}

impl Default for WorldDims {
    fn default() -> Self {
        Self {
            width: 512,
            height: 128,
            depth: 512,
        }
    }
}

impl WorldDims {
    #[inline]
    pub const fn new(width: i32, height: i32, depth: i32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && y >= 0 && z >= 0 && x < self.width && y < self.height && z < self.depth
    }

    #[inline]
    pub fn contains_pos(&self, p: BlockPos) -> bool {
        self.contains(p.x, p.y, p.z)
    }

    /// Number of chunks along each axis, rounding partial chunks up.
    pub fn chunk_counts(&self) -> (i32, i32, i32) {
        let n = |v: i32| (v + CHUNK_SIZE_I32 - 1).div_euclid(CHUNK_SIZE_I32);
        (n(self.width), n(self.height), n(self.depth))
    }

    /// Largest chunk coordinate that still overlaps the world.
    pub fn max_chunk(&self) -> ChunkCoord {
        let (cx, cy, cz) = self.chunk_counts();
        ChunkCoord::new(cx - 1, cy - 1, cz - 1)
    }

    /// Whether any part of chunk `c` lies inside the world.
    pub fn contains_chunk(&self, c: ChunkCoord) -> bool {
        let max = self.max_chunk();
        c.cx >= 0 && c.cy >= 0 && c.cz >= 0 && c.cx <= max.cx && c.cy <= max.cy && c.cz <= max.cz
    }

    /// Planar center of the world.
    #[inline]
    pub fn center_xz(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.depth as f32 / 2.0)
    }
}
