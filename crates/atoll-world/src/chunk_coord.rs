use atoll_geom::BlockPos;

use crate::{CHUNK_SIZE, CHUNK_SIZE_I32};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Chunk holding world block `(x, y, z)`.
    #[inline]
    pub fn containing(x: i32, y: i32, z: i32) -> Self {
        Self::new(
            x.div_euclid(CHUNK_SIZE_I32),
            y.div_euclid(CHUNK_SIZE_I32),
            z.div_euclid(CHUNK_SIZE_I32),
        )
    }

    #[inline]
    pub fn containing_pos(p: BlockPos) -> Self {
        Self::containing(p.x, p.y, p.z)
    }

    /// Local coordinates of world block `p` inside its chunk.
    #[inline]
    pub fn local_of(p: BlockPos) -> (usize, usize, usize) {
        (
            p.x.rem_euclid(CHUNK_SIZE_I32) as usize,
            p.y.rem_euclid(CHUNK_SIZE_I32) as usize,
            p.z.rem_euclid(CHUNK_SIZE_I32) as usize,
        )
    }

    /// World position of local `(0,0,0)`.
    #[inline]
    pub fn origin(self) -> BlockPos {
        BlockPos::new(
            self.cx * CHUNK_SIZE_I32,
            self.cy * CHUNK_SIZE_I32,
            self.cz * CHUNK_SIZE_I32,
        )
    }

    #[inline]
    pub fn world_of(self, lx: usize, ly: usize, lz: usize) -> BlockPos {
        debug_assert!(lx < CHUNK_SIZE && ly < CHUNK_SIZE && lz < CHUNK_SIZE);
        self.origin().offset(lx as i32, ly as i32, lz as i32)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    /// Squared distance on the x/z plane; `cy` is ignored.
    #[inline]
    pub fn planar_distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx) - i64::from(other.cx);
        let dz = i64::from(self.cz) - i64::from(other.cz);
        dx * dx + dz * dz
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}
