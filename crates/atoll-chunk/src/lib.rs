//! Dense chunk storage, the per-chunk generation pass, and mesh descriptors.
#![forbid(unsafe_code)]

mod generate;
pub mod mesh;

use std::sync::Arc;

use atoll_blocks::BlockType;
use atoll_geom::BlockPos;
use atoll_world::{CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord};

pub use mesh::{BatchKey, Billboard, ChunkMesh, Instances, MeshBatch, MeshState, Transparency};

/// A cubic `CHUNK_SIZE³` block of the world.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Vec<BlockType>,
    generated: bool,
    mesh: MeshState,
}

impl Chunk {
    /// All-air, ungenerated, dirty.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![BlockType::Air; CHUNK_VOLUME],
            generated: false,
            mesh: MeshState::Dirty,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Linear index of local `(x, y, z)`: y-major, then z, then x.
    #[inline]
    pub fn local_to_index(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_SIZE + z) * CHUNK_SIZE + x
    }

    #[inline]
    pub fn index_to_local(i: usize) -> (usize, usize, usize) {
        let x = i % CHUNK_SIZE;
        let z = (i / CHUNK_SIZE) % CHUNK_SIZE;
        let y = i / (CHUNK_SIZE * CHUNK_SIZE);
        (x, y, z)
    }

    #[inline]
    fn in_range(x: usize, y: usize, z: usize) -> bool {
        x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE
    }

    /// Air for coordinates outside `[0, CHUNK_SIZE)`.
    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockType {
        if !Self::in_range(x, y, z) {
            return BlockType::Air;
        }
        self.blocks[Self::local_to_index(x, y, z)]
    }

    /// Writes a block and marks the chunk dirty. Returns whether the stored
    /// value changed.
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, t: BlockType) -> bool {
        if !Self::in_range(x, y, z) {
            return false;
        }
        let slot = &mut self.blocks[Self::local_to_index(x, y, z)];
        if *slot == t {
            return false;
        }
        *slot = t;
        self.mark_dirty();
        true
    }

    #[inline]
    pub fn contains_world(&self, p: BlockPos) -> bool {
        ChunkCoord::containing_pos(p) == self.coord
    }

    #[inline]
    pub fn get_world(&self, p: BlockPos) -> Option<BlockType> {
        if !self.contains_world(p) {
            return None;
        }
        let (x, y, z) = ChunkCoord::local_of(p);
        Some(self.get_local(x, y, z))
    }

    pub fn set_world(&mut self, p: BlockPos, t: BlockType) -> bool {
        if !self.contains_world(p) {
            return false;
        }
        let (x, y, z) = ChunkCoord::local_of(p);
        self.set_local(x, y, z, t)
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| b.is_air())
    }

    pub fn non_air_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_air()).count()
    }

    /// Topmost grass block in a local column.
    pub fn surface_grass(&self, x: usize, z: usize) -> Option<usize> {
        (0..CHUNK_SIZE)
            .rev()
            .find(|&y| self.get_local(x, y, z) == BlockType::Grass)
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    #[inline]
    pub fn mesh_state(&self) -> &MeshState {
        &self.mesh
    }

    /// Voxels changed since the last stored mesh.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        matches!(self.mesh, MeshState::Dirty)
    }

    /// No current mesh, either because it is stale or because it was released.
    #[inline]
    pub fn needs_mesh(&self) -> bool {
        !matches!(self.mesh, MeshState::Clean(_))
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.mesh = MeshState::Dirty;
    }

    pub fn mesh(&self) -> Option<&Arc<ChunkMesh>> {
        match &self.mesh {
            MeshState::Clean(m) => Some(m),
            _ => None,
        }
    }

    pub fn store_mesh(&mut self, mesh: Arc<ChunkMesh>) {
        self.mesh = MeshState::Clean(mesh);
    }

    /// Drops the current mesh, keeping voxels. A dirty chunk stays dirty.
    /// Returns whether a mesh was dropped.
    pub fn release_mesh(&mut self) -> bool {
        if matches!(self.mesh, MeshState::Clean(_)) {
            self.mesh = MeshState::Released;
            true
        } else {
            false
        }
    }
}
