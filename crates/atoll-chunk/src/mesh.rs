use std::sync::Arc;

use atoll_blocks::{BlockType, Model};
use atoll_geom::{BlockPos, Face};
use atoll_world::ChunkCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Transparency {
    Opaque,
    Transparent,
}

/// Grouping key for instanced drawing. Orders opaque batches first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchKey {
    pub transparency: Transparency,
    pub block: BlockType,
    pub model: Model,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Billboard {
    pub pos: BlockPos,
    /// Radians about +Y.
    pub yaw: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instances {
    Cubes(Vec<BlockPos>),
    /// One list per face, indexed by `Face::index`.
    Faces([Vec<BlockPos>; 6]),
    Billboards(Vec<Billboard>),
}

impl Instances {
    pub fn len(&self) -> usize {
        match self {
            Instances::Cubes(v) => v.len(),
            Instances::Faces(lists) => lists.iter().map(Vec::len).sum(),
            Instances::Billboards(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn face(&self, face: Face) -> &[BlockPos] {
        match self {
            Instances::Faces(lists) => &lists[face.index()],
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshBatch {
    pub key: BatchKey,
    pub instances: Instances,
}

/// Renderer-agnostic drawable description of one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub coord: ChunkCoord,
    pub batches: Vec<MeshBatch>,
}

impl ChunkMesh {
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            batches: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(|b| b.instances.len()).sum()
    }

    pub fn batch(&self, block: BlockType) -> Option<&MeshBatch> {
        self.batches.iter().find(|b| b.key.block == block)
    }

    pub fn opaque(&self) -> impl Iterator<Item = &MeshBatch> + '_ {
        self.batches
            .iter()
            .filter(|b| b.key.transparency == Transparency::Opaque)
    }

    pub fn transparent(&self) -> impl Iterator<Item = &MeshBatch> + '_ {
        self.batches
            .iter()
            .filter(|b| b.key.transparency == Transparency::Transparent)
    }
}

/// Cached mesh of a chunk.
#[derive(Clone, Debug, Default)]
pub enum MeshState {
    /// Voxels changed since the last build.
    #[default]
    Dirty,
    Clean(Arc<ChunkMesh>),
    /// Mesh dropped by streaming; voxels unchanged.
    Released,
}
