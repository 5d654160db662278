use std::sync::Arc;

use atoll_blocks::BlockType;
use atoll_chunk::{Chunk, ChunkMesh, MeshState};
use atoll_geom::BlockPos;
use atoll_world::{CHUNK_SIZE, CHUNK_VOLUME, ChunkCoord};
use proptest::prelude::*;

fn local() -> impl Strategy<Value = usize> {
    0usize..CHUNK_SIZE
}

fn any_block() -> impl Strategy<Value = BlockType> {
    (0u8..BlockType::COUNT as u8).prop_map(BlockType::from_id_or_air)
}

#[test]
fn local_index_is_a_bijection() {
    let mut seen = vec![false; CHUNK_VOLUME];
    for y in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                let i = Chunk::local_to_index(x, y, z);
                assert!(i < CHUNK_VOLUME);
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }
    assert!(seen.into_iter().all(|b| b));
}

#[test]
fn mesh_state_transitions() {
    let coord = ChunkCoord::new(1, 0, 2);
    let mut c = Chunk::new(coord);
    assert!(c.is_dirty() && c.needs_mesh() && !c.is_generated());
    assert!(!c.release_mesh());

    c.store_mesh(Arc::new(ChunkMesh::empty(coord)));
    assert!(!c.is_dirty() && !c.needs_mesh());
    assert!(c.mesh().is_some());

    assert!(c.set_local(0, 0, 0, BlockType::Stone));
    assert!(c.is_dirty());
    assert!(c.mesh().is_none());

    c.store_mesh(Arc::new(ChunkMesh::empty(coord)));
    assert!(c.release_mesh());
    assert!(matches!(c.mesh_state(), MeshState::Released));
    assert!(!c.is_dirty() && c.needs_mesh());
    assert!(!c.release_mesh());

    // identical write is not a change
    assert!(!c.set_local(0, 0, 0, BlockType::Stone));
    assert!(matches!(c.mesh_state(), MeshState::Released));
    assert!(c.set_local(0, 0, 0, BlockType::Dirt));
    assert!(c.is_dirty());
}

#[test]
fn out_of_range_locals_read_air_and_reject_writes() {
    let mut c = Chunk::new(ChunkCoord::new(0, 0, 0));
    assert_eq!(c.get_local(CHUNK_SIZE, 0, 0), BlockType::Air);
    assert!(!c.set_local(0, CHUNK_SIZE, 0, BlockType::Stone));
    assert!(!c.set_world(BlockPos::new(-1, 0, 0), BlockType::Stone));
    assert_eq!(c.get_world(BlockPos::new(32, 0, 0)), None);
    assert!(c.is_all_air());
}

proptest! {
    // index_to_local inverts local_to_index
    #[test]
    fn index_roundtrip(x in local(), y in local(), z in local()) {
        let i = Chunk::local_to_index(x, y, z);
        prop_assert_eq!(Chunk::index_to_local(i), (x, y, z));
    }

    // set_local then get_local returns the written value at the linear slot
    #[test]
    fn set_then_get(x in local(), y in local(), z in local(), t in any_block()) {
        let mut c = Chunk::new(ChunkCoord::new(-3, 1, 7));
        let changed = c.set_local(x, y, z, t);
        prop_assert_eq!(changed, t != BlockType::Air);
        prop_assert_eq!(c.get_local(x, y, z), t);
        prop_assert_eq!(c.blocks()[Chunk::local_to_index(x, y, z)], t);
        let world = c.coord().world_of(x, y, z);
        prop_assert_eq!(c.get_world(world), Some(t));
        prop_assert_eq!(c.non_air_count(), usize::from(t != BlockType::Air));
    }
}
