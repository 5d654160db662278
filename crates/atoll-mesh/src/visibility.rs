//! Neighbor exposure rules. Neighbors outside the chunk are read through the
//! world; a chunk that does not exist yet reads as air, so blocks on the
//! generation frontier keep their border faces until the chunk is rebuilt.

use atoll_blocks::{BlockRegistry, BlockType, Model};
use atoll_chunk::Chunk;
use atoll_geom::Face;
use atoll_world::{CHUNK_SIZE_I32, VoxelAccess};

/// Block type across `face` of local `(x, y, z)`.
pub fn neighbor_type<A: VoxelAccess + ?Sized>(
    chunk: &Chunk,
    world: &A,
    x: usize,
    y: usize,
    z: usize,
    face: Face,
) -> BlockType {
    let (dx, dy, dz) = face.delta();
    let (nx, ny, nz) = (x as i32 + dx, y as i32 + dy, z as i32 + dz);
    let inside = |v: i32| (0..CHUNK_SIZE_I32).contains(&v);
    if inside(nx) && inside(ny) && inside(nz) {
        chunk.get_local(nx as usize, ny as usize, nz as usize)
    } else {
        world.block_type(chunk.coord().origin().offset(nx, ny, nz))
    }
}

/// Whether `neighbor` leaves the shared face of `block` uncovered.
pub fn exposes(reg: &BlockRegistry, block: BlockType, neighbor: BlockType) -> bool {
    if neighbor.is_air() {
        return true;
    }
    let n = reg.get(neighbor);
    if !n.transparent {
        return false;
    }
    let b = reg.get(block);
    if b.model == Model::Fluid {
        n.model != Model::Fluid
    } else if b.transparent {
        neighbor != block
    } else {
        true
    }
}

/// Per-face exposure of local `(x, y, z)`, indexed by `Face::index`.
pub fn exposed_faces<A: VoxelAccess + ?Sized>(
    chunk: &Chunk,
    world: &A,
    x: usize,
    y: usize,
    z: usize,
) -> [bool; 6] {
    let block = chunk.get_local(x, y, z);
    let reg = world.registry();
    let mut out = [false; 6];
    if block.is_air() {
        return out;
    }
    for face in Face::ALL {
        out[face.index()] = exposes(reg, block, neighbor_type(chunk, world, x, y, z, face));
    }
    out
}

/// A non-air block is drawn when at least one neighbor exposes it.
pub fn is_block_visible<A: VoxelAccess + ?Sized>(
    chunk: &Chunk,
    world: &A,
    x: usize,
    y: usize,
    z: usize,
) -> bool {
    let block = chunk.get_local(x, y, z);
    if block.is_air() {
        return false;
    }
    let reg = world.registry();
    // Face::ALL starts at +Y: the top face of water is checked first.
    Face::ALL
        .into_iter()
        .any(|face| exposes(reg, block, neighbor_type(chunk, world, x, y, z, face)))
}
