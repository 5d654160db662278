use atoll_blocks::Block;
use atoll_geom::{Aabb, BlockPos, Vec3};
use atoll_world::VoxelAccess;

/// A solid block touched by a collision probe.
#[derive(Clone, Copy, Debug)]
pub struct Contact<'w> {
    pub pos: BlockPos,
    pub block: Block<'w>,
}

/// Solid blocks under the eight corners and the center of `bounds`. Probe
/// points outside the world are skipped; each block is reported once.
/// Callers resolve the response themselves.
pub fn collision_box<'w, A: VoxelAccess + ?Sized>(world: &'w A, bounds: Aabb) -> Vec<Contact<'w>> {
    let dims = world.dims();
    let mut out: Vec<Contact<'w>> = Vec::new();
    let corners = bounds.corners();
    let probes = corners.iter().copied().chain(std::iter::once(bounds.center()));
    for p in probes {
        let pos = BlockPos::round(p);
        if !dims.contains_pos(pos) || out.iter().any(|c| c.pos == pos) {
            continue;
        }
        let block = world.block(pos);
        if !block.is_air() && block.is_solid() {
            out.push(Contact { pos, block });
        }
    }
    out
}

/// `collision_box` for a box of `half_extents` around `center`.
#[inline]
pub fn collision<'w, A: VoxelAccess + ?Sized>(
    world: &'w A,
    center: Vec3,
    half_extents: Vec3,
) -> Vec<Contact<'w>> {
    collision_box(world, Aabb::from_center(center, half_extents))
}
