use atoll_geom::BlockPos;
use atoll_world::VoxelAccess;

/// Where a body should appear: the feet cell and whether it was checked safe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnSite {
    pub feet: BlockPos,
    pub safe: bool,
}

const SPIRAL_STEPS: u32 = 200;
const BORDER_MARGIN: i32 = 5;

fn is_safe<A: VoxelAccess + ?Sized>(world: &A, feet: BlockPos) -> bool {
    let solid = |p: BlockPos| world.block(p).is_solid();
    solid(feet.below())
        && !solid(feet)
        && !solid(feet.above())
        && !solid(feet.offset(0, 2, 0))
        && !solid(feet.offset(1, 0, 0))
        && !solid(feet.offset(-1, 0, 0))
        && !solid(feet.offset(0, 0, 1))
        && !solid(feet.offset(0, 0, -1))
}

/// Searches for solid ground with three clear cells above and clear sides:
/// first the center column from `sea_level + 30` down, then an outward
/// spiral from `sea_level + 20` down. Falls back to an unchecked spot high
/// above the center.
pub fn find_safe_spawn<A: VoxelAccess + ?Sized>(world: &A, sea_level: i32) -> SpawnSite {
    let dims = world.dims();
    let (cx, cz) = (dims.width / 2, dims.depth / 2);

    for y in ((sea_level + 1)..=(sea_level + 30)).rev() {
        let feet = BlockPos::new(cx, y, cz);
        if is_safe(world, feet) {
            log::debug!(target: "spawn", "center spawn at y={}", y);
            return SpawnSite { feet, safe: true };
        }
    }

    for i in 1..=SPIRAL_STEPS {
        let angle = 0.5 * i as f32;
        let radius = 0.5 * angle;
        let x = cx + (angle.cos() * radius).floor() as i32;
        let z = cz + (angle.sin() * radius).floor() as i32;
        if x < BORDER_MARGIN
            || z < BORDER_MARGIN
            || x >= dims.width - BORDER_MARGIN
            || z >= dims.depth - BORDER_MARGIN
        {
            continue;
        }
        for y in ((sea_level + 1)..=(sea_level + 20)).rev() {
            let feet = BlockPos::new(x, y, z);
            if is_safe(world, feet) {
                log::debug!(target: "spawn", "spiral spawn at ({},{},{}) step={}", x, y, z, i);
                return SpawnSite { feet, safe: true };
            }
        }
    }

    log::warn!(target: "spawn", "no safe spawn found; using high fallback");
    SpawnSite {
        feet: BlockPos::new(cx, sea_level + 40, cz),
        safe: false,
    }
}
