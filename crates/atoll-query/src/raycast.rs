use atoll_blocks::Block;
use atoll_geom::{BlockPos, Face, Vec3};
use atoll_world::VoxelAccess;

/// Number of equal sub-steps a ray is sampled at.
pub const RAY_STEPS: u32 = 100;
/// Reach used when a caller has no better distance.
pub const DEFAULT_REACH: f32 = 5.0;

#[derive(Clone, Copy, Debug)]
pub struct RayHit<'w> {
    pub pos: BlockPos,
    /// Face of `pos` the ray entered through; `None` when the ray starts inside it.
    pub normal: Option<Face>,
    pub distance: f32,
    /// Sample point that resolved to `pos`.
    pub point: Vec3,
    pub block: Block<'w>,
}

impl RayHit<'_> {
    /// Cell in front of the hit face, where a placed block would go.
    pub fn adjacent(&self) -> Option<BlockPos> {
        self.normal.map(|f| self.pos.step(f))
    }
}

/// Face against the dominant axis of `dir`.
fn dominant_face(dir: Vec3) -> Face {
    let a = dir.abs();
    if a.x >= a.y && a.x >= a.z {
        if dir.x > 0.0 { Face::NegX } else { Face::PosX }
    } else if a.y >= a.z {
        if dir.y > 0.0 { Face::NegY } else { Face::PosY }
    } else if dir.z > 0.0 {
        Face::NegZ
    } else {
        Face::PosZ
    }
}

/// Entry face from the last air cell into `hit`. Uses the single differing
/// axis, or the dominant ray axis when zero or several axes differ.
fn entry_face(hit: BlockPos, last_air: BlockPos, dir: Vec3) -> Face {
    let d = last_air - hit;
    let diff = [d.x, d.y, d.z].iter().filter(|v| **v != 0).count();
    if diff == 1 {
        if let Some(face) = Face::from_delta(d.x.signum(), d.y.signum(), d.z.signum()) {
            return face;
        }
    }
    dominant_face(dir)
}

/// Marches from `origin` along `direction` in `RAY_STEPS` equal steps up to
/// `max_distance` and returns the first solid, non-air block. Non-solid
/// blocks such as water and plants are passed through.
pub fn raycast<'w, A: VoxelAccess + ?Sized>(
    world: &'w A,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<RayHit<'w>> {
    let len = direction.length();
    if len < 1e-6 || !len.is_finite() {
        return None;
    }
    let dir = direction / len;
    let dims = world.dims();

    let start = BlockPos::round(origin);
    let start_block = world.block(start);
    if !start_block.is_air() && start_block.is_solid() {
        return Some(RayHit {
            pos: start,
            normal: None,
            distance: 0.0,
            point: origin,
            block: start_block,
        });
    }

    let step = max_distance / RAY_STEPS as f32;
    let mut last_air = start;
    for i in 1..=RAY_STEPS {
        let distance = i as f32 * step;
        let point = origin + dir * distance;
        let pos = BlockPos::round(point);
        if !dims.contains_pos(pos) {
            return None;
        }
        let block = world.block(pos);
        if block.is_air() {
            last_air = pos;
        } else if block.is_solid() {
            return Some(RayHit {
                pos,
                normal: Some(entry_face(pos, last_air, dir)),
                distance,
                point,
                block,
            });
        }
    }
    None
}
