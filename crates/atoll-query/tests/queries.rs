use atoll_blocks::{BlockRegistry, BlockType};
use atoll_geom::{BlockPos, Face, Vec3};
use atoll_query::{collision, find_safe_spawn, raycast};
use atoll_world::{VoxelAccess, WorldDims};
use hashbrown::HashMap;

#[derive(Default)]
struct Grid {
    reg: BlockRegistry,
    cells: HashMap<BlockPos, BlockType>,
}

impl Grid {
    fn with(blocks: &[((i32, i32, i32), BlockType)]) -> Self {
        let mut g = Grid::default();
        for &(p, t) in blocks {
            g.cells.insert(p.into(), t);
        }
        g
    }
}

impl VoxelAccess for Grid {
    fn dims(&self) -> WorldDims {
        WorldDims::default()
    }
    fn registry(&self) -> &BlockRegistry {
        &self.reg
    }
    fn block_type(&self, pos: BlockPos) -> BlockType {
        if !self.dims().contains_pos(pos) {
            return BlockType::Air;
        }
        self.cells.get(&pos).copied().unwrap_or(BlockType::Air)
    }
}

#[test]
fn ray_down_hits_top_face() {
    let g = Grid::with(&[((10, 10, 10), BlockType::Stone)]);
    let hit = raycast(&g, Vec3::new(10.0, 20.0, 10.0), Vec3::DOWN, 15.0).unwrap();
    assert_eq!(hit.pos, BlockPos::new(10, 10, 10));
    assert_eq!(hit.normal, Some(Face::PosY));
    assert_eq!(hit.block.id, BlockType::Stone);
    assert!(hit.distance > 9.5 && hit.distance < 9.7, "distance={}", hit.distance);
    assert_eq!(hit.adjacent(), Some(BlockPos::new(10, 11, 10)));
}

#[test]
fn ray_from_inside_solid_hits_at_zero() {
    let g = Grid::with(&[((10, 10, 10), BlockType::Stone)]);
    let hit = raycast(&g, Vec3::new(10.2, 10.0, 9.8), Vec3::UP, 5.0).unwrap();
    assert_eq!(hit.distance, 0.0);
    assert_eq!(hit.normal, None);
    assert_eq!(hit.pos, BlockPos::new(10, 10, 10));
    assert_eq!(hit.adjacent(), None);
}

#[test]
fn ray_leaving_the_world_misses() {
    let g = Grid::with(&[((0, 10, 10), BlockType::Stone)]);
    assert!(raycast(&g, Vec3::new(-5.0, 10.0, 10.0), Vec3::new(-1.0, 0.0, 0.0), 5.0).is_none());
    assert!(raycast(&g, Vec3::new(2.0, 126.0, 2.0), Vec3::UP, 5.0).is_none());
}

#[test]
fn zero_direction_misses() {
    let g = Grid::with(&[((10, 10, 10), BlockType::Stone)]);
    assert!(raycast(&g, Vec3::new(10.0, 12.0, 10.0), Vec3::ZERO, 5.0).is_none());
}

#[test]
fn ray_passes_through_water_and_plants() {
    let g = Grid::with(&[
        ((10, 15, 10), BlockType::Water),
        ((10, 12, 10), BlockType::RedFlower),
        ((10, 10, 10), BlockType::Sand),
    ]);
    let hit = raycast(&g, Vec3::new(10.0, 18.0, 10.0), Vec3::DOWN, 10.0).unwrap();
    assert_eq!(hit.block.id, BlockType::Sand);
    assert_eq!(hit.normal, Some(Face::PosY));
}

#[test]
fn ray_budget_limits_reach() {
    let g = Grid::with(&[((30, 10, 10), BlockType::Stone)]);
    let origin = Vec3::new(10.0, 10.0, 10.0);
    let dir = Vec3::new(1.0, 0.0, 0.0);
    assert!(raycast(&g, origin, dir, 5.0).is_none());
    let hit = raycast(&g, origin, dir * 3.0, 25.0).unwrap();
    assert_eq!(hit.normal, Some(Face::NegX));
    assert_eq!(hit.adjacent(), Some(BlockPos::new(29, 10, 10)));
}

#[test]
fn diagonal_step_uses_dominant_axis() {
    let g = Grid::with(&[((11, 10, 11), BlockType::Stone)]);
    let hit = raycast(&g, Vec3::new(10.45, 10.0, 10.45), Vec3::new(1.0, 0.0, 1.0), 5.0).unwrap();
    assert_eq!(hit.pos, BlockPos::new(11, 10, 11));
    assert_eq!(hit.normal, Some(Face::NegX));
}

#[test]
fn collision_reports_each_solid_block_once() {
    let g = Grid::with(&[((10, 10, 10), BlockType::Stone), ((10, 12, 12), BlockType::Water)]);
    let hits = collision(&g, Vec3::new(10.0, 11.0, 10.0), Vec3::new(0.25, 0.85, 0.25));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].pos, BlockPos::new(10, 10, 10));
    assert!(hits[0].block.is_solid());

    assert!(collision(&g, Vec3::new(10.0, 20.0, 10.0), Vec3::new(0.3, 0.9, 0.3)).is_empty());
}

#[test]
fn collision_skips_points_outside_world() {
    let g = Grid::with(&[((0, 0, 0), BlockType::Bedrock)]);
    let hits = collision(&g, Vec3::ZERO, Vec3::new(0.6, 0.6, 0.6));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].block.id, BlockType::Bedrock);
}

fn ground(g: &mut Grid, y: i32, half: i32) {
    for x in 256 - half..=256 + half {
        for z in 256 - half..=256 + half {
            g.cells.insert(BlockPos::new(x, y, z), BlockType::Grass);
        }
    }
}

#[test]
fn spawn_prefers_center_column() {
    let mut g = Grid::default();
    ground(&mut g, 40, 3);
    let site = find_safe_spawn(&g, 32);
    assert!(site.safe);
    assert_eq!(site.feet, BlockPos::new(256, 41, 256));
}

#[test]
fn spawn_spirals_around_a_blocked_center() {
    let mut g = Grid::default();
    ground(&mut g, 40, 12);
    for y in 33..=70 {
        g.cells.insert(BlockPos::new(256, y, 256), BlockType::Stone);
    }
    let site = find_safe_spawn(&g, 32);
    assert!(site.safe);
    assert_eq!(site.feet.y, 41);
    assert_ne!((site.feet.x, site.feet.z), (256, 256));
    assert!(!g.block(site.feet).is_solid());
    assert!(g.block(site.feet.below()).is_solid());
}

#[test]
fn spawn_falls_back_high_above_center() {
    let g = Grid::default();
    let site = find_safe_spawn(&g, 32);
    assert!(!site.safe);
    assert_eq!(site.feet, BlockPos::new(256, 72, 256));
}
