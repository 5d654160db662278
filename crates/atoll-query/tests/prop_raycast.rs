use atoll_blocks::{BlockRegistry, BlockType};
use atoll_geom::{BlockPos, Vec3};
use atoll_query::raycast;
use atoll_world::{VoxelAccess, WorldDims};
use proptest::prelude::*;

/// Flat stone floor filling every cell at or below `floor`.
struct Floor {
    reg: BlockRegistry,
    floor: i32,
}

impl VoxelAccess for Floor {
    fn dims(&self) -> WorldDims {
        WorldDims::new(64, 64, 64)
    }
    fn registry(&self) -> &BlockRegistry {
        &self.reg
    }
    fn block_type(&self, pos: BlockPos) -> BlockType {
        if self.dims().contains_pos(pos) && pos.y <= self.floor {
            BlockType::Stone
        } else {
            BlockType::Air
        }
    }
}

proptest! {
    #[test]
    fn hits_stay_within_reach_and_land_on_solid(
        ox in 8.0f32..56.0, oy in 20.0f32..40.0, oz in 8.0f32..56.0,
        dx in -1.0f32..1.0, dz in -1.0f32..1.0,
        reach in 1.0f32..40.0,
    ) {
        let w = Floor { reg: BlockRegistry::builtin(), floor: 10 };
        let dir = Vec3::new(dx, -1.0, dz);
        if let Some(hit) = raycast(&w, Vec3::new(ox, oy, oz), dir, reach) {
            prop_assert!(hit.distance <= reach + 1e-3);
            prop_assert!(hit.block.is_solid());
            prop_assert!(hit.pos.y <= 10);
            if let Some(adj) = hit.adjacent() {
                prop_assert!(!w.block(adj).is_solid() || adj.y <= 10);
            }
        }
    }

    #[test]
    fn straight_down_always_reports_top_face(ox in 2.0f32..62.0, oz in 2.0f32..62.0) {
        let w = Floor { reg: BlockRegistry::builtin(), floor: 10 };
        let hit = raycast(&w, Vec3::new(ox, 20.0, oz), Vec3::DOWN, 20.0).unwrap();
        prop_assert_eq!(hit.pos.y, 10);
        prop_assert_eq!(hit.normal, Some(atoll_geom::Face::PosY));
    }
}
