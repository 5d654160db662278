use atoll_blocks::{BlockType, ItemStack};
use atoll_geom::BlockPos;
use atoll_world::{CHUNK_SIZE, ChunkCoord, VoxelAccess};
use rand::Rng;

use crate::World;

const FACE_NEIGHBORS: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// True when a local coordinate lies on any face of its chunk.
fn on_chunk_face(lx: usize, ly: usize, lz: usize) -> bool {
    let edge = CHUNK_SIZE - 1;
    [lx, ly, lz].iter().any(|&c| c == 0 || c == edge)
}

impl World {
    /// Writes `t` at `(x, y, z)`, generating the owning chunk first. Refuses
    /// positions outside the world, non-bedrock writes on the floor layer and
    /// writes that would not change anything. An edit on a chunk face marks
    /// every existing face-adjacent chunk dirty. Returns whether the block changed.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, t: BlockType) -> bool {
        let pos = BlockPos::new(x, y, z);
        if !self.dims.contains_pos(pos) {
            return false;
        }
        if y == 0 && t != BlockType::Bedrock {
            return false;
        }
        let coord = ChunkCoord::containing_pos(pos);
        self.ensure_generated(coord);
        let (lx, ly, lz) = ChunkCoord::local_of(pos);
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            return false;
        };
        if !chunk.set_local(lx, ly, lz, t) {
            return false;
        }
        if on_chunk_face(lx, ly, lz) {
            for (dx, dy, dz) in FACE_NEIGHBORS {
                if let Some(n) = self.chunks.get_mut(&coord.offset(dx, dy, dz)) {
                    n.mark_dirty();
                }
            }
        }
        log::trace!(target: "edit", "set ({},{},{}) = {}", x, y, z, t.key());
        if t == BlockType::Grass {
            self.maybe_sprout(pos);
        }
        true
    }

    /// Fresh grass with air above may grow a plant.
    fn maybe_sprout(&mut self, grass: BlockPos) {
        let above = grass.above();
        if above.y >= self.dims.height || self.block_type(above) != BlockType::Air {
            return;
        }
        let edits = &self.config.edits;
        if self.rng.gen_range(0.0f32..1.0) >= edits.sprout_chance {
            return;
        }
        let roll = self.rng.gen_range(0.0f32..1.0);
        let plant = if roll < edits.red_flower_below {
            BlockType::RedFlower
        } else if roll < edits.yellow_flower_below {
            BlockType::YellowFlower
        } else {
            BlockType::GrassPlant
        };
        log::debug!(target: "edit", "sprouted {} at ({},{},{})", plant.key(), above.x, above.y, above.z);
        self.set_block(above.x, above.y, above.z, plant);
    }

    /// Breaks the block at `(x, y, z)` and returns what it dropped. A plant
    /// standing on it breaks too and adds its drops. `None` for air,
    /// indestructible blocks and blocks that could not be cleared.
    pub fn break_block(&mut self, x: i32, y: i32, z: i32) -> Option<Vec<ItemStack>> {
        let pos = BlockPos::new(x, y, z);
        let t = self.block_type(pos);
        if t.is_air() || !self.registry.get(t).is_breakable() {
            return None;
        }
        let mut drops = self.registry.roll_drops(t, &mut self.rng);
        if !self.set_block(x, y, z, BlockType::Air) {
            return None;
        }

        let above = pos.above();
        let top = self.block_type(above);
        if top.is_plant() {
            drops.extend(self.registry.roll_drops(top, &mut self.rng));
            self.set_block(above.x, above.y, above.z, BlockType::Air);
        }
        log::debug!(
            target: "edit",
            "broke {} at ({},{},{}) drops={}",
            t.key(),
            x,
            y,
            z,
            drops.len()
        );
        Some(drops)
    }
}
