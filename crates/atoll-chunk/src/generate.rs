use atoll_blocks::BlockType;
use atoll_world::{CHUNK_SIZE, Placement, WorldGen};
use rand::Rng;

use crate::{Chunk, MeshState};

impl Chunk {
    /// Fills this chunk from `worldgen`: terrain columns, then trees, then
    /// plants. Tree blocks that land in other chunks are returned for the
    /// caller to place. A generated chunk is left untouched.
    pub fn generate(&mut self, worldgen: &WorldGen) -> Vec<Placement> {
        if self.generated {
            return Vec::new();
        }
        let mut rng = worldgen.chunk_rng(self.coord);
        self.fill_columns(worldgen, &mut rng);
        let spill = self.grow_trees(worldgen, &mut rng);
        self.grow_plants(worldgen, &mut rng);
        self.generated = true;
        self.mesh = MeshState::Dirty;
        log::trace!(
            target: "gen",
            "chunk ({},{},{}) solid={} spill={}",
            self.coord.cx,
            self.coord.cy,
            self.coord.cz,
            self.non_air_count(),
            spill.len()
        );
        spill
    }

    fn fill_columns<R: Rng + ?Sized>(&mut self, worldgen: &WorldGen, rng: &mut R) {
        let dims = worldgen.dims();
        let origin = self.coord.origin();
        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let (wx, wz) = (origin.x + lx as i32, origin.z + lz as i32);
                if !dims.contains(wx, 0, wz) {
                    continue;
                }
                let col = worldgen.column(wx, wz);
                for ly in 0..CHUNK_SIZE {
                    let t = worldgen.block_at(&col, origin.y + ly as i32, rng);
                    if t != BlockType::Air {
                        self.blocks[Self::local_to_index(lx, ly, lz)] = t;
                    }
                }
            }
        }
    }

    fn grow_trees<R: Rng + ?Sized>(&mut self, worldgen: &WorldGen, rng: &mut R) -> Vec<Placement> {
        let mut spill = Vec::new();
        if !worldgen.trees_in_band(self.coord) {
            return spill;
        }
        let dims = worldgen.dims();
        for _ in 0..worldgen.params().tree_attempts {
            let lx = rng.gen_range(0..CHUNK_SIZE);
            let lz = rng.gen_range(0..CHUNK_SIZE);
            let ground = self.coord.world_of(lx, 0, lz);
            if !worldgen.tree_site(ground.x, ground.z) {
                continue;
            }
            let Some(sy) = self.surface_grass(lx, lz) else {
                continue;
            };
            let ground = self.coord.world_of(lx, sy, lz);
            let trunk = worldgen.trunk_height(rng);
            for p in worldgen.tree_blocks(ground, trunk) {
                if !self.contains_world(p.pos) {
                    spill.push(p);
                } else if dims.contains_pos(p.pos) && p.pos.y != 0 {
                    self.set_world(p.pos, p.block);
                }
            }
        }
        spill
    }

    fn grow_plants<R: Rng + ?Sized>(&mut self, worldgen: &WorldGen, rng: &mut R) {
        if !worldgen.plants_in_band(self.coord) {
            return;
        }
        let dims = worldgen.dims();
        let sea = worldgen.sea_level();
        for _ in 0..worldgen.params().plant_attempts {
            let lx = rng.gen_range(0..CHUNK_SIZE);
            let lz = rng.gen_range(0..CHUNK_SIZE);
            let Some(sy) = self.surface_grass(lx, lz) else {
                continue;
            };
            let above = sy + 1;
            if above >= CHUNK_SIZE {
                continue;
            }
            let pos = self.coord.world_of(lx, above, lz);
            if pos.y < dims.height && pos.y > sea && self.get_local(lx, above, lz) == BlockType::Air {
                let plant = worldgen.plant_at(pos.x, pos.z);
                self.set_local(lx, above, lz, plant);
            }
        }
    }
}
