use atoll_blocks::BlockType;
use rand::Rng;

use super::{ColumnProfile, WorldGen, Zone};

impl WorldGen {
    /// Terrain block at height `wy` of a classified column. Random choices
    /// draw from `rng` only on the branches that need them.
    pub fn block_at<R: Rng + ?Sized>(&self, col: &ColumnProfile, wy: i32, rng: &mut R) -> BlockType {
        let p = &self.params;
        let sea = p.sea_level;
        if wy < 0 || wy >= p.dims.height {
            return BlockType::Air;
        }
        if wy == 0 {
            return BlockType::Bedrock;
        }
        if wy > col.height {
            return if wy <= sea { BlockType::Water } else { BlockType::Air };
        }

        if !col.on_island() {
            if wy < col.height - p.ocean_sediment_depth {
                return BlockType::Stone;
            }
            let sand = p.ocean_sand_base + col.channels.ocean_floor * p.ocean_sand_span;
            return if rng.gen_range(0.0f32..1.0) < sand {
                BlockType::Sand
            } else {
                BlockType::Stone
            };
        }

        if wy < sea - p.stone_depth {
            BlockType::Stone
        } else if wy < sea {
            if rng.gen_range(0.0f32..1.0) < p.shallow_stone_chance {
                BlockType::Stone
            } else {
                BlockType::Dirt
            }
        } else if wy == col.height {
            self.surface_block(col, wy, rng)
        } else {
            BlockType::Dirt
        }
    }

    fn surface_block<R: Rng + ?Sized>(&self, col: &ColumnProfile, wy: i32, rng: &mut R) -> BlockType {
        let p = &self.params;
        let sea = p.sea_level;
        match col.zone {
            Zone::Beach => {
                if wy <= sea {
                    BlockType::Sand
                } else if rng.gen_range(0.0f32..1.0) < col.channels.beach * p.dune_grass_chance {
                    BlockType::Grass
                } else {
                    BlockType::Sand
                }
            }
            _ => {
                if wy <= sea + 1 && rng.gen_range(0.0f32..1.0) < p.shore_sand_chance {
                    BlockType::Sand
                } else {
                    BlockType::Grass
                }
            }
        }
    }
}
