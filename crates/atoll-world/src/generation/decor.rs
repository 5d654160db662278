use atoll_blocks::BlockType;
use atoll_geom::BlockPos;
use rand::Rng;

use super::{Placement, WorldGen};
use crate::ChunkCoord;

impl WorldGen {
    fn base_in_band(&self, coord: ChunkCoord, band: i32) -> bool {
        let y = coord.origin().y;
        let sea = self.params.sea_level;
        y >= sea && y <= sea + band
    }

    /// Whether chunks at this height get a tree pass.
    #[inline]
    pub fn trees_in_band(&self, coord: ChunkCoord) -> bool {
        self.base_in_band(coord, self.params.tree_band)
    }

    /// Whether chunks at this height get a plant pass.
    #[inline]
    pub fn plants_in_band(&self, coord: ChunkCoord) -> bool {
        self.base_in_band(coord, self.params.plant_band)
    }

    /// Tree density and island-interior gate for column `(wx, wz)`.
    pub fn tree_site(&self, wx: i32, wz: i32) -> bool {
        let p = &self.params;
        let (x, z) = (wx as f32, wz as f32);
        let edge = self.sample01(x, z, p.edge_scale);
        let density = (self.noise.noise2d(x / p.tree_density_scale, z / p.tree_density_scale) + 1.0)
            * p.tree_density_span
            + p.tree_density_base;
        let radius = p.island_radius + (edge - 0.5) * p.tree_distortion;
        if self.distance_from_center(wx, wz) > radius * p.tree_island_ratio {
            return false;
        }
        edge > 1.0 - density
    }

    pub fn trunk_height<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.params.trunk_min + rng.gen_range(0..self.params.trunk_extra.max(1))
    }

    /// Wood and leaf writes for a tree rooted on the grass block at `ground`.
    /// Trunk first, then the canopy. Canopy layers skip their corner columns,
    /// so a radius-0 layer places nothing, and the wide layers overwrite the
    /// top of the trunk with leaves.
    pub fn tree_blocks(&self, ground: BlockPos, trunk: i32) -> Vec<Placement> {
        let mut out = Vec::new();
        for dy in 1..=trunk {
            out.push(Placement::new(ground.offset(0, dy, 0), BlockType::Wood));
        }
        let start = trunk - 1;
        let top = trunk + 2;
        let wide = self.params.leaf_radius.max(0);
        for dy in start..=top {
            let r = if dy == top {
                0
            } else if dy == start {
                wide
            } else {
                (wide - 1).max(0)
            };
            for dx in -r..=r {
                for dz in -r..=r {
                    if dx.abs() == r && dz.abs() == r {
                        continue;
                    }
                    out.push(Placement::new(ground.offset(dx, dy, dz), BlockType::Leaves));
                }
            }
        }
        out
    }

    /// Plant variant chosen by the plant noise channel at `(wx, wz)`.
    pub fn plant_at(&self, wx: i32, wz: i32) -> BlockType {
        let p = &self.params;
        let n = self.sample01(wx as f32, wz as f32, p.plant_scale);
        if n < p.red_flower_below {
            BlockType::RedFlower
        } else if n < p.yellow_flower_below {
            BlockType::YellowFlower
        } else {
            BlockType::GrassPlant
        }
    }
}
