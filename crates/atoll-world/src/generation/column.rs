use super::WorldGen;

/// The four terrain channels of a column, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseChannels {
    pub edge: f32,
    pub beach: f32,
    pub base: f32,
    pub ocean_floor: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Inland,
    Beach,
    Ocean,
}

/// Everything the material fill needs to know about one world column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnProfile {
    /// Topmost terrain block.
    pub height: i32,
    pub zone: Zone,
    pub channels: NoiseChannels,
    /// Planar distance from the world center.
    pub distance: f32,
    /// Island radius after edge perturbation.
    pub radius: f32,
}

impl ColumnProfile {
    #[inline]
    pub fn on_island(&self) -> bool {
        self.zone != Zone::Ocean
    }
}

impl WorldGen {
    pub fn channels(&self, wx: i32, wz: i32) -> NoiseChannels {
        let p = &self.params;
        let (x, z) = (wx as f32, wz as f32);
        NoiseChannels {
            edge: self.sample01(x, z, p.edge_scale),
            beach: self.sample01(x, z, p.beach_scale),
            base: self.sample01(x, z, p.base_scale),
            ocean_floor: self.sample01(x, z, p.ocean_floor_scale),
        }
    }

    /// Planar distance of column `(wx, wz)` from the world center.
    pub fn distance_from_center(&self, wx: i32, wz: i32) -> f32 {
        let (cx, cz) = self.params.dims.center_xz();
        (wx as f32 - cx).hypot(wz as f32 - cz)
    }

    /// Classifies a column and computes its terrain height.
    pub fn column(&self, wx: i32, wz: i32) -> ColumnProfile {
        let p = &self.params;
        let ch = self.channels(wx, wz);
        let distance = self.distance_from_center(wx, wz);
        let distortion = p.distortion_base + ch.edge * p.distortion_edge;
        let radius = p.island_radius + (ch.edge - 0.5) * distortion;
        let sea = p.sea_level;

        if distance > radius {
            let height = sea - p.ocean_floor_depth + (ch.ocean_floor * p.ocean_floor_range).floor() as i32;
            return ColumnProfile {
                height,
                zone: Zone::Ocean,
                channels: ch,
                distance,
                radius,
            };
        }

        let outer = radius * (p.beach_outer_base + ch.beach * p.beach_outer_span);
        let inner = radius * (p.beach_inner_base - ch.beach * p.beach_inner_span);
        let falloff_at = radius * p.falloff_start;
        let falloff = if distance > falloff_at {
            (1.0 - (distance - falloff_at) / (radius - falloff_at)).max(0.0)
        } else {
            1.0
        };
        let relief = (p.max_height - sea) as f32;
        let normal = sea + (relief * ch.base * falloff).floor() as i32;

        if distance > inner && distance <= outer {
            let f = (distance - inner) / (outer - inner);
            let beach_height = sea as f32 + (1.0 - f * 2.0) + (ch.beach - 0.5);
            let height = (normal as f32 * (1.0 - f) + beach_height * f).floor() as i32;
            ColumnProfile {
                height,
                zone: Zone::Beach,
                channels: ch,
                distance,
                radius,
            }
        } else {
            ColumnProfile {
                height: normal,
                zone: Zone::Inland,
                channels: ch,
                distance,
                radius,
            }
        }
    }
}
