use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::WorldDims;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub island: Island,
    #[serde(default)]
    pub noise: NoiseScales,
    #[serde(default)]
    pub beach: Beach,
    #[serde(default)]
    pub materials: Materials,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub plants: Plants,
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_depth")]
    pub depth: i32,
}
fn default_width() -> i32 {
    512
}
fn default_height() -> i32 {
    128
}
fn default_depth() -> i32 {
    512
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            depth: default_depth(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Island {
    /// Diameter of the unperturbed island.
    #[serde(default = "default_island_size")]
    pub size: f32,
    #[serde(default = "default_sea_level")]
    pub sea_level: i32,
    #[serde(default = "default_max_height")]
    pub max_height: i32,
    /// Fraction of the radius after which terrain starts to fall off.
    #[serde(default = "default_falloff_start")]
    pub falloff_start: f32,
    #[serde(default = "default_distortion_base")]
    pub distortion_base: f32,
    #[serde(default = "default_distortion_edge")]
    pub distortion_edge: f32,
    /// Ocean floor sits this far below sea level before noise.
    #[serde(default = "default_ocean_floor_depth")]
    pub ocean_floor_depth: i32,
    #[serde(default = "default_ocean_floor_range")]
    pub ocean_floor_range: f32,
}
fn default_island_size() -> f32 {
    256.0
}
fn default_sea_level() -> i32 {
    32
}
fn default_max_height() -> i32 {
    64
}
fn default_falloff_start() -> f32 {
    0.6
}
fn default_distortion_base() -> f32 {
    5.0
}
fn default_distortion_edge() -> f32 {
    3.0
}
fn default_ocean_floor_depth() -> i32 {
    12
}
fn default_ocean_floor_range() -> f32 {
    8.0
}
impl Default for Island {
    fn default() -> Self {
        Self {
            size: default_island_size(),
            sea_level: default_sea_level(),
            max_height: default_max_height(),
            falloff_start: default_falloff_start(),
            distortion_base: default_distortion_base(),
            distortion_edge: default_distortion_edge(),
            ocean_floor_depth: default_ocean_floor_depth(),
            ocean_floor_range: default_ocean_floor_range(),
        }
    }
}

/// Coordinate divisors for each noise channel.
#[derive(Clone, Debug, Deserialize)]
pub struct NoiseScales {
    #[serde(default = "default_edge_scale")]
    pub edge: f32,
    #[serde(default = "default_beach_scale")]
    pub beach: f32,
    #[serde(default = "default_base_scale")]
    pub base: f32,
    #[serde(default = "default_ocean_floor_scale")]
    pub ocean_floor: f32,
    #[serde(default = "default_tree_density_scale")]
    pub tree_density: f32,
    #[serde(default = "default_plant_scale")]
    pub plant: f32,
}
fn default_edge_scale() -> f32 {
    20.0
}
fn default_beach_scale() -> f32 {
    15.0
}
fn default_base_scale() -> f32 {
    50.0
}
fn default_ocean_floor_scale() -> f32 {
    30.0
}
fn default_tree_density_scale() -> f32 {
    100.0
}
fn default_plant_scale() -> f32 {
    10.0
}
impl Default for NoiseScales {
    fn default() -> Self {
        Self {
            edge: default_edge_scale(),
            beach: default_beach_scale(),
            base: default_base_scale(),
            ocean_floor: default_ocean_floor_scale(),
            tree_density: default_tree_density_scale(),
            plant: default_plant_scale(),
        }
    }
}

/// Beach annulus as fractions of the perturbed radius.
#[derive(Clone, Debug, Deserialize)]
pub struct Beach {
    #[serde(default = "default_outer_base")]
    pub outer_base: f32,
    #[serde(default = "default_outer_span")]
    pub outer_span: f32,
    #[serde(default = "default_inner_base")]
    pub inner_base: f32,
    #[serde(default = "default_inner_span")]
    pub inner_span: f32,
}
fn default_outer_base() -> f32 {
    0.97
}
fn default_outer_span() -> f32 {
    0.06
}
fn default_inner_base() -> f32 {
    0.75
}
fn default_inner_span() -> f32 {
    0.1
}
impl Default for Beach {
    fn default() -> Self {
        Self {
            outer_base: default_outer_base(),
            outer_span: default_outer_span(),
            inner_base: default_inner_base(),
            inner_span: default_inner_span(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Materials {
    /// Solid stone below `sea_level - stone_depth`.
    #[serde(default = "default_stone_depth")]
    pub stone_depth: i32,
    #[serde(default = "default_shallow_stone_chance")]
    pub shallow_stone_chance: f32,
    /// Multiplied by the beach channel.
    #[serde(default = "default_dune_grass_chance")]
    pub dune_grass_chance: f32,
    #[serde(default = "default_shore_sand_chance")]
    pub shore_sand_chance: f32,
    #[serde(default = "default_ocean_sand_base")]
    pub ocean_sand_base: f32,
    #[serde(default = "default_ocean_sand_span")]
    pub ocean_sand_span: f32,
    #[serde(default = "default_ocean_sediment_depth")]
    pub ocean_sediment_depth: i32,
}
fn default_stone_depth() -> i32 {
    5
}
fn default_shallow_stone_chance() -> f32 {
    0.7
}
fn default_dune_grass_chance() -> f32 {
    0.4
}
fn default_shore_sand_chance() -> f32 {
    0.8
}
fn default_ocean_sand_base() -> f32 {
    0.7
}
fn default_ocean_sand_span() -> f32 {
    0.2
}
fn default_ocean_sediment_depth() -> i32 {
    3
}
impl Default for Materials {
    fn default() -> Self {
        Self {
            stone_depth: default_stone_depth(),
            shallow_stone_chance: default_shallow_stone_chance(),
            dune_grass_chance: default_dune_grass_chance(),
            shore_sand_chance: default_shore_sand_chance(),
            ocean_sand_base: default_ocean_sand_base(),
            ocean_sand_span: default_ocean_sand_span(),
            ocean_sediment_depth: default_ocean_sediment_depth(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    #[serde(default = "default_tree_attempts")]
    pub attempts: u32,
    /// Chunks whose base lies more than this above sea level get no trees.
    #[serde(default = "default_tree_band")]
    pub band: i32,
    #[serde(default = "default_tree_island_ratio")]
    pub island_ratio: f32,
    #[serde(default = "default_tree_distortion")]
    pub distortion: f32,
    #[serde(default = "default_density_base")]
    pub density_base: f32,
    #[serde(default = "default_density_span")]
    pub density_span: f32,
    #[serde(default = "default_trunk_min")]
    pub trunk_min: i32,
    /// Trunk height is `trunk_min + [0, trunk_extra)`.
    #[serde(default = "default_trunk_extra")]
    pub trunk_extra: i32,
    #[serde(default = "default_leaf_radius")]
    pub leaf_radius: i32,
}
fn default_tree_attempts() -> u32 {
    6
}
fn default_tree_band() -> i32 {
    30
}
fn default_tree_island_ratio() -> f32 {
    0.8
}
fn default_tree_distortion() -> f32 {
    5.0
}
fn default_density_base() -> f32 {
    0.3
}
fn default_density_span() -> f32 {
    0.3
}
fn default_trunk_min() -> i32 {
    3
}
fn default_trunk_extra() -> i32 {
    3
}
fn default_leaf_radius() -> i32 {
    2
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            attempts: default_tree_attempts(),
            band: default_tree_band(),
            island_ratio: default_tree_island_ratio(),
            distortion: default_tree_distortion(),
            density_base: default_density_base(),
            density_span: default_density_span(),
            trunk_min: default_trunk_min(),
            trunk_extra: default_trunk_extra(),
            leaf_radius: default_leaf_radius(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Plants {
    #[serde(default = "default_plant_attempts")]
    pub attempts: u32,
    #[serde(default = "default_plant_band")]
    pub band: i32,
    #[serde(default = "default_red_below")]
    pub red_below: f32,
    #[serde(default = "default_yellow_below")]
    pub yellow_below: f32,
}
fn default_plant_attempts() -> u32 {
    30
}
fn default_plant_band() -> i32 {
    10
}
fn default_red_below() -> f32 {
    0.2
}
fn default_yellow_below() -> f32 {
    0.35
}
impl Default for Plants {
    fn default() -> Self {
        Self {
            attempts: default_plant_attempts(),
            band: default_plant_band(),
            red_below: default_red_below(),
            yellow_below: default_yellow_below(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub dims: WorldDims,
    pub island_radius: f32,
    pub sea_level: i32,
    pub max_height: i32,
    pub falloff_start: f32,
    pub distortion_base: f32,
    pub distortion_edge: f32,
    pub ocean_floor_depth: i32,
    pub ocean_floor_range: f32,
    pub edge_scale: f32,
    pub beach_scale: f32,
    pub base_scale: f32,
    pub ocean_floor_scale: f32,
    pub tree_density_scale: f32,
    pub plant_scale: f32,
    pub beach_outer_base: f32,
    pub beach_outer_span: f32,
    pub beach_inner_base: f32,
    pub beach_inner_span: f32,
    pub stone_depth: i32,
    pub shallow_stone_chance: f32,
    pub dune_grass_chance: f32,
    pub shore_sand_chance: f32,
    pub ocean_sand_base: f32,
    pub ocean_sand_span: f32,
    pub ocean_sediment_depth: i32,
    pub tree_attempts: u32,
    pub tree_band: i32,
    pub tree_island_ratio: f32,
    pub tree_distortion: f32,
    pub tree_density_base: f32,
    pub tree_density_span: f32,
    pub trunk_min: i32,
    pub trunk_extra: i32,
    pub leaf_radius: i32,
    pub plant_attempts: u32,
    pub plant_band: i32,
    pub red_flower_below: f32,
    pub yellow_flower_below: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            dims: WorldDims::new(cfg.world.width, cfg.world.height, cfg.world.depth),
            island_radius: cfg.island.size / 2.0,
            sea_level: cfg.island.sea_level,
            max_height: cfg.island.max_height,
            falloff_start: cfg.island.falloff_start,
            distortion_base: cfg.island.distortion_base,
            distortion_edge: cfg.island.distortion_edge,
            ocean_floor_depth: cfg.island.ocean_floor_depth,
            ocean_floor_range: cfg.island.ocean_floor_range,
            edge_scale: cfg.noise.edge,
            beach_scale: cfg.noise.beach,
            base_scale: cfg.noise.base,
            ocean_floor_scale: cfg.noise.ocean_floor,
            tree_density_scale: cfg.noise.tree_density,
            plant_scale: cfg.noise.plant,
            beach_outer_base: cfg.beach.outer_base,
            beach_outer_span: cfg.beach.outer_span,
            beach_inner_base: cfg.beach.inner_base,
            beach_inner_span: cfg.beach.inner_span,
            stone_depth: cfg.materials.stone_depth,
            shallow_stone_chance: cfg.materials.shallow_stone_chance,
            dune_grass_chance: cfg.materials.dune_grass_chance,
            shore_sand_chance: cfg.materials.shore_sand_chance,
            ocean_sand_base: cfg.materials.ocean_sand_base,
            ocean_sand_span: cfg.materials.ocean_sand_span,
            ocean_sediment_depth: cfg.materials.ocean_sediment_depth,
            tree_attempts: cfg.trees.attempts,
            tree_band: cfg.trees.band,
            tree_island_ratio: cfg.trees.island_ratio,
            tree_distortion: cfg.trees.distortion,
            tree_density_base: cfg.trees.density_base,
            tree_density_span: cfg.trees.density_span,
            trunk_min: cfg.trees.trunk_min,
            trunk_extra: cfg.trees.trunk_extra,
            leaf_radius: cfg.trees.leaf_radius,
            plant_attempts: cfg.plants.attempts,
            plant_band: cfg.plants.band,
            red_flower_below: cfg.plants.red_below,
            yellow_flower_below: cfg.plants.yellow_below,
        }
    }

    /// Rejects parameter sets the generator cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.dims;
        if d.width <= 0 || d.height <= 0 || d.depth <= 0 {
            return Err(ConfigError::Invalid(format!(
                "world size must be positive, got {}x{}x{}",
                d.width, d.height, d.depth
            )));
        }
        if self.sea_level <= 0 || self.sea_level >= d.height {
            return Err(ConfigError::Invalid(format!(
                "sea_level {} must lie inside (0, {})",
                self.sea_level, d.height
            )));
        }
        if self.max_height < self.sea_level || self.max_height >= d.height {
            return Err(ConfigError::Invalid(format!(
                "max_height {} must lie inside [{}, {})",
                self.max_height, self.sea_level, d.height
            )));
        }
        let scales = [
            self.edge_scale,
            self.beach_scale,
            self.base_scale,
            self.ocean_floor_scale,
            self.tree_density_scale,
            self.plant_scale,
        ];
        if scales.iter().any(|s| *s <= 0.0) {
            return Err(ConfigError::Invalid("noise scales must be positive".into()));
        }
        if self.island_radius <= 0.0 || self.trunk_min < 1 || self.trunk_extra < 1 {
            return Err(ConfigError::Invalid(
                "island size, trunk_min and trunk_extra must be positive".into(),
            ));
        }
        Ok(())
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = WorldGenConfig::from_toml_str(&s)?;
    let params = WorldGenParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}
