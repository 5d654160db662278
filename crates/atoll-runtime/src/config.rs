use atoll_world::ConfigError;
use serde::Deserialize;

/// Largest streaming radius, in chunks, accepted by `validate`.
pub const MAX_RADIUS: i32 = 1024;

/// Session tunables read from the `[streaming]` and `[edits]` tables.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub streaming: Streaming,
    #[serde(default)]
    pub edits: Edits,
}

impl RuntimeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.streaming;
        for (name, v) in [
            ("render_radius", s.render_radius),
            ("unload_margin", s.unload_margin),
            ("initial_radius", s.initial_radius),
        ] {
            if !(0..=MAX_RADIUS).contains(&v) {
                return Err(ConfigError::Invalid(format!(
                    "streaming.{name} = {v} is outside [0, {MAX_RADIUS}]"
                )));
            }
        }
        if s.max_remesh_per_tick == 0 {
            return Err(ConfigError::Invalid(
                "streaming.max_remesh_per_tick must be at least 1".to_string(),
            ));
        }
        let e = &self.edits;
        for (name, v) in [
            ("sprout_chance", e.sprout_chance),
            ("red_flower_below", e.red_flower_below),
            ("yellow_flower_below", e.yellow_flower_below),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!("edits.{name} = {v} is outside [0, 1]")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Streaming {
    /// Planar radius, in chunks, of the columns kept meshed around the viewer.
    #[serde(default = "default_render_radius")]
    pub render_radius: i32,
    /// Extra chunks past the render radius before a mesh is released.
    #[serde(default = "default_unload_margin")]
    pub unload_margin: i32,
    #[serde(default = "default_max_remesh_per_tick")]
    pub max_remesh_per_tick: usize,
    /// Radius generated up front by `World::generate_initial_chunks`.
    #[serde(default = "default_initial_radius")]
    pub initial_radius: i32,
}
fn default_render_radius() -> i32 {
    2
}
fn default_unload_margin() -> i32 {
    2
}
fn default_max_remesh_per_tick() -> usize {
    2
}
fn default_initial_radius() -> i32 {
    6
}

impl Default for Streaming {
    fn default() -> Self {
        Self {
            render_radius: default_render_radius(),
            unload_margin: default_unload_margin(),
            max_remesh_per_tick: default_max_remesh_per_tick(),
            initial_radius: default_initial_radius(),
        }
    }
}

/// Vegetation that may sprout on freshly placed grass.
#[derive(Clone, Debug, Deserialize)]
pub struct Edits {
    #[serde(default = "default_sprout_chance")]
    pub sprout_chance: f32,
    #[serde(default = "default_red_flower_below")]
    pub red_flower_below: f32,
    #[serde(default = "default_yellow_flower_below")]
    pub yellow_flower_below: f32,
}
fn default_sprout_chance() -> f32 {
    0.05
}
fn default_red_flower_below() -> f32 {
    0.1
}
fn default_yellow_flower_below() -> f32 {
    0.2
}

impl Default for Edits {
    fn default() -> Self {
        Self {
            sprout_chance: default_sprout_chance(),
            red_flower_below: default_red_flower_below(),
            yellow_flower_below: default_yellow_flower_below(),
        }
    }
}
