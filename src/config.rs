use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use atoll_blocks::BlockRegistry;
use atoll_runtime::RuntimeConfig;
use atoll_world::{WorldGenConfig, WorldGenParams};

/// Everything the driver reads from one TOML file: worldgen tables, the
/// `[streaming]`/`[edits]` tables and `[blocks.*]` overrides.
#[derive(Debug)]
pub struct AppConfig {
    pub worldgen: WorldGenParams,
    pub runtime: RuntimeConfig,
    pub registry: BlockRegistry,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            worldgen: WorldGenParams::default(),
            runtime: RuntimeConfig::default(),
            registry: BlockRegistry::builtin(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let wg = WorldGenConfig::from_toml_str(s).context("reading worldgen tables")?;
        let worldgen = WorldGenParams::from_config(&wg);
        worldgen.validate()?;
        let runtime = RuntimeConfig::from_toml_str(s).context("reading runtime tables")?;
        let registry = BlockRegistry::from_toml_str(s).context("reading block overrides")?;
        Ok(Self {
            worldgen,
            runtime,
            registry,
        })
    }

    /// Built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let cfg = Self::from_toml_str(&s).with_context(|| format!("loading {}", path.display()))?;
        log::info!("loaded config {}", path.display());
        Ok(cfg)
    }

    /// Applies a command-line render radius under the same bounds as the file.
    pub fn override_render_radius(&mut self, r: i32) -> Result<()> {
        let mut runtime = self.runtime.clone();
        runtime.streaming.render_radius = r;
        runtime.validate().context("--radius")?;
        self.runtime = runtime;
        Ok(())
    }
}
