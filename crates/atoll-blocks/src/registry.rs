use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;

use crate::config::{BlockOverride, BlocksConfig};
use crate::item::Tool;
use crate::types::{BlockType, Model};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown block `{0}`")]
    UnknownBlock(String),
    #[error("drop probability {value} for `{block}` is outside [0, 1]")]
    InvalidProbability { block: String, value: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DropRule {
    pub item: BlockType,
    pub count: u32,
    /// `None` drops every time.
    pub probability: Option<f32>,
}

impl DropRule {
    pub const fn always(item: BlockType) -> Self {
        Self {
            item,
            count: 1,
            probability: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item: BlockType,
    pub count: u32,
}

/// Damage dealt periodically while in contact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hazard {
    pub damage: u32,
    pub interval_secs: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockProps {
    pub name: String,
    pub solid: bool,
    pub transparent: bool,
    /// Seconds to break by hand; negative means indestructible.
    pub break_time: f32,
    pub drops: Vec<DropRule>,
    pub model: Model,
    pub color: u32,
    pub hazard: Option<Hazard>,
}

impl BlockProps {
    fn new(name: &str, solid: bool, transparent: bool, break_time: f32, model: Model, color: u32) -> Self {
        Self {
            name: name.to_string(),
            solid,
            transparent,
            break_time,
            drops: Vec::new(),
            model,
            color,
            hazard: None,
        }
    }

    fn dropping(mut self, rule: DropRule) -> Self {
        self.drops.push(rule);
        self
    }

    #[inline]
    pub fn is_breakable(&self) -> bool {
        self.break_time >= 0.0
    }
}

/// A block type paired with its catalog entry.
#[derive(Copy, Clone, Debug)]
pub struct Block<'r> {
    pub id: BlockType,
    pub props: &'r BlockProps,
}

impl<'r> Block<'r> {
    #[inline]
    pub fn is_air(&self) -> bool {
        self.id.is_air()
    }
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.props.solid
    }
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.props.transparent
    }
    #[inline]
    pub fn break_time(&self) -> f32 {
        self.props.break_time
    }
    #[inline]
    pub fn drops(&self) -> &'r [DropRule] {
        let props: &'r BlockProps = self.props;
        &props.drops
    }
    #[inline]
    pub fn model(&self) -> Model {
        self.props.model
    }
    #[inline]
    pub fn hazard(&self) -> Option<Hazard> {
        self.props.hazard
    }
}

/// Static, read-only table of block properties indexed by `BlockType`.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    props: Vec<BlockProps>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BlockRegistry {
    pub fn builtin() -> Self {
        use BlockType as T;
        let plant = |name: &str, t: T, color: u32| {
            BlockProps::new(name, false, true, 0.1, Model::Cross, color).dropping(DropRule::always(t))
        };
        let mut water = BlockProps::new("Water", false, true, 0.0, Model::Fluid, 0x3333DD);
        water.hazard = Some(Hazard {
            damage: 20,
            interval_secs: 1.0,
        });
        let props = vec![
            BlockProps::new("Air", false, true, 0.0, Model::Empty, 0xFFFFFF),
            BlockProps::new("Dirt", true, false, 0.5, Model::Cube, 0x8B4513).dropping(DropRule::always(T::Dirt)),
            BlockProps::new("Grass", true, false, 0.6, Model::Cube, 0x3BB446).dropping(DropRule::always(T::Dirt)),
            BlockProps::new("Stone", true, false, 1.5, Model::Cube, 0x808080).dropping(DropRule::always(T::Stone)),
            water,
            BlockProps::new("Sand", true, false, 0.5, Model::Cube, 0xEEDD77).dropping(DropRule::always(T::Sand)),
            BlockProps::new("Bedrock", true, false, -1.0, Model::Cube, 0x333333),
            BlockProps::new("Wood", true, false, 2.0, Model::Cube, 0x926239).dropping(DropRule::always(T::Wood)),
            BlockProps::new("Leaves", true, true, 0.2, Model::Cube, 0x125B27).dropping(DropRule {
                item: T::Leaves,
                count: 1,
                probability: Some(0.1),
            }),
            plant("Grass Plant", T::GrassPlant, 0x7EC850),
            plant("Red Flower", T::RedFlower, 0xFF3333),
            plant("Yellow Flower", T::YellowFlower, 0xFFFF00),
        ];
        debug_assert_eq!(props.len(), BlockType::COUNT);
        Self { props }
    }

    /// Built-in catalog with `[blocks.<key>]` overrides applied.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        let mut reg = Self::builtin();
        reg.apply_overrides(&cfg)?;
        Ok(reg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn apply_overrides(&mut self, cfg: &BlocksConfig) -> Result<(), RegistryError> {
        for (key, ov) in &cfg.blocks {
            let t = BlockType::from_key(key).ok_or_else(|| RegistryError::UnknownBlock(key.clone()))?;
            let drops = match &ov.drops {
                Some(list) => Some(resolve_drops(key, list)?),
                None => None,
            };
            apply_override(&mut self.props[t.index()], ov, drops);
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, t: BlockType) -> &BlockProps {
        &self.props[t.index()]
    }

    #[inline]
    pub fn describe(&self, t: BlockType) -> Block<'_> {
        Block {
            id: t,
            props: self.get(t),
        }
    }

    /// Unknown codes describe as air.
    #[inline]
    pub fn describe_id(&self, id: u8) -> Block<'_> {
        self.describe(BlockType::from_id_or_air(id))
    }

    /// Rolls the drop table of `t`. Entries with a probability are kept only
    /// when the roll passes.
    pub fn roll_drops<R: Rng + ?Sized>(&self, t: BlockType, rng: &mut R) -> Vec<ItemStack> {
        self.get(t)
            .drops
            .iter()
            .filter(|d| match d.probability {
                Some(p) => rng.gen_range(0.0f32..1.0) < p,
                None => true,
            })
            .map(|d| ItemStack {
                item: d.item,
                count: d.count,
            })
            .collect()
    }

    /// Seconds needed to break `t` with `tool` in hand; `None` if it cannot be broken.
    pub fn break_time_with(&self, t: BlockType, tool: Option<Tool>) -> Option<f32> {
        let props = self.get(t);
        if t.is_air() || !props.is_breakable() {
            return None;
        }
        let speed = tool
            .and_then(|tool| tool.mining_speed().map(|s| s * tool.affinity(t)))
            .unwrap_or(1.0);
        Some(props.break_time / speed)
    }
}

fn resolve_drops(key: &str, list: &[crate::config::DropConfig]) -> Result<Vec<DropRule>, RegistryError> {
    list.iter()
        .map(|d| {
            let item = BlockType::from_key(&d.item).ok_or_else(|| RegistryError::UnknownBlock(d.item.clone()))?;
            if let Some(p) = d.probability.filter(|p| !(0.0..=1.0).contains(p)) {
                return Err(RegistryError::InvalidProbability {
                    block: key.to_string(),
                    value: p,
                });
            }
            Ok(DropRule {
                item,
                count: d.count,
                probability: d.probability,
            })
        })
        .collect()
}

fn apply_override(props: &mut BlockProps, ov: &BlockOverride, drops: Option<Vec<DropRule>>) {
    if let Some(name) = &ov.name {
        props.name = name.clone();
    }
    if let Some(v) = ov.solid {
        props.solid = v;
    }
    if let Some(v) = ov.transparent {
        props.transparent = v;
    }
    if let Some(v) = ov.break_time {
        props.break_time = v;
    }
    if let Some(v) = ov.color {
        props.color = v;
    }
    if let Some(d) = drops {
        props.drops = d;
    }
}
