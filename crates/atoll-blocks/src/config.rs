use std::collections::BTreeMap;

use serde::Deserialize;

/// Partial overrides for the built-in catalog, keyed by block key:
///
/// ```toml
/// [blocks.leaves]
/// break_time = 0.3
/// drops = [{ item = "leaves", count = 1, probability = 0.25 }]
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: BTreeMap<String, BlockOverride>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlockOverride {
    pub name: Option<String>,
    pub solid: Option<bool>,
    pub transparent: Option<bool>,
    pub break_time: Option<f32>,
    pub drops: Option<Vec<DropConfig>>,
    pub color: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DropConfig {
    pub item: String,
    #[serde(default = "default_drop_count")]
    pub count: u32,
    #[serde(default)]
    pub probability: Option<f32>,
}

fn default_drop_count() -> u32 {
    1
}
