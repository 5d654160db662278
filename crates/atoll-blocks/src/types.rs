use serde::Deserialize;

/// Closed set of volumetric block types. The discriminant is the stable
/// numeric code used by chunk storage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Dirt = 1,
    Grass = 2,
    Stone = 3,
    Water = 4,
    Sand = 5,
    Bedrock = 6,
    Wood = 7,
    Leaves = 8,
    GrassPlant = 9,
    RedFlower = 10,
    YellowFlower = 11,
}

impl BlockType {
    pub const COUNT: usize = 12;

    pub const ALL: [BlockType; BlockType::COUNT] = [
        BlockType::Air,
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Stone,
        BlockType::Water,
        BlockType::Sand,
        BlockType::Bedrock,
        BlockType::Wood,
        BlockType::Leaves,
        BlockType::GrassPlant,
        BlockType::RedFlower,
        BlockType::YellowFlower,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<BlockType> {
        BlockType::ALL.get(id as usize).copied()
    }

    /// Unknown codes resolve to air.
    #[inline]
    pub fn from_id_or_air(id: u8) -> BlockType {
        BlockType::from_id(id).unwrap_or(BlockType::Air)
    }

    /// Snake-case key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Dirt => "dirt",
            BlockType::Grass => "grass",
            BlockType::Stone => "stone",
            BlockType::Water => "water",
            BlockType::Sand => "sand",
            BlockType::Bedrock => "bedrock",
            BlockType::Wood => "wood",
            BlockType::Leaves => "leaves",
            BlockType::GrassPlant => "grass_plant",
            BlockType::RedFlower => "red_flower",
            BlockType::YellowFlower => "yellow_flower",
        }
    }

    pub fn from_key(key: &str) -> Option<BlockType> {
        BlockType::ALL.iter().copied().find(|t| t.key() == key)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockType::Air
    }

    /// Small decorative plants that sit on grass.
    #[inline]
    pub fn is_plant(self) -> bool {
        matches!(
            self,
            BlockType::GrassPlant | BlockType::RedFlower | BlockType::YellowFlower
        )
    }
}

/// Render model a block is drawn with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Model {
    Empty,
    Cube,
    /// Two crossed billboard quads.
    Cross,
    /// Per-face fluid surface.
    Fluid,
}
