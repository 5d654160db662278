use crate::types::BlockType;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Sword,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolTier {
    Wood,
    Stone,
    Iron,
    Diamond,
}

impl ToolTier {
    const ALL: [ToolTier; 4] = [ToolTier::Wood, ToolTier::Stone, ToolTier::Iron, ToolTier::Diamond];

    fn rank(self) -> u16 {
        self as u16
    }

    fn name(self) -> &'static str {
        match self {
            ToolTier::Wood => "Wooden",
            ToolTier::Stone => "Stone",
            ToolTier::Iron => "Iron",
            ToolTier::Diamond => "Diamond",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tool {
    pub kind: ToolKind,
    pub tier: ToolTier,
}

impl Tool {
    const FIRST_CODE: u16 = 101;

    #[inline]
    pub const fn new(kind: ToolKind, tier: ToolTier) -> Self {
        Self { kind, tier }
    }

    /// Item code: 101..=112, tier-major, pickaxe/axe/sword within a tier.
    pub fn code(self) -> u16 {
        let k = match self.kind {
            ToolKind::Pickaxe => 0,
            ToolKind::Axe => 1,
            ToolKind::Sword => 2,
        };
        Self::FIRST_CODE + self.tier.rank() * 3 + k
    }

    pub fn from_code(code: u16) -> Option<Tool> {
        let off = code.checked_sub(Self::FIRST_CODE)?;
        let tier = *ToolTier::ALL.get(usize::from(off / 3))?;
        let kind = match off % 3 {
            0 => ToolKind::Pickaxe,
            1 => ToolKind::Axe,
            _ => ToolKind::Sword,
        };
        Some(Tool::new(kind, tier))
    }

    /// Break-speed divisor. Swords do not mine.
    pub fn mining_speed(self) -> Option<f32> {
        if self.kind == ToolKind::Sword {
            return None;
        }
        Some(match self.tier {
            ToolTier::Wood => 2.0,
            ToolTier::Stone => 4.0,
            ToolTier::Iron => 6.0,
            ToolTier::Diamond => 8.0,
        })
    }

    /// Melee damage; only swords carry one.
    pub fn damage(self) -> Option<u32> {
        if self.kind != ToolKind::Sword {
            return None;
        }
        Some(match self.tier {
            ToolTier::Wood => 4,
            ToolTier::Stone => 5,
            ToolTier::Iron => 7,
            ToolTier::Diamond => 10,
        })
    }

    pub fn durability(self) -> u32 {
        match self.tier {
            ToolTier::Wood => 60,
            ToolTier::Stone => 120,
            ToolTier::Iron => 240,
            ToolTier::Diamond => 500,
        }
    }

    /// Extra multiplier when the tool matches the material.
    pub fn affinity(self, block: BlockType) -> f32 {
        match (self.kind, block) {
            (ToolKind::Pickaxe, BlockType::Stone) | (ToolKind::Axe, BlockType::Wood) => 3.0,
            _ => 1.0,
        }
    }

    pub fn name(self) -> String {
        let kind = match self.kind {
            ToolKind::Pickaxe => "Pickaxe",
            ToolKind::Axe => "Axe",
            ToolKind::Sword => "Sword",
        };
        format!("{} {}", self.tier.name(), kind)
    }
}

/// Anything that can sit in an inventory slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    Block(BlockType),
    Tool(Tool),
}

impl Item {
    pub fn code(self) -> u16 {
        match self {
            Item::Block(b) => u16::from(b.id()),
            Item::Tool(t) => t.code(),
        }
    }

    pub fn from_code(code: u16) -> Option<Item> {
        match u8::try_from(code).ok().and_then(BlockType::from_id) {
            Some(b) => Some(Item::Block(b)),
            None => Tool::from_code(code).map(Item::Tool),
        }
    }

    /// Tools do not stack.
    pub fn stack_size(self) -> u32 {
        match self {
            Item::Block(_) => 64,
            Item::Tool(_) => 1,
        }
    }
}
