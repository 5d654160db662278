use atoll_blocks::{
    BlockRegistry, BlockType, DropRule, Item, ItemStack, Model, RegistryError, Tool, ToolKind,
    ToolTier,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

#[test]
fn builtin_catalog_properties() {
    let reg = BlockRegistry::builtin();
    let air = reg.describe(BlockType::Air);
    assert!(air.is_air() && !air.is_solid() && air.is_transparent());
    assert_eq!(air.model(), Model::Empty);

    let water = reg.get(BlockType::Water);
    assert!(!water.solid && water.transparent);
    assert_eq!(water.model, Model::Fluid);
    let hazard = water.hazard.expect("water hurts");
    assert_eq!(hazard.damage, 20);
    assert_eq!(hazard.interval_secs, 1.0);

    let leaves = reg.describe(BlockType::Leaves);
    assert!(leaves.is_solid() && leaves.is_transparent());
    assert_eq!(leaves.drops()[0].probability, Some(0.1));

    assert!(!reg.get(BlockType::Bedrock).is_breakable());
    assert!(reg.get(BlockType::Bedrock).drops.is_empty());
    assert_eq!(reg.get(BlockType::Grass).drops, vec![DropRule::always(BlockType::Dirt)]);

    for t in [BlockType::GrassPlant, BlockType::RedFlower, BlockType::YellowFlower] {
        let p = reg.get(t);
        assert_eq!(p.model, Model::Cross);
        assert!(!p.solid && p.transparent);
        assert_eq!(p.drops, vec![DropRule::always(t)]);
    }
}

#[test]
fn unknown_codes_describe_as_air() {
    let reg = BlockRegistry::builtin();
    assert_eq!(reg.describe_id(200).id, BlockType::Air);
    assert_eq!(reg.describe_id(3).id, BlockType::Stone);
    for t in BlockType::ALL {
        assert_eq!(BlockType::from_id(t.id()), Some(t));
        assert_eq!(BlockType::from_key(t.key()), Some(t));
    }
}

#[test]
fn drop_rolls_respect_probability() {
    let mut reg = BlockRegistry::builtin();
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    assert_eq!(
        reg.roll_drops(BlockType::Stone, &mut rng),
        vec![ItemStack { item: BlockType::Stone, count: 1 }]
    );
    assert!(reg.roll_drops(BlockType::Bedrock, &mut rng).is_empty());

    reg = BlockRegistry::from_toml_str(
        r#"
        [blocks.leaves]
        drops = [{ item = "leaves", probability = 0.0 }]
        [blocks.wood]
        drops = [{ item = "wood", count = 2, probability = 1.0 }]
        "#,
    )
    .unwrap();
    for _ in 0..100 {
        assert!(reg.roll_drops(BlockType::Leaves, &mut rng).is_empty());
        assert_eq!(
            reg.roll_drops(BlockType::Wood, &mut rng),
            vec![ItemStack { item: BlockType::Wood, count: 2 }]
        );
    }
}

#[test]
fn leaves_drop_roughly_one_in_ten() {
    let reg = BlockRegistry::builtin();
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let hits = (0..10_000)
        .filter(|_| !reg.roll_drops(BlockType::Leaves, &mut rng).is_empty())
        .count();
    assert!((700..1300).contains(&hits), "hits={hits}");
}

#[test]
fn overrides_patch_only_named_fields() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        [blocks.sand]
        break_time = 0.25
        color = 0x112233
        "#,
    )
    .unwrap();
    let sand = reg.get(BlockType::Sand);
    assert_eq!(sand.break_time, 0.25);
    assert_eq!(sand.color, 0x112233);
    assert!(sand.solid);
    assert_eq!(sand.name, "Sand");
}

#[test]
fn override_errors_are_reported() {
    let err = BlockRegistry::from_toml_str("[blocks.marble]\nsolid = true\n").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownBlock(ref k) if k == "marble"));

    let err = BlockRegistry::from_toml_str(
        "[blocks.dirt]\ndrops = [{ item = \"dirt\", probability = 1.5 }]\n",
    )
    .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidProbability { .. }));

    let err = BlockRegistry::from_toml_str("[blocks.dirt\n").unwrap_err();
    assert!(matches!(err, RegistryError::Parse(_)));
}

#[test]
fn tool_codes_and_stats() {
    let pick = Tool::new(ToolKind::Pickaxe, ToolTier::Wood);
    assert_eq!(pick.code(), 101);
    let sword = Tool::new(ToolKind::Sword, ToolTier::Diamond);
    assert_eq!(sword.code(), 112);
    assert_eq!(sword.damage(), Some(10));
    assert_eq!(sword.mining_speed(), None);
    assert_eq!(Tool::new(ToolKind::Axe, ToolTier::Iron).code(), 108);
    assert_eq!(Tool::new(ToolKind::Axe, ToolTier::Iron).durability(), 240);
    for code in 101..=112u16 {
        assert_eq!(Tool::from_code(code).map(Tool::code), Some(code));
    }
    assert_eq!(Tool::from_code(113), None);
    assert_eq!(Item::from_code(2), Some(Item::Block(BlockType::Grass)));
    assert_eq!(Item::from_code(104), Some(Item::Tool(Tool::new(ToolKind::Pickaxe, ToolTier::Stone))));
    assert_eq!(Item::from_code(50), None);
    assert_eq!(Tool::new(ToolKind::Pickaxe, ToolTier::Iron).name(), "Iron Pickaxe");
}

#[test]
fn break_time_uses_tool_speed_and_affinity() {
    let reg = BlockRegistry::builtin();
    let stone_pick = Tool::new(ToolKind::Pickaxe, ToolTier::Stone);
    // 1.5 / (4 * 3)
    assert_eq!(reg.break_time_with(BlockType::Stone, Some(stone_pick)), Some(0.125));
    // no affinity on dirt: 0.5 / 4
    assert_eq!(reg.break_time_with(BlockType::Dirt, Some(stone_pick)), Some(0.125));
    let wood_axe = Tool::new(ToolKind::Axe, ToolTier::Wood);
    assert_eq!(reg.break_time_with(BlockType::Wood, Some(wood_axe)), Some(2.0 / 6.0));
    let sword = Tool::new(ToolKind::Sword, ToolTier::Iron);
    assert_eq!(reg.break_time_with(BlockType::Stone, Some(sword)), Some(1.5));
    assert_eq!(reg.break_time_with(BlockType::Stone, None), Some(1.5));
    assert_eq!(reg.break_time_with(BlockType::Bedrock, Some(stone_pick)), None);
    assert_eq!(reg.break_time_with(BlockType::Air, None), None);
}
