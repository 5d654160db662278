use atoll_blocks::BlockType;
use atoll_chunk::Chunk;
use atoll_world::{CHUNK_SIZE, ChunkCoord, WorldGen, WorldGenParams};

fn flat_gen(value: f32) -> WorldGen {
    WorldGen::with_noise(11, WorldGenParams::default(), move |_x: f32, _y: f32| value)
}

#[test]
fn generate_is_idempotent() {
    let g = WorldGen::new(42, WorldGenParams::default());
    let mut c = Chunk::new(ChunkCoord::new(8, 1, 8));
    c.generate(&g);
    assert!(c.is_generated());
    let before = c.blocks().to_vec();
    let spill = c.generate(&g);
    assert!(spill.is_empty());
    assert_eq!(c.blocks(), &before[..]);
}

#[test]
fn generation_is_seed_deterministic() {
    let g = WorldGen::new(1234, WorldGenParams::default());
    let coord = ChunkCoord::new(7, 1, 9);
    let mut a = Chunk::new(coord);
    let mut b = Chunk::new(coord);
    let sa = a.generate(&g);
    let sb = b.generate(&g);
    assert_eq!(a.blocks(), b.blocks());
    assert_eq!(sa, sb);
}

#[test]
fn center_column_scenario() {
    let g = flat_gen(-0.5);
    let mut low = Chunk::new(ChunkCoord::new(8, 0, 8));
    let mut high = Chunk::new(ChunkCoord::new(8, 1, 8));
    low.generate(&g);
    high.generate(&g);

    // world (256, y, 256) is local (0, y mod 32, 0)
    assert_eq!(low.get_local(0, 0, 0), BlockType::Bedrock);
    for y in 1..27 {
        assert_eq!(low.get_local(0, y, 0), BlockType::Stone, "y={y}");
    }
    assert_eq!(high.get_local(0, 8, 0), BlockType::Grass);
    for ly in 1..=7 {
        assert_eq!(high.get_local(0, ly, 0), BlockType::Dirt, "y={}", 32 + ly);
    }
    assert!(matches!(
        high.get_local(0, 9, 0),
        BlockType::Air | BlockType::YellowFlower
    ));
    for ly in 10..CHUNK_SIZE {
        assert_eq!(high.get_local(0, ly, 0), BlockType::Air);
    }
    assert!(!low.blocks().contains(&BlockType::Water));
    assert!(!high.blocks().contains(&BlockType::Water));
    // no trees under this density
    assert!(!high.blocks().contains(&BlockType::Wood));
}

#[test]
fn plants_sit_on_grass_above_sea() {
    let g = flat_gen(-0.5);
    let mut c = Chunk::new(ChunkCoord::new(8, 1, 8));
    c.generate(&g);
    let mut flowers = 0;
    for z in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            let t = c.get_local(x, 9, z);
            if t != BlockType::Air {
                assert_eq!(t, BlockType::YellowFlower);
                assert_eq!(c.get_local(x, 8, z), BlockType::Grass);
                flowers += 1;
            }
        }
    }
    assert!(flowers >= 1 && flowers <= 30, "flowers={flowers}");
}

#[test]
fn trees_spill_into_neighbors() {
    let g = flat_gen(0.9);
    let coord = ChunkCoord::new(8, 1, 8);
    let mut c = Chunk::new(coord);
    let spill = c.generate(&g);
    assert!(!spill.is_empty());
    assert!(spill.iter().all(|p| ChunkCoord::containing_pos(p.pos) != coord));
    assert!(spill.iter().any(|p| p.block == BlockType::Wood && p.pos.y >= 64));
    // trunk base sits right above the grass at local y 30
    assert!((0..CHUNK_SIZE).any(|x| (0..CHUNK_SIZE).any(|z| c.get_local(x, 31, z) == BlockType::Wood)));
}

#[test]
fn chunks_outside_world_stay_empty() {
    let g = WorldGen::new(5, WorldGenParams::default());
    let mut c = Chunk::new(ChunkCoord::new(-1, 0, 3));
    let spill = c.generate(&g);
    assert!(c.is_generated());
    assert!(c.is_all_air());
    assert!(spill.is_empty());
}
