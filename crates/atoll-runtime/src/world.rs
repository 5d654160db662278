use std::sync::Arc;

use atoll_blocks::{Block, BlockRegistry, BlockType};
use atoll_chunk::{Chunk, ChunkMesh};
use atoll_geom::{BlockPos, Vec3};
use atoll_mesh::build_chunk_mesh;
use atoll_query::{Contact, RayHit, SpawnSite};
use atoll_world::{ChunkCoord, NoiseSource, Placement, VoxelAccess, WorldDims, WorldGen, WorldGenParams};
use hashbrown::{HashMap, HashSet};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::RuntimeConfig;

/// Owns every chunk touched during a session. Chunks are created on first
/// request and never dropped; streaming only releases their meshes.
pub struct World {
    pub(crate) dims: WorldDims,
    pub(crate) worldgen: WorldGen,
    pub(crate) registry: Arc<BlockRegistry>,
    pub(crate) config: RuntimeConfig,
    pub(crate) chunks: HashMap<ChunkCoord, Chunk>,
    /// Decoration writes waiting for their chunk to be generated.
    pub(crate) pending: HashMap<ChunkCoord, Vec<Placement>>,
    /// Chunks whose mesh has been handed out and not yet released.
    pub(crate) rendered: HashSet<ChunkCoord>,
    pub(crate) rng: ChaCha12Rng,
}

impl World {
    pub fn new(seed: u64, params: WorldGenParams, registry: Arc<BlockRegistry>, config: RuntimeConfig) -> Self {
        Self::from_worldgen(WorldGen::new(seed, params), registry, config)
    }

    pub fn with_noise(
        seed: u64,
        params: WorldGenParams,
        noise: impl NoiseSource + 'static,
        registry: Arc<BlockRegistry>,
        config: RuntimeConfig,
    ) -> Self {
        Self::from_worldgen(WorldGen::with_noise(seed, params, noise), registry, config)
    }

    pub fn from_worldgen(worldgen: WorldGen, registry: Arc<BlockRegistry>, config: RuntimeConfig) -> Self {
        let rng = ChaCha12Rng::seed_from_u64(worldgen.seed());
        Self {
            dims: worldgen.dims(),
            worldgen,
            registry,
            config,
            chunks: HashMap::new(),
            pending: HashMap::new(),
            rendered: HashSet::new(),
            rng,
        }
    }

    #[inline]
    pub fn worldgen(&self) -> &WorldGen {
        &self.worldgen
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.worldgen.seed()
    }

    #[inline]
    pub fn sea_level(&self) -> i32 {
        self.worldgen.sea_level()
    }

    /// Number of allocated chunks.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn rendered(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.rendered.iter().copied()
    }

    #[inline]
    pub fn is_rendered(&self, coord: ChunkCoord) -> bool {
        self.rendered.contains(&coord)
    }

    /// Placements waiting on `coord` to be generated.
    pub fn pending_for(&self, coord: ChunkCoord) -> &[Placement] {
        self.pending.get(&coord).map_or(&[][..], Vec::as_slice)
    }

    /// The chunk at `coord` if it was ever allocated.
    #[inline]
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Returns the chunk at `coord`, allocating an all-air chunk on first use
    /// and generating it when `generate` is set.
    pub fn get_chunk(&mut self, coord: ChunkCoord, generate: bool) -> &Chunk {
        if generate {
            self.ensure_generated(coord);
        }
        self.chunks.entry(coord).or_insert_with(|| Chunk::new(coord))
    }

    pub(crate) fn ensure_generated(&mut self, coord: ChunkCoord) {
        let chunk = self.chunks.entry(coord).or_insert_with(|| Chunk::new(coord));
        if chunk.is_generated() {
            return;
        }
        let spill = chunk.generate(&self.worldgen);
        if let Some(waiting) = self.pending.remove(&coord) {
            log::trace!(
                target: "gen",
                "applying {} pending placements to ({},{},{})",
                waiting.len(),
                coord.cx,
                coord.cy,
                coord.cz
            );
            for p in waiting {
                chunk.set_world(p.pos, p.block);
            }
        }
        self.place_spill(spill);
    }

    /// Routes decoration that left its chunk: written now when the target is
    /// already generated, otherwise held until it is.
    fn place_spill(&mut self, spill: Vec<Placement>) {
        for p in spill {
            if !self.dims.contains_pos(p.pos) || p.pos.y == 0 {
                continue;
            }
            let target = ChunkCoord::containing_pos(p.pos);
            let generated = self.chunks.get(&target).is_some_and(Chunk::is_generated);
            if generated {
                self.set_block(p.pos.x, p.pos.y, p.pos.z, p.block);
            } else {
                self.pending.entry(target).or_default().push(p);
            }
        }
    }

    /// Descriptor of the block at `(x, y, z)`. Air outside the world and in
    /// chunks never allocated; never allocates.
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Block<'_> {
        self.block(BlockPos::new(x, y, z))
    }

    /// Current mesh for `coord`, rebuilding it first if it is stale or was
    /// released. `None` outside the world.
    pub fn mesh(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkMesh>> {
        if !self.dims.contains_chunk(coord) {
            return None;
        }
        self.ensure_generated(coord);
        let chunk = self.chunks.get(&coord)?;
        if let Some(mesh) = chunk.mesh() {
            let mesh = Arc::clone(mesh);
            self.rendered.insert(coord);
            return Some(mesh);
        }
        self.remesh(coord)
    }

    pub(crate) fn remesh(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkMesh>> {
        let chunk = self.chunks.get(&coord)?;
        let mesh = Arc::new(build_chunk_mesh(chunk, &*self));
        log::trace!(
            target: "mesh",
            "stored mesh ({},{},{}) instances={}",
            coord.cx,
            coord.cy,
            coord.cz,
            mesh.instance_count()
        );
        self.chunks.get_mut(&coord)?.store_mesh(Arc::clone(&mesh));
        self.rendered.insert(coord);
        Some(mesh)
    }

    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<'_>> {
        atoll_query::raycast(self, origin, direction, max_distance)
    }

    pub fn collision(&self, center: Vec3, half_extents: Vec3) -> Vec<Contact<'_>> {
        atoll_query::collision(self, center, half_extents)
    }

    /// Spawn search over the chunks generated so far.
    pub fn find_spawn(&self) -> SpawnSite {
        atoll_query::find_safe_spawn(self, self.sea_level())
    }
}

impl VoxelAccess for World {
    #[inline]
    fn dims(&self) -> WorldDims {
        self.dims
    }

    #[inline]
    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    fn block_type(&self, pos: BlockPos) -> BlockType {
        if !self.dims.contains_pos(pos) {
            return BlockType::Air;
        }
        self.chunks
            .get(&ChunkCoord::containing_pos(pos))
            .and_then(|c| c.get_world(pos))
            .unwrap_or(BlockType::Air)
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("dims", &self.dims)
            .field("seed", &self.worldgen.seed())
            .field("chunks", &self.chunks.len())
            .field("pending", &self.pending.len())
            .field("rendered", &self.rendered.len())
            .finish()
    }
}
