use std::f32::consts::PI;
use std::fmt;

use atoll_blocks::{BlockType, ItemStack};
use atoll_geom::{BlockPos, Vec3};
use atoll_query::{DEFAULT_REACH, SpawnSite};
use atoll_runtime::World;
use atoll_world::VoxelAccess;

const EYE_HEIGHT: f32 = 1.6;
/// Radians the walk direction turns each tick.
const TURN_RATE: f32 = 0.02;
const BORDER: f32 = 2.0;
/// Height above the viewer that ground following starts looking from.
const GROUND_LOOKUP: f32 = 8.0;
/// Simulated milliseconds per streaming tick.
const TICK_MS: u32 = 50;

/// A block broken at the end of a run.
#[derive(Debug)]
pub struct Broken {
    pub pos: BlockPos,
    pub block: BlockType,
    pub drops: Vec<ItemStack>,
}

#[derive(Debug, Default)]
pub struct SimSummary {
    pub ticks: u32,
    pub remeshed: usize,
    pub unloaded: usize,
    pub max_deferred: usize,
    pub chunks: usize,
    pub rendered: usize,
    pub spawn: Option<SpawnSite>,
    pub broken: Option<Broken>,
    /// Damage taken from hazardous blocks at the viewer's feet.
    pub hazard_damage: u32,
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks={} remeshed={} unloaded={} max_deferred={} chunks={} rendered={}",
            self.ticks, self.remeshed, self.unloaded, self.max_deferred, self.chunks, self.rendered
        )?;
        if self.hazard_damage > 0 {
            write!(f, " hazard_damage={}", self.hazard_damage)?;
        }
        if let Some(b) = &self.broken {
            let items: Vec<String> = b
                .drops
                .iter()
                .map(|s| format!("{}x{}", s.item.key(), s.count))
                .collect();
            write!(
                f,
                " broke {} at ({},{},{}) drops=[{}]",
                b.block.key(),
                b.pos.x,
                b.pos.y,
                b.pos.z,
                items.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Walks a viewer over the island, streaming chunks around it every tick.
pub struct Simulation {
    world: World,
    viewer: Vec3,
    heading: f32,
    spawn: SpawnSite,
    /// Milliseconds spent in the current hazard since it last dealt damage.
    exposure_ms: u32,
}

impl Simulation {
    /// Bootstraps the center of the world and places the viewer at the spawn.
    pub fn new(mut world: World, initial_radius: i32) -> Self {
        world.generate_initial_chunks(initial_radius);
        let spawn = world.find_spawn();
        if spawn.safe {
            log::info!(target: "spawn", "spawn at ({},{},{})", spawn.feet.x, spawn.feet.y, spawn.feet.z);
        } else {
            log::warn!(target: "spawn", "unsafe spawn at ({},{},{})", spawn.feet.x, spawn.feet.y, spawn.feet.z);
        }
        let viewer = spawn.feet.center() + Vec3::new(0.0, EYE_HEIGHT, 0.0);
        Self {
            world,
            viewer,
            heading: 0.0,
            spawn,
            exposure_ms: 0,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn viewer(&self) -> Vec3 {
        self.viewer
    }

    fn step(&mut self, speed: f32) {
        let dims = self.world.dims();
        self.heading += TURN_RATE;
        let dir = Vec3::new(self.heading.cos(), 0.0, self.heading.sin());
        let mut next = self.viewer + dir * speed;
        let (max_x, max_z) = (dims.width as f32 - BORDER, dims.depth as f32 - BORDER);
        if next.x < BORDER || next.z < BORDER || next.x > max_x || next.z > max_z {
            self.heading += PI;
            next = Vec3::new(
                next.x.clamp(BORDER, max_x),
                next.y,
                next.z.clamp(BORDER, max_z),
            );
        }

        let from = Vec3::new(next.x, (next.y + GROUND_LOOKUP).min(dims.height as f32 - 1.0), next.z);
        if let Some(hit) = self.world.raycast(from, Vec3::DOWN, 2.0 * GROUND_LOOKUP) {
            next.y = hit.pos.y as f32 + 1.0 + EYE_HEIGHT;
        }
        self.viewer = next;
    }

    /// Advances hazard exposure by one tick and returns the damage dealt.
    fn feel_hazard(&mut self) -> u32 {
        let feet = BlockPos::round(self.viewer - Vec3::new(0.0, EYE_HEIGHT, 0.0));
        let Some(hazard) = self.world.get_block(feet.x, feet.y, feet.z).hazard() else {
            self.exposure_ms = 0;
            return 0;
        };
        let interval_ms = (hazard.interval_secs * 1000.0).round().max(0.0) as u32;
        if interval_ms == 0 {
            return hazard.damage;
        }
        self.exposure_ms += TICK_MS;
        let mut damage = 0;
        while self.exposure_ms >= interval_ms {
            self.exposure_ms -= interval_ms;
            damage += hazard.damage;
        }
        if damage > 0 {
            log::debug!(target: "spawn", "viewer took {} damage at ({},{},{})", damage, feet.x, feet.y, feet.z);
        }
        damage
    }

    /// Runs `ticks` streaming ticks moving `speed` blocks per tick, then
    /// breaks the block under the viewer.
    pub fn run(&mut self, ticks: u32, speed: f32) -> SimSummary {
        let mut summary = SimSummary {
            spawn: Some(self.spawn),
            ..SimSummary::default()
        };
        for tick in 0..ticks {
            self.step(speed);
            let report = self.world.update_chunks_around(self.viewer);
            summary.ticks += 1;
            summary.remeshed += report.remeshed.len();
            summary.unloaded += report.unloaded.len();
            summary.max_deferred = summary.max_deferred.max(report.deferred.len());
            summary.hazard_damage += self.feel_hazard();
            if !report.is_idle() {
                log::debug!(
                    target: "stream",
                    "tick={} viewer=({:.1},{:.1},{:.1}) remeshed={} deferred={} unloaded={}",
                    tick,
                    self.viewer.x,
                    self.viewer.y,
                    self.viewer.z,
                    report.remeshed.len(),
                    report.deferred.len(),
                    report.unloaded.len()
                );
            }
        }

        let target = self
            .world
            .raycast(self.viewer, Vec3::DOWN, DEFAULT_REACH)
            .map(|hit| (hit.pos, hit.block.id));
        summary.broken = target.and_then(|(pos, block)| {
            let drops = self.world.break_block(pos.x, pos.y, pos.z)?;
            Some(Broken { pos, block, drops })
        });
        if summary.broken.is_none() {
            log::info!(target: "edit", "nothing breakable below the viewer");
        }
        summary.chunks = self.world.chunk_count();
        summary.rendered = self.world.rendered().count();
        summary
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use atoll_blocks::BlockRegistry;
    use atoll_runtime::RuntimeConfig;
    use atoll_world::WorldGenParams;

    use super::*;

    fn flat_world() -> World {
        let mut cfg = RuntimeConfig::default();
        cfg.edits.sprout_chance = 0.0;
        World::with_noise(
            9,
            WorldGenParams::default(),
            |_x: f32, _z: f32| -0.5f32,
            Arc::new(BlockRegistry::builtin()),
            cfg,
        )
    }

    #[test]
    fn viewer_starts_above_the_spawn() {
        let sim = Simulation::new(flat_world(), 1);
        assert!(sim.spawn.safe);
        assert_eq!(sim.spawn.feet, BlockPos::new(256, 41, 256));
        assert!((sim.viewer().y - (41.0 + EYE_HEIGHT)).abs() < 1e-4);
    }

    #[test]
    fn walk_streams_and_breaks_the_ground() {
        let mut sim = Simulation::new(flat_world(), 1);
        let summary = sim.run(12, 2.0);
        assert_eq!(summary.ticks, 12);
        assert!(summary.remeshed > 0);
        assert!(summary.rendered > 0);
        let broken = summary.broken.unwrap();
        assert_eq!(broken.block, BlockType::Grass);
        assert_eq!(broken.pos.y, 40);
        assert!(broken.drops.iter().any(|s| s.item == BlockType::Dirt));
        assert!(sim.world().get_block(broken.pos.x, 40, broken.pos.z).is_air());
    }

    #[test]
    fn standing_in_water_hurts_once_per_interval() {
        let mut sim = Simulation::new(flat_world(), 1);
        let feet = sim.spawn.feet;
        assert_eq!(sim.feel_hazard(), 0);
        assert!(sim.world.set_block(feet.x, feet.y, feet.z, BlockType::Water));

        let per_second = 1000 / TICK_MS;
        let dealt: Vec<u32> = (0..2 * per_second).map(|_| sim.feel_hazard()).collect();
        assert_eq!(dealt.iter().sum::<u32>(), 40);
        assert_eq!(dealt.iter().filter(|&&d| d > 0).count(), 2);

        // leaving the water resets the exposure clock
        assert!(sim.world.set_block(feet.x, feet.y, feet.z, BlockType::Air));
        assert_eq!(sim.feel_hazard(), 0);
        assert_eq!(sim.exposure_ms, 0);
    }

    #[test]
    fn dry_walks_take_no_damage() {
        let mut sim = Simulation::new(flat_world(), 1);
        let summary = sim.run(12, 2.0);
        assert_eq!(summary.hazard_damage, 0);
        assert!(!summary.to_string().contains("hazard_damage"));
    }

    #[test]
    fn summary_prints_the_break() {
        let mut sim = Simulation::new(flat_world(), 1);
        let text = sim.run(1, 0.5).to_string();
        assert!(text.starts_with("ticks=1 "));
        assert!(text.contains("broke grass"));
    }
}
