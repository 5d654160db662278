use std::sync::Arc;
use std::time::Instant;

use atoll_chunk::{Chunk, ChunkMesh};
use atoll_geom::Vec3;
use atoll_world::{CHUNK_SIZE_I32, ChunkCoord};
use hashbrown::HashSet;

use crate::World;

/// What one streaming tick changed. Renderers replace resources for every
/// remeshed entry and drop them for every unloaded coordinate.
#[derive(Clone, Debug, Default)]
pub struct StreamReport {
    pub remeshed: Vec<(ChunkCoord, Arc<ChunkMesh>)>,
    pub unloaded: Vec<ChunkCoord>,
    /// Chunks that needed a mesh but exceeded this tick's budget.
    pub deferred: Vec<ChunkCoord>,
    /// Size of the desired set this tick.
    pub desired: usize,
}

impl StreamReport {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.remeshed.is_empty() && self.unloaded.is_empty() && self.deferred.is_empty()
    }
}

impl World {
    /// Chunk holding the viewer position; may lie outside the world.
    pub fn viewer_chunk(viewer: Vec3) -> ChunkCoord {
        let s = CHUNK_SIZE_I32 as f32;
        ChunkCoord::new(
            (viewer.x / s).floor() as i32,
            (viewer.y / s).floor() as i32,
            (viewer.z / s).floor() as i32,
        )
    }

    /// Chunks that should hold a mesh for a viewer in chunk `p`, nearest
    /// columns first.
    pub fn desired_chunks(&self, p: ChunkCoord) -> Vec<ChunkCoord> {
        let max = self.dims.max_chunk();
        let r = self.config.streaming.render_radius;
        let r_sq = i64::from(r) * i64::from(r);
        let sea_cy = (self.sea_level() + CHUNK_SIZE_I32 - 1).div_euclid(CHUNK_SIZE_I32);
        let top_cy = max.cy.min(p.cy.saturating_add(2).max(sea_cy + 1));

        let mut out = Vec::new();
        for cz in p.cz.saturating_sub(r).max(0)..=p.cz.saturating_add(r).min(max.cz) {
            for cx in p.cx.saturating_sub(r).max(0)..=p.cx.saturating_add(r).min(max.cx) {
                let column = ChunkCoord::new(cx, 0, cz);
                if column.planar_distance_sq(p) > r_sq {
                    continue;
                }
                for cy in 0..=top_cy {
                    out.push(ChunkCoord::new(cx, cy, cz));
                }
            }
        }
        out.sort_by_key(|c| (c.planar_distance_sq(p), c.cy, c.cz, c.cx));
        out
    }

    /// One streaming tick around `viewer`: generates the desired chunks,
    /// rebuilds stale meshes up to the per-tick budget, and releases meshes
    /// of rendered chunks past the unload distance.
    pub fn update_chunks_around(&mut self, viewer: Vec3) -> StreamReport {
        let start = Instant::now();
        let p = Self::viewer_chunk(viewer);
        let desired = self.desired_chunks(p);
        let budget = self.config.streaming.max_remesh_per_tick;
        let mut report = StreamReport {
            desired: desired.len(),
            ..StreamReport::default()
        };

        for &coord in &desired {
            self.ensure_generated(coord);
            let needs_mesh = self.chunks.get(&coord).is_some_and(Chunk::needs_mesh);
            if !needs_mesh {
                continue;
            }
            if report.remeshed.len() < budget {
                if let Some(mesh) = self.remesh(coord) {
                    report.remeshed.push((coord, mesh));
                }
            } else {
                report.deferred.push(coord);
            }
        }

        let streaming = &self.config.streaming;
        let keep = streaming.render_radius.saturating_add(streaming.unload_margin);
        let keep_sq = i64::from(keep) * i64::from(keep);
        let desired: HashSet<ChunkCoord> = desired.into_iter().collect();
        let mut stale: Vec<ChunkCoord> = self
            .rendered
            .iter()
            .copied()
            .filter(|c| !desired.contains(c) && c.planar_distance_sq(p) > keep_sq)
            .collect();
        stale.sort();
        for coord in &stale {
            self.rendered.remove(coord);
            if let Some(chunk) = self.chunks.get_mut(coord) {
                chunk.release_mesh();
            }
        }
        report.unloaded = stale;

        if !report.is_idle() {
            log::debug!(
                target: "stream",
                "viewer=({},{},{}) desired={} remeshed={} deferred={} unloaded={}",
                p.cx,
                p.cy,
                p.cz,
                report.desired,
                report.remeshed.len(),
                report.deferred.len(),
                report.unloaded.len()
            );
        }
        log::trace!(
            target: "perf",
            "ms={} stream_tick desired={} remeshed={}",
            start.elapsed().as_millis(),
            report.desired,
            report.remeshed.len()
        );
        report
    }

    /// Generates every chunk in the square of columns `radius` chunks around
    /// the world center, from the floor up to the highest terrain. Returns how many
    /// chunks were generated by this call.
    pub fn generate_initial_chunks(&mut self, radius: i32) -> usize {
        let start = Instant::now();
        let (w, h, d) = (self.dims.width, self.dims.height, self.dims.depth);
        let center = ChunkCoord::containing(w / 2, 0, d / 2);
        let max = self.dims.max_chunk();
        let top = self.worldgen.params().max_height.min(h);
        let levels = (top + CHUNK_SIZE_I32 - 1).div_euclid(CHUNK_SIZE_I32).min(max.cy + 1);
        let mut generated = 0;
        for cz in center.cz.saturating_sub(radius).max(0)..=center.cz.saturating_add(radius).min(max.cz) {
            for cx in center.cx.saturating_sub(radius).max(0)..=center.cx.saturating_add(radius).min(max.cx) {
                for cy in 0..levels {
                    let coord = ChunkCoord::new(cx, cy, cz);
                    if !self.chunks.get(&coord).is_some_and(Chunk::is_generated) {
                        self.ensure_generated(coord);
                        generated += 1;
                    }
                }
            }
        }
        log::info!(
            target: "perf",
            "ms={} initial_chunks radius={} generated={} total={}",
            start.elapsed().as_millis(),
            radius,
            generated,
            self.chunks.len()
        );
        generated
    }
}
