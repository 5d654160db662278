use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::time::Instant;

use atoll_blocks::Model;
use atoll_chunk::{BatchKey, Billboard, Chunk, ChunkMesh, Instances, MeshBatch, Transparency};
use atoll_geom::{BlockPos, Face};
use atoll_world::VoxelAccess;

use crate::visibility::{exposed_faces, is_block_visible};

/// Deterministic billboard rotation for a plant at `pos`, in `[0, π/4]`.
pub fn billboard_yaw(pos: BlockPos) -> f32 {
    let seed = f64::from(pos.x) * 10_000.0 + f64::from(pos.y) * 100.0 + f64::from(pos.z);
    ((seed * 0.1).sin().abs() * PI * 0.25) as f32
}

fn empty_instances(model: Model) -> Instances {
    match model {
        Model::Fluid => Instances::Faces(Default::default()),
        Model::Cross => Instances::Billboards(Vec::new()),
        Model::Cube | Model::Empty => Instances::Cubes(Vec::new()),
    }
}

/// Builds the mesh descriptor of `chunk` in one pass over its voxels.
/// Batches come out opaque first, then transparent, each ordered by block type.
pub fn build_chunk_mesh<A: VoxelAccess + ?Sized>(chunk: &Chunk, world: &A) -> ChunkMesh {
    let start = Instant::now();
    let reg = world.registry();
    let coord = chunk.coord();
    let mut groups: BTreeMap<BatchKey, Instances> = BTreeMap::new();

    for (i, &block) in chunk.blocks().iter().enumerate() {
        if block.is_air() {
            continue;
        }
        let (x, y, z) = Chunk::index_to_local(i);
        if !is_block_visible(chunk, world, x, y, z) {
            continue;
        }
        let props = reg.get(block);
        if props.model == Model::Empty {
            continue;
        }
        let key = BatchKey {
            transparency: if props.transparent {
                Transparency::Transparent
            } else {
                Transparency::Opaque
            },
            block,
            model: props.model,
        };
        let pos = coord.world_of(x, y, z);
        match groups.entry(key).or_insert_with(|| empty_instances(props.model)) {
            Instances::Cubes(v) => v.push(pos),
            Instances::Billboards(v) => v.push(Billboard {
                pos,
                yaw: billboard_yaw(pos),
            }),
            Instances::Faces(lists) => {
                let exposed = exposed_faces(chunk, world, x, y, z);
                for face in Face::ALL {
                    if exposed[face.index()] {
                        lists[face.index()].push(pos);
                    }
                }
            }
        }
    }

    let batches: Vec<MeshBatch> = groups
        .into_iter()
        .map(|(key, instances)| MeshBatch { key, instances })
        .collect();
    let mesh = ChunkMesh { coord, batches };
    log::debug!(
        target: "perf",
        "ms={} mesh_build cx={} cy={} cz={} batches={} instances={}",
        start.elapsed().as_millis(),
        coord.cx,
        coord.cy,
        coord.cz,
        mesh.batches.len(),
        mesh.instance_count()
    );
    mesh
}
