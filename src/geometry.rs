use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// How a mesh's vertex stream is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    TriangleList,
    /// Consecutive bands of `verts_per_strip` vertices, each drawn as its
    /// own triangle strip.
    TriangleStrip { verts_per_strip: u32 },
}

/// Immutable vertex data for one primitive type.
///
/// Positions, normals and UVs are parallel arrays (three, three and two
/// floats per vertex). For boxes the normal slot carries a per-face debug
/// color instead of a geometric normal, which is what the
/// normal-visualization display mode shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub vertex_count: u32,
    pub topology: Topology,
}

impl Mesh {
    /// Number of strips for strip topology, one for a triangle list.
    pub fn strip_count(&self) -> u32 {
        match self.topology {
            Topology::TriangleList => 1,
            Topology::TriangleStrip { verts_per_strip } => self.vertex_count / verts_per_strip,
        }
    }
}

/// Parameters of a latitude/longitude sphere mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereSpec {
    pub radius: f32,
    pub lat_segments: u32,
    pub long_segments: u32,
}

impl SphereSpec {
    pub fn new(radius: f32, lat_segments: u32, long_segments: u32) -> Self {
        Self {
            radius,
            lat_segments: lat_segments.max(1),
            long_segments: long_segments.max(1),
        }
    }
}

impl Eq for SphereSpec {}

impl Hash for SphereSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.radius.to_bits().hash(state);
        self.lat_segments.hash(state);
        self.long_segments.hash(state);
    }
}

/// Descriptor identifying one cacheable primitive mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Box,
    Sphere(SphereSpec),
}

/// Registry of built meshes, keyed by primitive descriptor.
///
/// The first request for a descriptor builds the mesh; every later request
/// returns the same shared instance, so drawing many instances of a
/// primitive never duplicates vertex data.
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: HashMap<Primitive, Arc<Mesh>>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared mesh for `primitive`, building it on first use.
    pub fn get_or_create(&mut self, primitive: Primitive) -> Arc<Mesh> {
        Arc::clone(
            self.meshes
                .entry(primitive)
                .or_insert_with(|| Arc::new(build_mesh(primitive))),
        )
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Builds the vertex data for a primitive descriptor.
pub fn build_mesh(primitive: Primitive) -> Mesh {
    match primitive {
        Primitive::Box => build_box(),
        Primitive::Sphere(spec) => build_sphere(spec),
    }
}

/// Unit box spanning [0,1] on every axis as a 36-vertex triangle list.
///
/// Vertices are duplicated at shared edges so each face can carry its own
/// UV unwrap and a uniform debug color; winding is consistent across
/// faces, which lets the same pipeline draw boxes and the inside of the
/// sky enclosure without face culling.
pub fn build_box() -> Mesh {
    let mut normals = Vec::with_capacity(BOX_POSITIONS.len());
    let mut uvs = Vec::with_capacity(72);
    for color in &BOX_FACE_COLORS {
        for _ in 0..6 {
            normals.extend_from_slice(color);
        }
        uvs.extend_from_slice(&FACE_UVS);
    }
    Mesh {
        positions: BOX_POSITIONS.to_vec(),
        normals,
        uvs,
        vertex_count: 36,
        topology: Topology::TriangleList,
    }
}

/// Latitude/longitude sphere emitted as one triangle strip per band.
///
/// Band `i` walks longitude steps 0..=G emitting a vertex on its upper
/// ring then one on its lower ring, so each band is directly consumable
/// as a strip of (G+1)*2 vertices. The unit-sphere coordinate doubles as
/// the vertex normal.
pub fn build_sphere(spec: SphereSpec) -> Mesh {
    let lat = spec.lat_segments;
    let long = spec.long_segments;
    let vertex_count = lat * (long + 1) * 2;

    let mut positions = Vec::with_capacity(vertex_count as usize * 3);
    let mut normals = Vec::with_capacity(vertex_count as usize * 3);
    let mut uvs = Vec::with_capacity(vertex_count as usize * 2);

    for i in 0..lat {
        let phi0 = std::f32::consts::PI * i as f32 / lat as f32;
        let phi1 = std::f32::consts::PI * (i + 1) as f32 / lat as f32;

        for j in 0..=long {
            let theta = std::f32::consts::TAU * j as f32 / long as f32;

            for (phi, v) in [
                (phi0, i as f32 / lat as f32),
                (phi1, (i + 1) as f32 / lat as f32),
            ] {
                let x = phi.sin() * theta.cos();
                let y = phi.cos();
                let z = phi.sin() * theta.sin();
                positions.extend_from_slice(&[spec.radius * x, spec.radius * y, spec.radius * z]);
                normals.extend_from_slice(&[x, y, z]);
                uvs.extend_from_slice(&[j as f32 / long as f32, v]);
            }
        }
    }

    Mesh {
        positions,
        normals,
        uvs,
        vertex_count,
        topology: Topology::TriangleStrip {
            verts_per_strip: (long + 1) * 2,
        },
    }
}

const BOX_POSITIONS: &[f32] = &[
    // front (z = 0)
    0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
    // back (z = 1)
    1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, //
    1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, //
    // left (x = 0)
    0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, //
    // right (x = 1)
    1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, //
    1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, //
    // top (y = 1)
    0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, //
    0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, //
    // bottom (y = 0)
    0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

// One uniform color per face so normal-visualization shows solid faces.
const BOX_FACE_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.0, 1.0], // front
    [0.0, 1.0, 1.0], // back
    [0.0, 0.0, 1.0], // left
    [1.0, 0.0, 0.0], // right
    [0.0, 1.0, 0.0], // top
    [1.0, 1.0, 0.0], // bottom
];

const FACE_UVS: [f32; 12] = [
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, //
    0.0, 0.0, 1.0, 1.0, 0.0, 1.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_is_six_face_groups_of_six_vertices() {
        let mesh = build_box();
        assert_eq!(mesh.vertex_count, 36);
        assert_eq!(mesh.positions.len(), 36 * 3);
        assert_eq!(mesh.normals.len(), 36 * 3);
        assert_eq!(mesh.uvs.len(), 36 * 2);
        assert_eq!(mesh.topology, Topology::TriangleList);

        for face in 0..6 {
            let group = &mesh.normals[face * 18..(face + 1) * 18];
            let first = &group[..3];
            for vertex in group.chunks_exact(3) {
                assert_eq!(vertex, first, "face {face} mixes debug colors");
            }
        }
    }

    #[test]
    fn box_face_uvs_cover_the_unit_square() {
        let mesh = build_box();
        for face in 0..6 {
            let uvs = &mesh.uvs[face * 12..(face + 1) * 12];
            assert_eq!(uvs, &FACE_UVS[..]);
        }
    }

    #[test]
    fn sphere_vertex_count_matches_band_layout() {
        let mesh = build_sphere(SphereSpec::new(1.0, 2, 4));
        assert_eq!(mesh.vertex_count, 2 * (4 + 1) * 2);
        assert_eq!(
            mesh.topology,
            Topology::TriangleStrip {
                verts_per_strip: 10
            }
        );
        assert_eq!(mesh.strip_count(), 2);
    }

    #[test]
    fn sphere_positions_are_scaled_normals() {
        let radius = 2.5;
        let mesh = build_sphere(SphereSpec::new(radius, 3, 6));
        for (pos, normal) in mesh
            .positions
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
        {
            let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
            for axis in 0..3 {
                assert!((pos[axis] - radius * normal[axis]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn cache_returns_the_same_mesh_for_the_same_descriptor() {
        let mut cache = MeshCache::new();
        let first = cache.get_or_create(Primitive::Box);
        let second = cache.get_or_create(Primitive::Box);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_distinguishes_sphere_parameters() {
        let mut cache = MeshCache::new();
        let small = cache.get_or_create(Primitive::Sphere(SphereSpec::new(1.0, 20, 20)));
        let large = cache.get_or_create(Primitive::Sphere(SphereSpec::new(2.0, 20, 20)));
        assert!(!Arc::ptr_eq(&small, &large));
        assert_eq!(cache.len(), 2);
    }
}
