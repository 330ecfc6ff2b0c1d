//! Hand-built meshes for the particle shapes and the star topper.
//!
//! | Builder              | Used by       | Shading                 |
//! |----------------------|---------------|-------------------------|
//! | `octahedron_mesh`    | foliage       | flat, one normal per face |
//! | `star_mesh`          | halo ribbon   | flat, single sided +Z   |
//! | `extruded_star_mesh` | star topper   | flat caps + side walls  |
//!
//! Ornaments use Bevy's built-in icosphere and need nothing here.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::f32::consts::TAU;

/// Outline of a `points`-pointed star, alternating `outer` and `inner` radii,
/// counter-clockwise starting on the +X axis.
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<Vec2> {
    let n = points * 2;
    (0..n)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f32 / n as f32 * TAU;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Flat star in the XY plane facing +Z.
///
/// The outline is concave, so it is fan-triangulated from an added centre
/// vertex rather than from outline vertex 0.
pub fn star_mesh(points: usize, outer: f32, inner: f32) -> Mesh {
    let outline = star_outline(points, outer, inner);
    let n = outline.len() as u32;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(outline.len() + 1);
    positions.push([0.0, 0.0, 0.0]);
    positions.extend(outline.iter().map(|v| [v.x, v.y, 0.0]));
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions
        .iter()
        .map(|p| [p[0] / (2.0 * outer) + 0.5, 0.5 - p[1] / (2.0 * outer)])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity(n as usize * 3);
    for i in 0..n {
        indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % n]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Star slab of thickness `depth`, centred on z = 0.
pub fn extruded_star_mesh(points: usize, outer: f32, inner: f32, depth: f32) -> Mesh {
    let outline = star_outline(points, outer, inner);
    let n = outline.len();
    let front = depth / 2.0;
    let back = -depth / 2.0;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(2 * (n + 1) + 4 * n);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(positions.capacity());
    let mut indices: Vec<u32> = Vec::with_capacity(12 * n);

    // Caps: centre vertex then outline, once per side.
    for (z, normal) in [(front, 1.0), (back, -1.0)] {
        let base = positions.len() as u32;
        positions.push([0.0, 0.0, z]);
        positions.extend(outline.iter().map(|v| [v.x, v.y, z]));
        normals.extend(std::iter::repeat([0.0, 0.0, normal]).take(n + 1));
        for i in 0..n as u32 {
            let a = base + 1 + i;
            let b = base + 1 + (i + 1) % n as u32;
            if normal > 0.0 {
                indices.extend_from_slice(&[base, a, b]);
            } else {
                indices.extend_from_slice(&[base, b, a]);
            }
        }
    }

    // Side walls: one flat quad per outline edge.
    for i in 0..n {
        let p0 = outline[i];
        let p1 = outline[(i + 1) % n];
        let edge = p1 - p0;
        let outward = Vec2::new(edge.y, -edge.x).normalize_or_zero();

        let base = positions.len() as u32;
        positions.extend_from_slice(&[
            [p0.x, p0.y, back],
            [p1.x, p1.y, back],
            [p1.x, p1.y, front],
            [p0.x, p0.y, front],
        ]);
        normals.extend(std::iter::repeat([outward.x, outward.y, 0.0]).take(4));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Flat-shaded regular octahedron with vertices on the axes at `radius`.
pub fn octahedron_mesh(radius: f32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(24);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(24);

    for sx in [1.0f32, -1.0] {
        for sy in [1.0f32, -1.0] {
            for sz in [1.0f32, -1.0] {
                let a = Vec3::new(sx * radius, 0.0, 0.0);
                let mut b = Vec3::new(0.0, sy * radius, 0.0);
                let mut c = Vec3::new(0.0, 0.0, sz * radius);
                // An odd number of mirrored axes flips the winding.
                if sx * sy * sz < 0.0 {
                    std::mem::swap(&mut b, &mut c);
                }
                let normal = Vec3::new(sx, sy, sz).normalize();
                positions.extend([a.to_array(), b.to_array(), c.to_array()]);
                normals.extend([normal.to_array(); 3]);
            }
        }
    }

    let indices: Vec<u32> = (0..positions.len() as u32).collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
