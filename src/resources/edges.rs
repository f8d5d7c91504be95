use std::collections::HashMap;

use glam::Vec3;

use super::geometry::Geometry;

/// Vertex positions closer than this are welded before edges are matched.
const WELD_PRECISION: f32 = 1e-4;

type VertexKey = [i64; 3];

fn vertex_key(v: Vec3) -> VertexKey {
	let q = (v / WELD_PRECISION).round();
	[q.x as i64, q.y as i64, q.z as i64]
}

struct OpenEdge {
	a: Vec3,
	b: Vec3,
	normal: Vec3,
	/// `false` once a second face has been matched
	open: bool,
}

/// Outline segments of a triangle geometry.
///
/// An edge is kept when it borders a single triangle, or when the normals of its
/// two triangles differ by at least `threshold_deg` degrees. Degenerate triangles are ignored.
pub fn edges_geometry(geometry: &Geometry, threshold_deg: f32) -> Geometry {
	let threshold_dot = threshold_deg.to_radians().cos();

	let mut edges: Vec<OpenEdge> = Vec::new();
	let mut by_key: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
	let mut segments = Vec::new();

	for triangle in geometry.triangles() {
		let keys = triangle.map(vertex_key);
		if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
			continue;
		}

		let normal = (triangle[1] - triangle[0]).cross(triangle[2] - triangle[0]).normalize_or_zero();

		for (i, j) in [(0, 1), (1, 2), (2, 0)] {
			let key = if keys[i] <= keys[j] {
				(keys[i], keys[j])
			} else {
				(keys[j], keys[i])
			};

			match by_key.get(&key).copied() {
				Some(index) if edges[index].open => {
					let edge = &mut edges[index];
					edge.open = false;
					if edge.normal.dot(normal) <= threshold_dot {
						segments.push(edge.a);
						segments.push(edge.b);
					}
				}
				// edge shared by more than two triangles, treat the extra face as a new border
				Some(_) | None => {
					by_key.insert(key, edges.len());
					edges.push(OpenEdge {
						a: triangle[i],
						b: triangle[j],
						normal,
						open: true,
					});
				}
			}
		}
	}

	for edge in edges.iter().filter(|edge| edge.open) {
		segments.push(edge.a);
		segments.push(edge.b);
	}

	Geometry::lines(segments)
}
