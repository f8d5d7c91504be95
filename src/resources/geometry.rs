use glam::{vec3, Vec3};

/// How consecutive vertices (or indices) are assembled into primitives.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
	#[default]
	Triangles,
	/// Independent segments, two vertices each.
	Lines,
}

/// Vertex data shared between a source drawable and every representation derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
	pub topology: Topology,
	positions: Vec<Vec3>,
	indices: Option<Vec<u32>>,
}

impl Geometry {
	pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
		Self {
			topology: Topology::Triangles,
			positions,
			indices: Some(indices),
		}
	}

	/// Triangle soup, every three positions make one triangle.
	pub fn non_indexed(positions: Vec<Vec3>) -> Self {
		Self {
			topology: Topology::Triangles,
			positions,
			indices: None,
		}
	}

	/// Segment list, every two positions make one line.
	pub fn lines(positions: Vec<Vec3>) -> Self {
		Self {
			topology: Topology::Lines,
			positions,
			indices: None,
		}
	}

	/// Axis aligned box centered on the origin, 8 shared corners, outward winding.
	pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
		let (x, y, z) = (width / 2., height / 2., depth / 2.);
		let positions = vec![
			vec3(-x, -y, -z),
			vec3(x, -y, -z),
			vec3(x, y, -z),
			vec3(-x, y, -z),
			vec3(-x, -y, z),
			vec3(x, -y, z),
			vec3(x, y, z),
			vec3(-x, y, z),
		];
		#[rustfmt::skip]
		let indices = vec![
			// -z
			0, 2, 1, 0, 3, 2,
			// +z
			4, 5, 6, 4, 6, 7,
			// -y
			0, 1, 5, 0, 5, 4,
			// +y
			3, 7, 6, 3, 6, 2,
			// -x
			0, 4, 7, 0, 7, 3,
			// +x
			1, 2, 6, 1, 6, 5,
		];
		Self::new(positions, indices)
	}

	/// Flat quad in the XY plane, facing +Z.
	pub fn plane(width: f32, height: f32) -> Self {
		let (x, y) = (width / 2., height / 2.);
		let positions = vec![vec3(-x, -y, 0.), vec3(x, -y, 0.), vec3(x, y, 0.), vec3(-x, y, 0.)];
		Self::new(positions, vec![0, 1, 2, 0, 2, 3])
	}

	pub fn positions(&self) -> &[Vec3] {
		&self.positions
	}

	pub fn indices(&self) -> Option<&[u32]> {
		self.indices.as_deref()
	}

	pub fn vertex_count(&self) -> usize {
		self.positions.len()
	}

	/// Number of primitives (triangles or segments).
	pub fn primitive_count(&self) -> usize {
		let len = self.indices.as_ref().map_or(self.positions.len(), Vec::len);
		match self.topology {
			Topology::Triangles => len / 3,
			Topology::Lines => len / 2,
		}
	}

	/// Corner positions of every triangle. Empty for line geometry.
	///
	/// Triangles referencing a vertex past the end of the position buffer are skipped.
	pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
		let count = match self.topology {
			Topology::Triangles => self.primitive_count(),
			Topology::Lines => 0,
		};
		(0..count).filter_map(move |i| {
			let corner = |k: usize| match &self.indices {
				Some(indices) => self.positions.get(indices[3 * i + k] as usize).copied(),
				None => self.positions.get(3 * i + k).copied(),
			};
			Some([corner(0)?, corner(1)?, corner(2)?])
		})
	}
}
