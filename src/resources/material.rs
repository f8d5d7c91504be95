use crate::math::color::Color;
use crate::texture::SharedTexture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
	/// Unlit segments.
	LineBasic,
	/// Unlit triangles.
	MeshBasic,
	/// Screen aligned point sprites.
	Points,
}

/// Which faces of a triangle get rasterized.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Side {
	#[default]
	Front,
	Back,
	Double,
}

#[derive(Debug, Clone)]
pub struct Material {
	pub kind: MaterialKind,
	pub color: Color,
	pub opacity: f32,
	pub transparent: bool,
	pub side: Side,
	pub depth_test: bool,
	pub depth_write: bool,
	/// Point size, only meaningful for `MaterialKind::Points`.
	pub size: f32,
	pub map: Option<SharedTexture>,
}

impl Material {
	fn with_kind(kind: MaterialKind, color: Color) -> Self {
		Self {
			kind,
			color,
			opacity: 1.,
			transparent: false,
			side: Side::Front,
			depth_test: true,
			depth_write: true,
			size: 1.,
			map: None,
		}
	}

	pub fn line_basic(color: Color) -> Self {
		Self::with_kind(MaterialKind::LineBasic, color)
	}

	pub fn mesh_basic(color: Color) -> Self {
		Self::with_kind(MaterialKind::MeshBasic, color)
	}

	pub fn points(size: f32, color: Color) -> Self {
		Self {
			size,
			..Self::with_kind(MaterialKind::Points, color)
		}
	}

	/// Blended with `opacity`.
	pub fn translucent(mut self, opacity: f32) -> Self {
		self.opacity = opacity;
		self.transparent = true;
		self
	}

	pub fn with_side(mut self, side: Side) -> Self {
		self.side = side;
		self
	}

	/// Neither tested against nor written to the depth buffer, so it shows through other geometry.
	pub fn without_depth(mut self) -> Self {
		self.depth_test = false;
		self.depth_write = false;
		self
	}

	pub fn with_map(mut self, map: SharedTexture) -> Self {
		self.map = Some(map);
		self
	}
}
