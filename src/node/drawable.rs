use std::fmt;
use std::rc::Rc;

use crate::resources::{Geometry, Material};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableKind {
	Mesh,
	LineSegments,
	Points,
}

impl fmt::Display for DrawableKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			DrawableKind::Mesh => "Mesh",
			DrawableKind::LineSegments => "LineSegments",
			DrawableKind::Points => "Points",
		})
	}
}

/// If a node has this, it renders something. Geometry and material are shared engine resources.
#[derive(Debug, Clone)]
pub struct Drawable {
	pub kind: DrawableKind,
	pub geometry: Rc<Geometry>,
	pub material: Rc<Material>,
}

impl Drawable {
	pub fn mesh(geometry: Rc<Geometry>, material: Rc<Material>) -> Self {
		Self {
			kind: DrawableKind::Mesh,
			geometry,
			material,
		}
	}

	pub fn line_segments(geometry: Rc<Geometry>, material: Rc<Material>) -> Self {
		Self {
			kind: DrawableKind::LineSegments,
			geometry,
			material,
		}
	}

	pub fn points(geometry: Rc<Geometry>, material: Rc<Material>) -> Self {
		Self {
			kind: DrawableKind::Points,
			geometry,
			material,
		}
	}
}
