//! Engine resources (geometry, materials, textures) as seen by representation builders.
//!
//! Builders never create resources directly: everything goes through a [`ResourceFactory`]
//! handed to them, so a renderer can hook uploads while tests run on [`CpuResources`].

use std::rc::Rc;

use image::RgbaImage;

use crate::texture::{SharedTexture, Texture};

mod edges;
pub mod geometry;
pub mod material;

pub use edges::edges_geometry;
pub use geometry::{Geometry, Topology};
pub use material::{Material, MaterialKind, Side};

pub trait ResourceFactory {
	/// Outline segments of `geometry`, as an engine `EdgesGeometry` would produce them.
	fn edges_geometry(&self, geometry: &Geometry) -> Rc<Geometry>;

	fn material(&self, material: Material) -> Rc<Material>;

	/// A texture backed by a freshly painted canvas.
	fn canvas_texture(&self, image: RgbaImage) -> SharedTexture;
}

/// Resources living in plain memory.
#[derive(Debug, Clone)]
pub struct CpuResources {
	/// Minimum angle between two faces for their shared edge to be outlined.
	pub edge_threshold_deg: f32,
}

impl Default for CpuResources {
	fn default() -> Self {
		Self { edge_threshold_deg: 1. }
	}
}

impl ResourceFactory for CpuResources {
	fn edges_geometry(&self, geometry: &Geometry) -> Rc<Geometry> {
		Rc::new(edges_geometry(geometry, self.edge_threshold_deg))
	}

	fn material(&self, material: Material) -> Rc<Material> {
		Rc::new(material)
	}

	fn canvas_texture(&self, image: RgbaImage) -> SharedTexture {
		Texture::new(image).into_shared()
	}
}
