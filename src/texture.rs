use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use image::{Rgba, RgbaImage};

pub mod arrow;

/// Textures are mutated in place by animate actions while materials keep referencing them.
pub type SharedTexture = Rc<RefCell<Texture>>;

/// How texture coordinates outside `0.0..1.0` are resolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
	#[default]
	ClampToEdge,
	Repeat,
	MirroredRepeat,
}

impl WrapMode {
	/// Map an arbitrary coordinate into `0.0..=1.0`.
	pub fn wrap(self, t: f32) -> f32 {
		match self {
			WrapMode::ClampToEdge => t.clamp(0., 1.),
			WrapMode::Repeat => t.rem_euclid(1.),
			WrapMode::MirroredRepeat => {
				let t = t.rem_euclid(2.);
				if t > 1. {
					2. - t
				} else {
					t
				}
			}
		}
	}
}

/// CPU side texture: an RGBA raster plus the sampling state an engine would upload with it.
pub struct Texture {
	image: RgbaImage,
	pub wrap_s: WrapMode,
	pub wrap_t: WrapMode,
	/// How many times the image fits along U and V.
	pub repeat: Vec2,
	/// UV offset, animated by flow actions.
	pub offset: Vec2,
}

impl Texture {
	pub fn new(image: RgbaImage) -> Self {
		Self {
			image,
			wrap_s: WrapMode::default(),
			wrap_t: WrapMode::default(),
			repeat: Vec2::ONE,
			offset: Vec2::ZERO,
		}
	}

	pub fn into_shared(self) -> SharedTexture {
		Rc::new(RefCell::new(self))
	}

	pub fn image(&self) -> &RgbaImage {
		&self.image
	}

	pub fn pixels(&self) -> &[u8] {
		self.image.as_raw()
	}

	pub fn width(&self) -> u32 {
		self.image.width()
	}

	pub fn height(&self) -> u32 {
		self.image.height()
	}

	/// Nearest-neighbour lookup of a mesh UV, with repeat, offset and wrapping applied.
	///
	/// An empty image samples as transparent black.
	pub fn sample(&self, uv: Vec2) -> Rgba<u8> {
		if self.width() == 0 || self.height() == 0 {
			return Rgba([0, 0, 0, 0]);
		}

		let uv = uv * self.repeat + self.offset;
		let u = self.wrap_s.wrap(uv.x);
		let v = self.wrap_t.wrap(uv.y);

		let x = ((u * self.width() as f32) as u32).min(self.width() - 1);
		let y = ((v * self.height() as f32) as u32).min(self.height() - 1);
		*self.image.get_pixel(x, y)
	}
}

impl fmt::Debug for Texture {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Texture")
			.field("width", &self.width())
			.field("height", &self.height())
			.field("wrap_s", &self.wrap_s)
			.field("wrap_t", &self.wrap_t)
			.field("repeat", &self.repeat)
			.field("offset", &self.offset)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use glam::vec2;

	use super::*;

	#[test]
	fn wrap_modes() {
		assert_eq!(WrapMode::ClampToEdge.wrap(1.5), 1.);
		assert!((WrapMode::Repeat.wrap(1.25) - 0.25).abs() < 1e-6);
		assert!((WrapMode::Repeat.wrap(-0.25) - 0.75).abs() < 1e-6);
		assert!((WrapMode::MirroredRepeat.wrap(1.25) - 0.75).abs() < 1e-6);
	}

	#[test]
	fn repeat_offset_cycles() {
		let mut image = RgbaImage::new(2, 2);
		image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
		image.put_pixel(0, 1, Rgba([0, 255, 0, 255]));

		let mut texture = Texture::new(image);
		texture.wrap_s = WrapMode::Repeat;
		texture.wrap_t = WrapMode::Repeat;

		let uv = vec2(0.1, 0.1);
		let before = texture.sample(uv);
		texture.offset.y += 0.5;
		assert_ne!(texture.sample(uv), before);
		texture.offset.y += 0.5;
		assert_eq!(texture.sample(uv), before);
	}

	#[test]
	fn empty_image_samples_transparent() {
		let mut texture = Texture::new(RgbaImage::new(0, 0));
		assert_eq!(texture.sample(vec2(0.5, 0.5)), Rgba([0, 0, 0, 0]));

		texture.wrap_s = WrapMode::Repeat;
		texture.offset.y += 0.25;
		assert_eq!(texture.sample(vec2(2., -1.)), Rgba([0, 0, 0, 0]));

		let strip = Texture::new(RgbaImage::new(4, 0));
		assert_eq!(strip.sample(Vec2::ZERO), Rgba([0, 0, 0, 0]));
	}
}
