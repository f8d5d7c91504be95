//! Procedural arrow glyph used by flowing pipe materials.

use glam::{vec2, Mat2, Vec2};
use image::{Rgba, RgbaImage};

use crate::math::color::Color;

/// Side of the square arrow canvas, in pixels.
pub const ARROW_CANVAS_SIZE: u32 = 64;

// Glyph outline in canvas pixels, centered on the origin and pointing towards +X.
// Roughly the extent of a 48px "➡" glyph.
const SHAFT_MIN: Vec2 = Vec2::new(-20., -6.);
const SHAFT_MAX: Vec2 = Vec2::new(4., 6.);
const HEAD: [Vec2; 3] = [Vec2::new(2., -17.), Vec2::new(22., 0.), Vec2::new(2., 17.)];

/// Samples per pixel along each axis, for antialiased edges.
const SUPERSAMPLE: u32 = 4;

/// Undefined if point is exactly on the edge.
fn is_point_in_triangle(p: Vec2, triangle: &[Vec2; 3]) -> bool {
	#[inline]
	fn sign(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
		Mat2::from_cols(p1, p2).sub_mat2(&Mat2::from_cols(p3, p3)).determinant()
	}

	let d1 = sign(p, triangle[0], triangle[1]);
	let d2 = sign(p, triangle[1], triangle[2]);
	let d3 = sign(p, triangle[2], triangle[0]);

	let has_neg = d1.is_sign_negative() || d2.is_sign_negative() || d3.is_sign_negative();
	let has_pos = d1.is_sign_positive() || d2.is_sign_positive() || d3.is_sign_positive();

	!(has_neg && has_pos)
}

fn is_point_in_arrow(p: Vec2) -> bool {
	let in_shaft = p.x >= SHAFT_MIN.x && p.x <= SHAFT_MAX.x && p.y >= SHAFT_MIN.y && p.y <= SHAFT_MAX.y;
	in_shaft || is_point_in_triangle(p, &HEAD)
}

/// Rasterize a single arrow on a transparent square canvas.
///
/// Like a 2D canvas transform, `rotation` (radians) turns the glyph clockwise on screen
/// since rows grow downwards: `0` points right, `PI / 2` points down.
pub fn rasterize_arrow(rotation: f32, color: Color) -> RgbaImage {
	let size = ARROW_CANVAS_SIZE;
	let center = Vec2::splat(size as f32 / 2.);
	// canvas -> glyph space
	let inverse = Mat2::from_angle(-rotation);
	let samples = (SUPERSAMPLE * SUPERSAMPLE) as f32;

	let mut image = RgbaImage::new(size, size);
	for (x, y, pixel) in image.enumerate_pixels_mut() {
		let mut covered = 0;
		for sy in 0..SUPERSAMPLE {
			for sx in 0..SUPERSAMPLE {
				let offset = vec2(
					(sx as f32 + 0.5) / SUPERSAMPLE as f32,
					(sy as f32 + 0.5) / SUPERSAMPLE as f32,
				);
				let p = inverse * (vec2(x as f32, y as f32) + offset - center);
				if is_point_in_arrow(p) {
					covered += 1;
				}
			}
		}

		if covered > 0 {
			let alpha = (covered as f32 / samples * 255.).round() as u8;
			*pixel = Rgba(color.to_rgba(alpha));
		}
	}

	image
}
