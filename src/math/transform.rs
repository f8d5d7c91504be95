use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local transform of a scene node, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
	/// X Y Z
	pub position: Vec3,
	/// Euler angles in radians, XYZ order
	pub rotation: Vec3,
	/// X Y Z
	pub scale: Vec3,
}

impl Default for Transform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl Transform {
	pub const IDENTITY: Self = Self {
		position: Vec3::ZERO,
		rotation: Vec3::ZERO,
		scale: Vec3::ONE,
	};

	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_position(mut self, position: Vec3) -> Self {
		self.position = position;
		self
	}

	pub fn with_rotation(mut self, rotation: Vec3) -> Self {
		self.rotation = rotation;
		self
	}

	pub fn with_scale(mut self, scale: Vec3) -> Self {
		self.scale = scale;
		self
	}

	/// Overwrite position, rotation and scale with the ones of `other`.
	pub fn copy_from(&mut self, other: &Transform) {
		self.position = other.position;
		self.rotation = other.rotation;
		self.scale = other.scale;
	}

	/// Back to identity.
	pub fn reset(&mut self) {
		*self = Self::IDENTITY;
	}

	pub fn is_identity(&self) -> bool {
		*self == Self::IDENTITY
	}

	pub fn to_matrix(&self) -> Mat4 {
		Mat4::from_translation(self.position)
			* Mat4::from_quat(Quat::from_euler(
				EulerRot::XYZ,
				self.rotation.x,
				self.rotation.y,
				self.rotation.z,
			)) * Mat4::from_scale(self.scale)
	}
}

#[cfg(test)]
mod tests {
	use std::f32::consts::FRAC_PI_2;

	use glam::vec3;

	use super::*;

	#[test]
	fn copy_then_reset() {
		let source = Transform::new()
			.with_position(vec3(1.0, 2.0, 3.0))
			.with_rotation(vec3(0.0, FRAC_PI_2, 0.0))
			.with_scale(vec3(2.0, 2.0, 2.0));

		let mut target = Transform::new();
		target.copy_from(&source);
		assert_eq!(target, source);

		target.reset();
		assert!(target.is_identity());
	}

	#[test]
	fn matrix_applies_scale_rotation_translation_in_order() {
		let transform = Transform::new()
			.with_position(vec3(10.0, 0.0, 0.0))
			.with_rotation(vec3(0.0, 0.0, FRAC_PI_2))
			.with_scale(vec3(2.0, 1.0, 1.0));

		let p = transform.to_matrix().transform_point3(vec3(1.0, 0.0, 0.0));
		assert!((p - vec3(10.0, 2.0, 0.0)).length() < 1e-5);
	}
}
