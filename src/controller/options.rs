use crate::math::color::Color;

/// Tuning of the non-normal representations. Unset fields fall back to per-representation defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowingModelOptions {
	pub color: Option<Color>,
	pub opacity: Option<f32>,
	pub flow_color: Option<Color>,
	pub flow_opacity: Option<f32>,
	/// Arrows along the flow axis.
	pub flow_number: Option<f32>,
	/// Arrow rotation, degrees.
	pub flow_rotation: Option<f32>,
	/// Texture offset added per frame.
	pub flow_speed: Option<f32>,
	/// Point size.
	pub size: Option<f32>,
}

impl ShowingModelOptions {
	/// Fields set in `self` win, the rest come from `base`.
	pub fn merged_over(&self, base: &ShowingModelOptions) -> ShowingModelOptions {
		ShowingModelOptions {
			color: self.color.or(base.color),
			opacity: self.opacity.or(base.opacity),
			flow_color: self.flow_color.or(base.flow_color),
			flow_opacity: self.flow_opacity.or(base.flow_opacity),
			flow_number: self.flow_number.or(base.flow_number),
			flow_rotation: self.flow_rotation.or(base.flow_rotation),
			flow_speed: self.flow_speed.or(base.flow_speed),
			size: self.size.or(base.size),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOptions {
	pub color: Color,
	/// Opacity of the invisible pick surface.
	pub opacity: f32,
}

impl From<&ShowingModelOptions> for LineOptions {
	fn from(opt: &ShowingModelOptions) -> Self {
		Self {
			color: opt.color.unwrap_or(Color(0x00FFFF)),
			opacity: opt.opacity.unwrap_or(0.),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeOptions {
	pub color: Color,
	pub opacity: f32,
	pub flow_color: Color,
	pub flow_opacity: f32,
	pub flow_number: f32,
	pub flow_rotation: f32,
	pub flow_speed: f32,
}

impl From<&ShowingModelOptions> for PipeOptions {
	fn from(opt: &ShowingModelOptions) -> Self {
		Self {
			color: opt.color.unwrap_or(Color(0x4040FF)),
			opacity: opt.opacity.unwrap_or(0.5),
			flow_color: opt.flow_color.unwrap_or(Color(0x00FFFF)),
			flow_opacity: opt.flow_opacity.unwrap_or(0.5),
			flow_number: opt.flow_number.unwrap_or(5.),
			flow_rotation: opt.flow_rotation.unwrap_or(90.),
			flow_speed: opt.flow_speed.unwrap_or(0.01),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsOptions {
	pub size: f32,
	pub color: Color,
}

impl From<&ShowingModelOptions> for PointsOptions {
	fn from(opt: &ShowingModelOptions) -> Self {
		Self {
			size: opt.size.unwrap_or(0.1),
			color: opt.color.unwrap_or(Color(0xFFFFFF)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_fields_win() {
		let stored = ShowingModelOptions {
			color: Some(Color(0x111111)),
			flow_speed: Some(0.02),
			..Default::default()
		};
		let explicit = ShowingModelOptions {
			color: Some(Color(0x222222)),
			size: Some(3.),
			..Default::default()
		};

		let merged = explicit.merged_over(&stored);
		assert_eq!(merged.color, Some(Color(0x222222)));
		assert_eq!(merged.flow_speed, Some(0.02));
		assert_eq!(merged.size, Some(3.));
		assert_eq!(merged.opacity, None);
	}

	#[test]
	fn defaults() {
		let none = ShowingModelOptions::default();

		assert_eq!(
			LineOptions::from(&none),
			LineOptions {
				color: Color(0x00FFFF),
				opacity: 0.
			}
		);
		assert_eq!(
			PipeOptions::from(&none),
			PipeOptions {
				color: Color(0x4040FF),
				opacity: 0.5,
				flow_color: Color(0x00FFFF),
				flow_opacity: 0.5,
				flow_number: 5.,
				flow_rotation: 90.,
				flow_speed: 0.01,
			}
		);
		assert_eq!(
			PointsOptions::from(&none),
			PointsOptions {
				size: 0.1,
				color: Color::WHITE
			}
		);
	}
}
