//! Per-node configuration persisted alongside a scene, as a JSON object:
//!
//! ```json
//! {
//!   "renderOrder": 2,
//!   "showingModel": "pipe",
//!   "bloom": true,
//!   "showingModelOptions": { "flowSpeed": 0.02, "color": "#4040ff" }
//! }
//! ```
//!
//! Every key is optional and unknown keys are ignored.

use json::JsonValue;

use crate::controller::options::ShowingModelOptions;
use crate::math::color::{Color, ParseColorError};

use super::json::{JsonError, JsonObject, JsonResult};

pub type UserDataResult<T> = Result<T, UserDataError>;

#[derive(Debug, thiserror::Error)]
pub enum UserDataError {
	#[error("Could not parse user data: {0}")]
	Syntax(#[from] json::Error),
	#[error(transparent)]
	JsonError(#[from] JsonError),
	#[error("Invalid color at {key:?}: {source}")]
	InvalidColor { key: String, source: ParseColorError },
}

impl UserDataError {
	pub fn nested(self, key: &str) -> Self {
		match self {
			UserDataError::JsonError(err) => UserDataError::JsonError(err.nested(key)),
			UserDataError::InvalidColor { key: inner, source } => UserDataError::InvalidColor {
				key: format!("{key}.{inner}"),
				source,
			},
			_ => self,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
	pub render_order: Option<f32>,
	/// Representation name, validated when applied.
	pub showing_model: Option<String>,
	pub bloom: bool,
	pub showing_model_options: ShowingModelOptions,
}

impl UserData {
	pub fn parse(text: &str) -> UserDataResult<Self> {
		Self::from_json(&json::parse(text)?)
	}

	pub fn from_json(value: &JsonValue) -> UserDataResult<Self> {
		deserialize_user_data(JsonObject::from_value("userData", value)?)
	}

	/// Nothing to apply.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

fn vals<T>(key: &str, res: UserDataResult<T>) -> UserDataResult<T> {
	res.map_err(|e| e.nested(key))
}

/// A color either as a number (`16711680`) or a string (`"#ff0000"`, `"0xff0000"`).
fn get_color(obj: &JsonObject, key: &str) -> UserDataResult<Color> {
	if obj.is_number(key) {
		return Ok(Color::from_hex(obj.get_u32(key)?));
	}

	obj.get_str(key)?.parse().map_err(|source| UserDataError::InvalidColor {
		key: key.to_owned(),
		source,
	})
}

fn optional_color(obj: &JsonObject, key: &str) -> UserDataResult<Option<Color>> {
	match obj.get_present(key) {
		Some(_) => get_color(obj, key).map(Some),
		None => Ok(None),
	}
}

fn optional_f32(obj: &JsonObject, key: &str) -> JsonResult<Option<f32>> {
	obj.optional(key, JsonObject::get_f32)
}

fn deserialize_showing_model_options(obj: JsonObject) -> UserDataResult<ShowingModelOptions> {
	Ok(ShowingModelOptions {
		color: optional_color(&obj, "color")?,
		opacity: optional_f32(&obj, "opacity")?,
		flow_color: optional_color(&obj, "flowColor")?,
		flow_opacity: optional_f32(&obj, "flowOpacity")?,
		flow_number: optional_f32(&obj, "flowNumber")?,
		flow_rotation: optional_f32(&obj, "flowRotation")?,
		flow_speed: optional_f32(&obj, "flowSpeed")?,
		size: optional_f32(&obj, "size")?,
	})
}

fn deserialize_user_data(obj: JsonObject) -> UserDataResult<UserData> {
	Ok(UserData {
		render_order: obj.optional("renderOrder", JsonObject::get_f32)?,
		showing_model: obj.optional("showingModel", JsonObject::get_str)?.map(str::to_owned),
		bloom: obj.optional("bloom", JsonObject::get_bool)?.unwrap_or_default(),
		showing_model_options: match obj.get_present("showingModelOptions") {
			Some(_) => vals(
				"showingModelOptions",
				obj.get_object("showingModelOptions")
					.map_err(UserDataError::from)
					.and_then(deserialize_showing_model_options),
			)?,
			None => ShowingModelOptions::default(),
		},
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn full_document() {
		let user_data = UserData::parse(
			r##"{
				"renderOrder": 3,
				"showingModel": "pipe",
				"bloom": true,
				"showingModelOptions": {
					"color": 4210943,
					"flowColor": "#ff8800",
					"flowSpeed": 0.02,
					"flowNumber": 8,
					"size": 0.5
				},
				"somethingElse": [1, 2, 3]
			}"##,
		)
		.unwrap();

		assert_eq!(user_data.render_order, Some(3.));
		assert_eq!(user_data.showing_model.as_deref(), Some("pipe"));
		assert!(user_data.bloom);

		let opt = &user_data.showing_model_options;
		assert_eq!(opt.color, Some(Color(0x4040FF)));
		assert_eq!(opt.flow_color, Some(Color(0xFF8800)));
		assert_eq!(opt.flow_speed, Some(0.02));
		assert_eq!(opt.flow_number, Some(8.));
		assert_eq!(opt.size, Some(0.5));
		assert_eq!(opt.opacity, None);
	}

	#[test]
	fn fractional_render_order() {
		let user_data = UserData::parse(r#"{"renderOrder": 1.5, "showingModel": "line"}"#).unwrap();
		assert_eq!(user_data.render_order, Some(1.5));
		assert_eq!(user_data.showing_model.as_deref(), Some("line"));
	}

	#[test]
	fn empty_object_is_empty() {
		let user_data = UserData::parse("{}").unwrap();
		assert!(user_data.is_empty());
		assert!(!user_data.bloom);
	}

	#[test]
	fn errors_carry_their_path() {
		let err = UserData::parse(r#"{ "showingModelOptions": { "opacity": "high" } }"#).unwrap_err();
		assert!(matches!(
			err,
			UserDataError::JsonError(JsonError::ErrorInObject { ref key, .. }) if key == "showingModelOptions"
		));

		let err = UserData::parse(r#"{ "showingModelOptions": { "flowColor": "teal" } }"#).unwrap_err();
		assert!(matches!(err, UserDataError::InvalidColor { ref key, .. } if key == "showingModelOptions.flowColor"));

		assert!(matches!(UserData::parse("[1]"), Err(UserDataError::JsonError(_))));
		assert!(matches!(UserData::parse("{"), Err(UserDataError::Syntax(_))));
	}
}
