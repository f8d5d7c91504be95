use std::fmt;
use std::str::FromStr;

use super::ControllerError;

/// The interchangeable visual forms of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
	/// The source node itself.
	Normal,
	/// Edge outlines plus an invisible pick surface.
	Line,
	/// Translucent see-through body with moving arrows.
	Pipe,
	/// Point cloud of the vertices.
	Points,
}

impl Representation {
	pub const ALL: [Representation; 4] = [
		Representation::Normal,
		Representation::Line,
		Representation::Pipe,
		Representation::Points,
	];

	pub fn name(&self) -> &'static str {
		match self {
			Representation::Normal => "normal",
			Representation::Line => "line",
			Representation::Pipe => "pipe",
			Representation::Points => "points",
		}
	}

	/// Name of the container showing `source`. The normal container is the source node itself.
	pub fn container_name(&self, source: &str) -> String {
		let suffix = match self {
			Representation::Normal => return source.to_owned(),
			Representation::Line => "lineObject3d",
			Representation::Pipe => "pipeObject3d",
			Representation::Points => "pointsObject3d",
		};
		format!("{source}_{suffix}")
	}
}

impl fmt::Display for Representation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Representation {
	type Err = ControllerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"normal" => Ok(Representation::Normal),
			"line" => Ok(Representation::Line),
			"pipe" => Ok(Representation::Pipe),
			"points" => Ok(Representation::Points),
			unknown => Err(ControllerError::InvalidModel(unknown.to_owned())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn names_parse_back() {
		for representation in Representation::ALL {
			assert_eq!(representation.name().parse::<Representation>().unwrap(), representation);
		}

		assert!(matches!(
			"Pipe".parse::<Representation>(),
			Err(ControllerError::InvalidModel(name)) if name == "Pipe"
		));
		assert!("".parse::<Representation>().is_err());
	}

	#[test]
	fn container_names() {
		assert_eq!(Representation::Normal.container_name("Pump"), "Pump");
		assert_eq!(Representation::Line.container_name("Pump"), "Pump_lineObject3d");
		assert_eq!(Representation::Pipe.container_name("Pump"), "Pump_pipeObject3d");
		assert_eq!(Representation::Points.container_name("Pump"), "Pump_pointsObject3d");
	}
}
