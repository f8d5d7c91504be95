use std::fmt;
use std::str::FromStr;

use glam::Vec3;

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color {0:?}, expected \"#rrggbb\", \"0xrrggbb\" or a number")]
pub struct ParseColorError(pub String);

impl Color {
	pub const WHITE: Color = Color(0xFFFFFF);
	pub const CYAN: Color = Color(0x00FFFF);

	pub fn from_hex(hex: u32) -> Self {
		Self(hex & 0xFFFFFF)
	}

	pub fn r(&self) -> u8 {
		(self.0 >> 16) as u8
	}

	pub fn g(&self) -> u8 {
		(self.0 >> 8) as u8
	}

	pub fn b(&self) -> u8 {
		self.0 as u8
	}

	/// Components in `0.0..=1.0`.
	pub fn to_vec3(&self) -> Vec3 {
		Vec3::new(self.r() as f32, self.g() as f32, self.b() as f32) / 255.
	}

	pub fn to_rgba(&self, alpha: u8) -> [u8; 4] {
		[self.r(), self.g(), self.b(), alpha]
	}
}

impl From<u32> for Color {
	fn from(hex: u32) -> Self {
		Self::from_hex(hex)
	}
}

impl FromStr for Color {
	type Err = ParseColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		let digits = trimmed
			.strip_prefix('#')
			.or_else(|| trimmed.strip_prefix("0x"))
			.or_else(|| trimmed.strip_prefix("0X"))
			.ok_or_else(|| ParseColorError(s.to_owned()))?;
		// from_str_radix alone would let a sign through
		if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(ParseColorError(s.to_owned()));
		}

		let digits = match digits.len() {
			6 => digits.to_owned(),
			// "#0ff" shorthand
			3 => digits.chars().flat_map(|c| [c, c]).collect(),
			_ => return Err(ParseColorError(s.to_owned())),
		};

		u32::from_str_radix(&digits, 16)
			.map(Color)
			.map_err(|_| ParseColorError(s.to_owned()))
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:06x}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_css_and_hex_literals() {
		assert_eq!("#00ffff".parse::<Color>(), Ok(Color(0x00FFFF)));
		assert_eq!("0x4040FF".parse::<Color>(), Ok(Color(0x4040FF)));
		assert_eq!("#0ff".parse::<Color>(), Ok(Color(0x00FFFF)));
		assert!("cyan".parse::<Color>().is_err());
		assert!("#12345".parse::<Color>().is_err());
		assert!("#+12345".parse::<Color>().is_err());
		assert!("0x+fff".parse::<Color>().is_err());
		assert!("#-ff".parse::<Color>().is_err());
	}

	#[test]
	fn channels() {
		let color = Color(0x4080FF);
		assert_eq!(color.to_rgba(255), [0x40, 0x80, 0xFF, 255]);
		assert_eq!(color.to_string(), "#4080ff");
		assert_eq!(Color::from_hex(0xFF_123456), Color(0x123456));
	}
}
