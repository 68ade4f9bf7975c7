use std::fmt;

/// Fixed-point decimal `mantissa * 10^-scale` with a 96-bit magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
	mantissa: i128,
	scale: u8,
}

impl Decimal {
	/// Largest supported power-of-ten scale.
	pub const MAX_SCALE: u8 = 28;
	/// Payload bits of the unscaled magnitude.
	pub const MANTISSA_BITS: u32 = 96;
	/// Largest unscaled magnitude.
	pub const MAX_MANTISSA: i128 = (1 << Self::MANTISSA_BITS) - 1;
	/// Zero with scale 0.
	pub const ZERO: Self = Self { mantissa: 0, scale: 0 };

	/// Build a decimal, or `None` when the scale or magnitude is out of range.
	pub fn new(mantissa: i128, scale: u8) -> Option<Self> {
		if scale > Self::MAX_SCALE || mantissa.unsigned_abs() > Self::MAX_MANTISSA as u128 {
			return None;
		}
		Some(Self { mantissa, scale })
	}

	/// Signed unscaled value.
	pub fn mantissa(&self) -> i128 {
		self.mantissa
	}

	/// Number of digits after the decimal point.
	pub fn scale(&self) -> u8 {
		self.scale
	}

	/// Whether the value is below zero.
	pub fn is_negative(&self) -> bool {
		self.mantissa < 0
	}

	/// Nearest `f64`; lossy for large mantissas or scales.
	pub fn to_f64(&self) -> f64 {
		self.mantissa as f64 / 10_f64.powi(i32::from(self.scale))
	}
}

impl fmt::Display for Decimal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let digits = self.mantissa.unsigned_abs().to_string();
		let scale = usize::from(self.scale);
		if self.is_negative() {
			f.write_str("-")?;
		}
		if scale == 0 {
			return f.write_str(&digits);
		}

		let padded = format!("{digits:0>width$}", width = scale + 1);
		let (int, frac) = padded.split_at(padded.len() - scale);
		write!(f, "{int}.{frac}")
	}
}

#[cfg(test)]
mod tests;
