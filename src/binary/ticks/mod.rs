use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Date-time as a count of 100 ns ticks since 0001-01-01T00:00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticks(i64);

impl Ticks {
	/// Ticks in one second.
	pub const PER_SECOND: i64 = 10_000_000;
	/// Last tick of 9999-12-31.
	pub const MAX: i64 = 3_155_378_975_999_999_999;

	/// Wrap a tick count, or `None` outside `0..=Ticks::MAX`.
	pub fn new(ticks: i64) -> Option<Self> {
		(0..=Self::MAX).contains(&ticks).then_some(Self(ticks))
	}

	/// Raw tick count.
	pub fn get(self) -> i64 {
		self.0
	}

	/// Convert to a calendar date-time.
	pub fn to_naive(self) -> Option<NaiveDateTime> {
		let secs = TimeDelta::try_seconds(self.0 / Self::PER_SECOND)?;
		let nanos = TimeDelta::nanoseconds((self.0 % Self::PER_SECOND) * 100);
		epoch()?.checked_add_signed(secs)?.checked_add_signed(nanos)
	}

	/// Convert from a calendar date-time, truncating below 100 ns.
	pub fn from_naive(value: NaiveDateTime) -> Option<Self> {
		let delta = value.signed_duration_since(epoch()?);
		let ticks = delta
			.num_seconds()
			.checked_mul(Self::PER_SECOND)?
			.checked_add(i64::from(delta.subsec_nanos() / 100))?;
		Self::new(ticks)
	}
}

impl fmt::Display for Ticks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.to_naive() {
			Some(value) => {
				write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S"))?;
				let frac = self.0 % Self::PER_SECOND;
				if frac != 0 {
					write!(f, ".{frac:07}")?;
				}
				Ok(())
			}
			None => write!(f, "ticks({})", self.0),
		}
	}
}

fn epoch() -> Option<NaiveDateTime> {
	NaiveDate::from_ymd_opt(1, 1, 1)?.and_hms_opt(0, 0, 0)
}
