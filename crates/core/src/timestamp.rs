// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	time::{SystemTime, UNIX_EPOCH},
};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A wall-clock instant with millisecond precision, always interpreted in
/// UTC.
///
/// Internally stored as milliseconds since Unix epoch (1970-01-01 00:00:00).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
	// Milliseconds since Unix epoch
	// Negative values represent instants before 1970
	millis_since_epoch: i64,
}

impl Default for Timestamp {
	fn default() -> Self {
		Self {
			millis_since_epoch: 0,
		} // 1970-01-01 00:00:00.000
	}
}

// Calendar utilities
impl Timestamp {
	/// Check if a year is a leap year
	#[inline]
	fn is_leap_year(year: i64) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	/// Get the number of days in a month
	#[inline]
	fn days_in_month(year: i64, month: u32) -> u32 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}

	/// Convert year/month/day to days since Unix epoch
	fn ymd_to_days_since_epoch(year: i64, month: u32, day: u32) -> Option<i64> {
		// Validate input
		if month < 1 || month > 12 || day < 1 || day > Self::days_in_month(year, month) {
			return None;
		}

		// Algorithm based on Howard Hinnant's date algorithms
		// Convert month from [1,12] to [0,11] where Mar=0
		let (y, m) = if month <= 2 {
			(year - 1, month as i64 + 9) // Jan->10, Feb->11
		} else {
			(year, month as i64 - 3) // Mar->0, Apr->1, ..., Dec->9
		};

		let era = if y >= 0 {
			y
		} else {
			y - 399
		} / 400;
		let yoe = y - era * 400; // [0, 399]
		let doy = (153 * m + 2) / 5 + day as i64 - 1; // [0, 365]
		let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
		let days = era * 146097 + doe - 719468;

		Some(days)
	}

	/// Convert days since Unix epoch to year/month/day
	fn days_since_epoch_to_ymd(days: i64) -> (i64, u32, u32) {
		// Adjust to the algorithm's epoch
		let days_since_ce = days + 719468;

		let era = if days_since_ce >= 0 {
			days_since_ce
		} else {
			days_since_ce - 146096
		} / 146097;
		let doe = days_since_ce - era * 146097; // [0, 146096]
		let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
		let y = yoe + era * 400;
		let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
		let mp = (5 * doy + 2) / 153; // [0, 11]
		let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
		let m = if mp < 10 {
			mp + 3
		} else {
			mp - 9
		}; // [1, 12]
		let year = if m <= 2 {
			y + 1
		} else {
			y
		};

		(year, m as u32, d as u32)
	}

	#[inline]
	fn split(&self) -> (i64, i64) {
		let days = self.millis_since_epoch.div_euclid(MILLIS_PER_DAY);
		let millis_of_day = self.millis_since_epoch.rem_euclid(MILLIS_PER_DAY);
		(days, millis_of_day)
	}
}

impl Timestamp {
	pub fn new(year: i64, month: u32, day: u32, hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
		if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
			return None;
		}
		let days = Self::ymd_to_days_since_epoch(year, month, day)?;
		let millis_of_day =
			(hour as i64 * 3600 + minute as i64 * 60 + second as i64) * 1000 + millisecond as i64;
		Some(Self {
			millis_since_epoch: days * MILLIS_PER_DAY + millis_of_day,
		})
	}

	/// The current wall-clock instant.
	pub fn now() -> Self {
		let duration = SystemTime::now().duration_since(UNIX_EPOCH).expect("System time before Unix epoch");
		Self {
			millis_since_epoch: duration.as_millis() as i64,
		}
	}

	pub fn year(&self) -> i64 {
		Self::days_since_epoch_to_ymd(self.split().0).0
	}

	pub fn month(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.split().0).1
	}

	pub fn day(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.split().0).2
	}

	pub fn hour(&self) -> u32 {
		(self.split().1 / 3_600_000) as u32
	}

	pub fn minute(&self) -> u32 {
		(self.split().1 / 60_000 % 60) as u32
	}

	pub fn second(&self) -> u32 {
		(self.split().1 / 1000 % 60) as u32
	}

	pub fn millisecond(&self) -> u32 {
		(self.split().1 % 1000) as u32
	}

	/// Convert to milliseconds since Unix epoch for storage
	pub fn to_millis(&self) -> i64 {
		self.millis_since_epoch
	}

	/// Create from milliseconds since Unix epoch for storage
	pub fn from_millis(millis: i64) -> Self {
		Self {
			millis_since_epoch: millis,
		}
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let (days, millis_of_day) = self.split();
		let (year, month, day) = Self::days_since_epoch_to_ymd(days);
		let hour = millis_of_day / 3_600_000;
		let minute = millis_of_day / 60_000 % 60;
		let second = millis_of_day / 1000 % 60;
		let millisecond = millis_of_day % 1000;
		if year < 0 {
			write!(
				f,
				"-{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
				-year, month, day, hour, minute, second, millisecond
			)
		} else {
			write!(
				f,
				"{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
				year, month, day, hour, minute, second, millisecond
			)
		}
	}
}

// Serde implementation for the `yyyy-MM-dd HH:mm:ss.SSS` wire format
impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
	type Value = Timestamp;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a timestamp in `yyyy-MM-dd HH:mm:ss.SSS` format")
	}

	fn visit_str<E>(self, value: &str) -> Result<Timestamp, E>
	where
		E: de::Error,
	{
		let (date_part, time_part) =
			value.split_once(' ').ok_or_else(|| E::custom(format!("invalid timestamp format: {}", value)))?;

		// Date: YYYY-MM-DD, with an optional leading minus for years
		// before the common era
		let (negative_year, date_digits) = match date_part.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, date_part),
		};
		let date_parts: Vec<&str> = date_digits.split('-').collect();
		if date_parts.len() != 3 {
			return Err(E::custom(format!("invalid date in timestamp: {}", value)));
		}
		let mut year = date_parts[0]
			.parse::<i64>()
			.map_err(|_| E::custom(format!("invalid year: {}", date_parts[0])))?;
		if negative_year {
			year = -year;
		}
		let month = date_parts[1]
			.parse::<u32>()
			.map_err(|_| E::custom(format!("invalid month: {}", date_parts[1])))?;
		let day = date_parts[2]
			.parse::<u32>()
			.map_err(|_| E::custom(format!("invalid day: {}", date_parts[2])))?;

		// Time: HH:MM:SS with optional .SSS
		let (clock, millisecond) = match time_part.split_once('.') {
			Some((clock, millis)) => {
				let millisecond = millis
					.parse::<u32>()
					.map_err(|_| E::custom(format!("invalid milliseconds: {}", millis)))?;
				(clock, millisecond)
			}
			None => (time_part, 0),
		};
		let time_parts: Vec<&str> = clock.split(':').collect();
		if time_parts.len() != 3 {
			return Err(E::custom(format!("invalid time in timestamp: {}", value)));
		}
		let hour =
			time_parts[0].parse::<u32>().map_err(|_| E::custom(format!("invalid hour: {}", time_parts[0])))?;
		let minute = time_parts[1]
			.parse::<u32>()
			.map_err(|_| E::custom(format!("invalid minute: {}", time_parts[1])))?;
		let second = time_parts[2]
			.parse::<u32>()
			.map_err(|_| E::custom(format!("invalid second: {}", time_parts[2])))?;

		Timestamp::new(year, month, day, hour, minute, second, millisecond)
			.ok_or_else(|| E::custom(format!("invalid timestamp: {}", value)))
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(TimestampVisitor)
	}
}
