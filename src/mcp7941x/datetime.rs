use std::fmt;
use std::io;
use std::mem;
use std::ptr;
use std::str;

/// Contents of the seven timekeeping registers, decoded.
///
/// The chip doesn't check anything: `day_of_week` is whatever the
/// application defines (the command line tool uses 1 = Sunday), `year` has
/// no century.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct DateTime {
	pub second: u8,       // 0-59
	pub minute: u8,       // 0-59
	pub hour: u8,         // 0-23
	pub day_of_week: u8,  // 1-7
	pub day_of_month: u8, // 1-31
	pub month: u8,        // 1-12
	pub year: u8,         // 0-99
}

// 0 = Sunday; Sakamoto's method
fn weekday_from_sunday(year: u16, month: u8, day: u8) -> u8 {
	const T: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
	let month = month.max(1).min(12);
	let y = if month < 3 { year - 1 } else { year };
	((y + y / 4 - y / 100 + y / 400 + T[month as usize - 1] + day as u16) % 7) as u8
}

impl DateTime {
	/// local time of the host, `day_of_week` 1 = Sunday
	pub fn now_local() -> crate::AResult<Self> {
		let mut tm: libc::tm = unsafe { mem::zeroed() };
		let now = unsafe { libc::time(ptr::null_mut()) };
		if unsafe { libc::localtime_r(&now, &mut tm) }.is_null() {
			return Err(io::Error::last_os_error().into());
		}
		ensure!(tm.tm_year >= 100 && tm.tm_year < 200, "year {} not representable", 1900 + tm.tm_year);

		Ok(DateTime {
			// leap second
			second: tm.tm_sec.min(59) as u8,
			minute: tm.tm_min as u8,
			hour: tm.tm_hour as u8,
			day_of_week: tm.tm_wday as u8 + 1,
			day_of_month: tm.tm_mday as u8,
			month: (tm.tm_mon + 1) as u8,
			year: (tm.tm_year - 100) as u8,
		})
	}
}

impl fmt::Display for DateTime {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f,
			"20{:02}-{:02}-{:02} {:02}:{:02}:{:02}",
			self.year,
			self.month,
			self.day_of_month,
			self.hour,
			self.minute,
			self.second,
		)
	}
}

fn parse_fields(s: &str, separator: char, what: &str) -> crate::AResult<[u16; 3]> {
	let mut fields = [0u16; 3];
	let mut parts = s.split(separator);
	for field in fields.iter_mut() {
		let part = match parts.next() {
			Some(p) => p,
			None => bail!("incomplete {}: {:?}", what, s),
		};
		*field = with_context!(("invalid {} component {:?}", what, part),
			Ok(part.parse::<u16>()?)
		)?;
	}
	ensure!(parts.next().is_none(), "trailing data in {}: {:?}", what, s);
	Ok(fields)
}

fn two_digits(value: u16, what: &str) -> crate::AResult<u8> {
	ensure!(value < 100, "{} {} has more than two digits", what, value);
	Ok(value as u8)
}

/// `YYYY-MM-DD HH:MM:SS` (or `YY-...`, `T` as separator also accepted);
/// the day of week is derived from the date, 1 = Sunday.
impl str::FromStr for DateTime {
	type Err = ::failure::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let (date_s, time_s) = match s.find(|c: char| c == ' ' || c == 'T') {
			Some(pos) => (&s[..pos], s[pos + 1..].trim_start()),
			None => bail!("expected \"YYYY-MM-DD HH:MM:SS\", got {:?}", s),
		};

		let [year, month, day_of_month] = parse_fields(date_s, '-', "date")?;
		let [hour, minute, second] = parse_fields(time_s, ':', "time")?;

		// no century register
		let year = if year >= 2000 { year - 2000 } else { year };
		let year = two_digits(year, "year")?;
		let month = two_digits(month, "month")?;
		let day_of_month = two_digits(day_of_month, "day")?;
		let hour = two_digits(hour, "hour")?;
		let minute = two_digits(minute, "minute")?;
		let second = two_digits(second, "second")?;

		Ok(DateTime {
			second,
			minute,
			hour,
			day_of_week: weekday_from_sunday(2000 + year as u16, month, day_of_month) + 1,
			day_of_month,
			month,
			year,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_full_year() {
		let dt: DateTime = "2024-06-20 09:15:30".parse().unwrap();
		assert_eq!(dt, DateTime {
			second: 30,
			minute: 15,
			hour: 9,
			day_of_week: 5, // thursday
			day_of_month: 20,
			month: 6,
			year: 24,
		});
		assert_eq!(dt.to_string(), "2024-06-20 09:15:30");
	}

	#[test]
	fn parse_short_year() {
		let dt: DateTime = "00-01-01T00:00:00".parse().unwrap();
		assert_eq!(dt.year, 0);
		assert_eq!(dt.day_of_week, 7); // saturday
	}

	#[test]
	fn parse_errors() {
		assert!("2024-06-20".parse::<DateTime>().is_err());
		assert!("2024-06 09:15:30".parse::<DateTime>().is_err());
		assert!("2024-06-20 09:15:30:00".parse::<DateTime>().is_err());
		assert!("1999-06-20 09:15:30".parse::<DateTime>().is_err());
		assert!("2024-06-xx 09:15:30".parse::<DateTime>().is_err());
	}

	#[test]
	fn weekdays() {
		assert_eq!(weekday_from_sunday(2024, 2, 29), 4);
		assert_eq!(weekday_from_sunday(2025, 7, 7), 1);
	}
}
