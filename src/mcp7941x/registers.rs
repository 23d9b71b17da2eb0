use std::fmt;

use crate::bcd::{
	bcd_to_dec,
	dec_to_bcd,
};

use super::consts::*;

/// BCD encode `value` and keep only the data bits of timekeeping register
/// `offset` (RTCSEC..=RTCYEAR); control bits end up cleared.
pub fn encode_field(offset: u8, value: u8) -> u8 {
	dec_to_bcd(value) & TIME_FIELD_MASKS[offset as usize]
}

/// Strip control bits of timekeeping register `offset`, then BCD decode.
pub fn decode_field(offset: u8, raw: u8) -> u8 {
	bcd_to_dec(raw & TIME_FIELD_MASKS[offset as usize])
}

/// RTCSEC: seconds in BCD, ST (start oscillator) in bit 7
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecondsRegister(pub u8);

impl SecondsRegister {
	/// seconds with the clock disabled
	pub fn new(seconds: u8) -> Self {
		SecondsRegister(encode_field(RTCSEC, seconds))
	}

	pub fn seconds(&self) -> u8 {
		decode_field(RTCSEC, self.0)
	}

	pub fn set_seconds(&mut self, seconds: u8) -> &mut Self {
		self.0 = (self.0 & ST) | encode_field(RTCSEC, seconds);
		self
	}

	pub fn is_clock_enabled(&self) -> bool {
		0 != self.0 & ST
	}
	pub fn set_clock_enable(&mut self) -> &mut Self {
		self.0 |= ST;
		self
	}
	pub fn clear_clock_enable(&mut self) -> &mut Self {
		self.0 &= !ST;
		self
	}
}

impl fmt::Debug for SecondsRegister {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x} (seconds: {}", self.0, self.seconds())?;
		if self.is_clock_enabled() { write!(f, " [ST]")?; }
		write!(f, ")")
	}
}

/// RTCHOUR: hours in BCD, 12/24 select in bit 6 (only 24-hour is used)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HoursRegister(pub u8);

impl HoursRegister {
	/// hours in 24-hour format
	pub fn new(hours: u8) -> Self {
		HoursRegister(encode_field(RTCHOUR, hours))
	}

	pub fn hours(&self) -> u8 {
		decode_field(RTCHOUR, self.0)
	}

	pub fn is_12_hour(&self) -> bool {
		0 != self.0 & HOUR_12
	}
}

impl fmt::Debug for HoursRegister {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x} (hours: {}", self.0, self.hours())?;
		if self.is_12_hour() { write!(f, " [12H]")?; }
		write!(f, ")")
	}
}

/// RTCWKDAY: day of week 1-7 in bits 0-2, VBATEN, PWRFAIL and OSCRUN above
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekdayRegister(pub u8);

impl WeekdayRegister {
	/// day of week with battery backup disabled
	pub fn new(day: u8) -> Self {
		WeekdayRegister(encode_field(RTCWKDAY, day))
	}

	pub fn day(&self) -> u8 {
		decode_field(RTCWKDAY, self.0)
	}

	pub fn is_battery_enabled(&self) -> bool {
		0 != self.0 & VBATEN
	}
	pub fn set_battery_enable(&mut self) -> &mut Self {
		self.0 |= VBATEN;
		self
	}

	pub fn is_power_failed(&self) -> bool {
		0 != self.0 & PWRFAIL
	}

	pub fn is_oscillator_running(&self) -> bool {
		0 != self.0 & OSCRUN
	}
}

impl fmt::Debug for WeekdayRegister {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x} (day: {}", self.0, self.day())?;
		if self.is_battery_enabled() { write!(f, " [VBATEN]")?; }
		if self.is_power_failed() { write!(f, " [PWRFAIL]")?; }
		if self.is_oscillator_running() { write!(f, " [OSCRUN]")?; }
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seconds_keep_start_bit() {
		let mut reg = SecondsRegister(0x80 | 0x12);
		reg.set_seconds(45);
		assert_eq!(reg.0, 0xc5);
		assert!(reg.is_clock_enabled());
		reg.clear_clock_enable();
		assert_eq!(reg.0, 0x45);
		assert_eq!(reg.seconds(), 45);
	}

	#[test]
	fn hours_force_24_hour() {
		assert_eq!(HoursRegister::new(23).0, 0x23);
		assert!(!HoursRegister::new(23).is_12_hour());
		// 12/24 bit and AM/PM bit are not part of the value
		assert_eq!(HoursRegister(0x40 | 0x20 | 0x09).hours(), 29);
		assert_eq!(HoursRegister(0x40 | 0x11).hours(), 11);
	}

	#[test]
	fn weekday_status_bits() {
		let reg = WeekdayRegister(OSCRUN | PWRFAIL | VBATEN | 0x05);
		assert_eq!(reg.day(), 5);
		assert!(reg.is_battery_enabled());
		assert!(reg.is_power_failed());
		assert!(reg.is_oscillator_running());

		let mut reg = WeekdayRegister::new(3);
		assert!(!reg.is_battery_enabled());
		reg.set_battery_enable();
		assert_eq!(reg.0, 0x0b);
	}

	#[test]
	fn field_masks() {
		assert_eq!(encode_field(RTCMIN, 59), 0x59);
		assert_eq!(encode_field(RTCMTH, 12), 0x12);
		assert_eq!(decode_field(RTCMTH, 0xf2), 12);
		assert_eq!(decode_field(RTCYEAR, 0x99), 99);
	}
}
