use std::fmt;

use crate::wire::{
	Device,
	RegisterOperations,
	Wire,
};

use super::consts::*;
use super::registers::{
	HoursRegister,
	SecondsRegister,
	WeekdayRegister,
	decode_field,
	encode_field,
};
use super::{
	DateTime,
	Mcp7941x,
};

/// Control and status bits sharing bytes with the time fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ControlStatus {
	pub clock_enabled: bool,
	pub hour_24: bool,
	pub battery_enabled: bool,
	pub oscillator_running: bool,
	pub power_failed: bool,
}

impl fmt::Display for ControlStatus {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fn flag(on: bool) -> &'static str {
			if on { "yes" } else { "no" }
		}
		writeln!(f, "clock enabled:      {}", flag(self.clock_enabled))?;
		writeln!(f, "24-hour mode:       {}", flag(self.hour_24))?;
		writeln!(f, "battery enabled:    {}", flag(self.battery_enabled))?;
		writeln!(f, "oscillator running: {}", flag(self.oscillator_running))?;
		write!(f, "power failed:       {}", flag(self.power_failed))
	}
}

impl<W: Wire> Mcp7941x<W> {
	/// Write all time fields, forcing 24-hour mode and battery backup,
	/// then start the clock.
	///
	/// Two bus writes: the bulk write keeps the clock stopped, the second
	/// sets ST. If the bus fails in between, registers keep whatever state
	/// they reached; nothing is rolled back.
	pub fn set_date_time(&mut self, dt: &DateTime) -> crate::AResult<()> {
		let mut weekday = WeekdayRegister::new(dt.day_of_week);
		weekday.set_battery_enable();

		let registers = [
			SecondsRegister::new(dt.second).0,
			encode_field(RTCMIN, dt.minute),
			HoursRegister::new(dt.hour).0,
			weekday.0,
			encode_field(RTCDATE, dt.day_of_month),
			encode_field(RTCMTH, dt.month),
			encode_field(RTCYEAR, dt.year),
		];
		self.wire.write_registers(Device::Rtc, RTC_LOCATION, &registers)?;

		let mut seconds = SecondsRegister::new(dt.second);
		seconds.set_clock_enable();
		self.wire.write_register(Device::Rtc, RTC_LOCATION + RTCSEC, seconds.0)?;

		debug!("date/time set to {} (day of week {})", dt, dt.day_of_week);
		Ok(())
	}

	pub fn get_date_time(&mut self) -> crate::AResult<DateTime> {
		let mut buf = [0u8; TIME_REGISTER_COUNT];
		self.wire.read_registers(Device::Rtc, RTC_LOCATION, &mut buf)?;

		let dt = DateTime {
			second: decode_field(RTCSEC, buf[RTCSEC as usize]),
			minute: decode_field(RTCMIN, buf[RTCMIN as usize]),
			hour: decode_field(RTCHOUR, buf[RTCHOUR as usize]),
			day_of_week: decode_field(RTCWKDAY, buf[RTCWKDAY as usize]),
			day_of_month: decode_field(RTCDATE, buf[RTCDATE as usize]),
			month: decode_field(RTCMTH, buf[RTCMTH as usize]),
			year: decode_field(RTCYEAR, buf[RTCYEAR as usize]),
		};
		debug!("date/time read: {} (day of week {})", dt, dt.day_of_week);
		Ok(dt)
	}

	fn read_seconds(&mut self) -> crate::AResult<SecondsRegister> {
		Ok(SecondsRegister(self.wire.read_register(Device::Rtc, RTC_LOCATION + RTCSEC)?))
	}

	/// Start the oscillator, keeping the seconds value.
	pub fn enable_clock(&mut self) -> crate::AResult<()> {
		let current = self.read_seconds()?;
		let mut seconds = SecondsRegister::new(current.seconds());
		seconds.set_clock_enable();
		self.wire.write_register(Device::Rtc, RTC_LOCATION + RTCSEC, seconds.0)?;
		debug!("clock enabled at second {}", current.seconds());
		Ok(())
	}

	/// Stop the oscillator, keeping the seconds value.
	pub fn disable_clock(&mut self) -> crate::AResult<()> {
		let current = self.read_seconds()?;
		let seconds = SecondsRegister::new(current.seconds());
		self.wire.write_register(Device::Rtc, RTC_LOCATION + RTCSEC, seconds.0)?;
		debug!("clock disabled at second {}", current.seconds());
		Ok(())
	}

	/// Switch to the backup battery on main power loss, keeping the day of
	/// week.
	pub fn enable_battery(&mut self) -> crate::AResult<()> {
		let current = WeekdayRegister(self.wire.read_register(Device::Rtc, RTC_LOCATION + RTCWKDAY)?);
		let mut weekday = WeekdayRegister::new(current.day());
		weekday.set_battery_enable();
		self.wire.write_register(Device::Rtc, RTC_LOCATION + RTCWKDAY, weekday.0)?;
		debug!("battery backup enabled (day of week {})", current.day());
		Ok(())
	}

	pub fn control_status(&mut self) -> crate::AResult<ControlStatus> {
		let mut buf = [0u8; 4];
		self.wire.read_registers(Device::Rtc, RTC_LOCATION, &mut buf)?;
		let seconds = SecondsRegister(buf[RTCSEC as usize]);
		let hours = HoursRegister(buf[RTCHOUR as usize]);
		let weekday = WeekdayRegister(buf[RTCWKDAY as usize]);
		trace!("{:?} {:?} {:?}", seconds, hours, weekday);

		Ok(ControlStatus {
			clock_enabled: seconds.is_clock_enabled(),
			hour_24: !hours.is_12_hour(),
			battery_enabled: weekday.is_battery_enabled(),
			oscillator_running: weekday.is_oscillator_running(),
			power_failed: weekday.is_power_failed(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire::SimulatedChip;

	fn sample() -> DateTime {
		DateTime {
			second: 30,
			minute: 15,
			hour: 9,
			day_of_week: 3,
			day_of_month: 20,
			month: 6,
			year: 24,
		}
	}

	#[test]
	fn set_date_time_wire_format() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		rtc.set_date_time(&sample()).unwrap();

		let writes = rtc.wire().writes_to(Device::Rtc);
		assert_eq!(writes, vec![
			&[0x00u8, 0x30, 0x15, 0x09, 0x0b, 0x20, 0x06, 0x24][..],
			&[0x00u8, 0xb0][..],
		]);
	}

	#[test]
	fn set_date_time_clears_12_hour_mode() {
		let mut chip = SimulatedChip::new();
		chip.set_rtc_register(RTCHOUR, 0x40 | 0x11);
		let mut rtc = Mcp7941x::new(chip);
		rtc.set_date_time(&sample()).unwrap();
		assert_eq!(rtc.wire().rtc_register(RTCHOUR), 0x09);
		assert!(rtc.control_status().unwrap().hour_24);
	}

	#[test]
	fn get_date_time_masks_control_bits() {
		let mut chip = SimulatedChip::new();
		for (reg, value) in [0x80 | 0x59, 0x80 | 0x01, 0x40 | 0x23, OSCRUN | VBATEN | 0x07, 0xc0 | 0x31, 0x20 | 0x12, 0x99].iter().enumerate() {
			chip.set_rtc_register(reg as u8, *value);
		}
		let mut rtc = Mcp7941x::new(chip);
		assert_eq!(rtc.get_date_time().unwrap(), DateTime {
			second: 59,
			minute: 1,
			hour: 23,
			day_of_week: 7,
			day_of_month: 31,
			month: 12,
			year: 99,
		});
		assert_eq!(rtc.wire().writes_to(Device::Rtc), vec![&[0x00u8][..]]);
	}

	#[test]
	fn clock_enable_keeps_seconds() {
		let mut chip = SimulatedChip::new();
		chip.set_rtc_register(RTCSEC, 0x42);
		let mut rtc = Mcp7941x::new(chip);

		rtc.enable_clock().unwrap();
		assert_eq!(rtc.wire().rtc_register(RTCSEC), 0xc2);
		assert!(rtc.control_status().unwrap().oscillator_running);

		rtc.disable_clock().unwrap();
		assert_eq!(rtc.wire().rtc_register(RTCSEC), 0x42);
		assert!(!rtc.control_status().unwrap().clock_enabled);
	}

	#[test]
	fn battery_enable_keeps_day() {
		let mut chip = SimulatedChip::new();
		chip.set_rtc_register(RTCWKDAY, 0x06);
		let mut rtc = Mcp7941x::new(chip);

		rtc.enable_battery().unwrap();
		assert_eq!(rtc.wire().rtc_register(RTCWKDAY), 0x0e);
		assert_eq!(rtc.get_date_time().unwrap().day_of_week, 6);
	}
}
