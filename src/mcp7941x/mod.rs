/* Chip documentation: Microchip DS20002266 (MCP7941X Battery-Backed I²C RTCC with SRAM, EEPROM and Unique ID) */

//! Only the 24-hour clock is supported; date/time fields are not
//! validated. Alarms, the multi-function pin and calibration are not
//! touched. There is no `disable_battery`.

use crate::wire::Wire;

mod clock;
mod datetime;
mod identity;
mod lenient;
mod registers;
mod sram;

pub use self::clock::ControlStatus;
pub use self::datetime::DateTime;
pub use self::identity::MacAddress;
pub use self::lenient::Lenient;
pub use self::registers::{
	HoursRegister,
	SecondsRegister,
	WeekdayRegister,
};

pub mod consts {
	// RTC device: timekeeping registers, offsets from RTC_LOCATION
	pub const RTC_LOCATION: u8 = 0x00;
	pub const RTCSEC: u8 = 0x00;
	pub const RTCMIN: u8 = 0x01;
	pub const RTCHOUR: u8 = 0x02;
	pub const RTCWKDAY: u8 = 0x03;
	pub const RTCDATE: u8 = 0x04;
	pub const RTCMTH: u8 = 0x05;
	pub const RTCYEAR: u8 = 0x06;
	pub const TIME_REGISTER_COUNT: usize = 7;

	// data bits of each timekeeping register, RTCSEC..=RTCYEAR
	pub const TIME_FIELD_MASKS: [u8; TIME_REGISTER_COUNT] = [0x7f, 0x7f, 0x3f, 0x07, 0x3f, 0x1f, 0xff];

	pub const ST: u8 = 0x80; // RTCSEC: start oscillator
	pub const HOUR_12: u8 = 0x40; // RTCHOUR: 12-hour format when set
	pub const OSCRUN: u8 = 0x20; // RTCWKDAY: oscillator running (read only)
	pub const PWRFAIL: u8 = 0x10; // RTCWKDAY: power failure recorded
	pub const VBATEN: u8 = 0x08; // RTCWKDAY: battery backup enabled

	// RTC device: protected block unlock
	pub const EEUNLOCK: u8 = 0x09;
	pub const EEUNLOCK_FIRST_KEY: u8 = 0x55;
	pub const EEUNLOCK_SECOND_KEY: u8 = 0xaa;

	// RTC device: battery backed SRAM, inclusive
	pub const SRAM_START: u8 = 0x20;
	pub const SRAM_END: u8 = 0x5f;
	pub const SRAM_LEN: usize = (SRAM_END - SRAM_START) as usize + 1;

	// EEPROM device: protected unique ID block
	pub const UNIQUE_ID_LOCATION: u8 = 0xf0;
	pub const UNIQUE_ID_LEN: usize = 8;
	// EUI-48 occupies the last six bytes of the block
	pub const MAC_WRITE_LOCATION: u8 = 0xf2;
	pub const MAC_READ_LOCATION: u8 = 0xf2;
	pub const MAC_LEN: usize = 6;
}

/// Driver session; owns the bus transport for its lifetime.
pub struct Mcp7941x<W: Wire> {
	wire: W,
}

impl<W: Wire> Mcp7941x<W> {
	pub fn new(wire: W) -> Self {
		Mcp7941x { wire }
	}

	pub fn wire(&self) -> &W {
		&self.wire
	}

	pub fn wire_mut(&mut self) -> &mut W {
		&mut self.wire
	}

	pub fn into_inner(self) -> W {
		self.wire
	}

	/// Facade with the permissive semantics: failures are logged and
	/// dropped, getters return `None` instead.
	pub fn lenient(&mut self) -> Lenient<W> {
		Lenient::new(self)
	}
}
