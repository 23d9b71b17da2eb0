use crate::wire::Wire;

use super::{
	DateTime,
	MacAddress,
	Mcp7941x,
};

/// Permissive view of a `Mcp7941x`: nothing fails.
///
/// Setters swallow errors, getters return `None` where the strict API
/// would fail. Swallowed errors are logged as warnings.
pub struct Lenient<'a, W: Wire + 'a> {
	rtc: &'a mut Mcp7941x<W>,
}

fn discard<T>(what: &str, result: crate::AResult<T>) -> Option<T> {
	match result {
		Ok(v) => Some(v),
		Err(e) => {
			warn!("{} failed (ignored): {}", what, e);
			None
		},
	}
}

impl<'a, W: Wire> Lenient<'a, W> {
	pub(super) fn new(rtc: &'a mut Mcp7941x<W>) -> Self {
		Lenient { rtc }
	}

	pub fn set_date_time(&mut self, dt: &DateTime) {
		discard("set_date_time", self.rtc.set_date_time(dt));
	}

	pub fn get_date_time(&mut self) -> Option<DateTime> {
		discard("get_date_time", self.rtc.get_date_time())
	}

	pub fn enable_clock(&mut self) {
		discard("enable_clock", self.rtc.enable_clock());
	}

	pub fn disable_clock(&mut self) {
		discard("disable_clock", self.rtc.disable_clock());
	}

	pub fn enable_battery(&mut self) {
		discard("enable_battery", self.rtc.enable_battery());
	}

	pub fn set_sram_byte(&mut self, location: u8, data: u8) {
		discard("set_sram_byte", self.rtc.set_sram_byte(location, data));
	}

	pub fn get_sram_byte(&mut self, location: u8) -> Option<u8> {
		discard("get_sram_byte", self.rtc.get_sram_byte(location))
	}

	pub fn unlock_unique_id(&mut self) {
		discard("unlock_unique_id", self.rtc.unlock_unique_id());
	}

	pub fn write_mac_address(&mut self, mac: &MacAddress) {
		discard("write_mac_address", self.rtc.write_mac_address(mac));
	}

	pub fn get_mac_address(&mut self) -> Option<MacAddress> {
		discard("get_mac_address", self.rtc.get_mac_address())
	}
}
