use std::fmt;

/// The two fixed bus addresses of the chip.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Device {
	/// timekeeping, control registers, SRAM
	Rtc,
	/// EEPROM array and protected unique ID block
	Eeprom,
}

impl Device {
	pub fn address(self) -> u8 {
		match self {
			Device::Rtc => 0x6f,
			Device::Eeprom => 0x57,
		}
	}
}

impl fmt::Display for Device {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Device::Rtc => write!(f, "RTC (0x{:02x})", self.address()),
			Device::Eeprom => write!(f, "EEPROM (0x{:02x})", self.address()),
		}
	}
}

/// Transport provided by the host platform's bus driver.
///
/// Bytes queued between `begin_transaction` and `end_transaction` go out in
/// one write message. `request_bytes` runs a separate read message and
/// buffers the result for `receive_byte`; bytes left over from an earlier
/// request are discarded.
pub trait Wire {
	fn begin_transaction(&mut self, address: u8);
	fn queue_byte(&mut self, data: u8);
	fn end_transaction(&mut self) -> crate::AResult<()>;

	/// returns how many bytes were actually received
	fn request_bytes(&mut self, address: u8, count: usize) -> crate::AResult<usize>;
	fn receive_byte(&mut self) -> Option<u8>;
}

impl<'a, W: ?Sized + Wire> Wire for &'a mut W {
	fn begin_transaction(&mut self, address: u8) {
		W::begin_transaction(*self, address)
	}
	fn queue_byte(&mut self, data: u8) {
		W::queue_byte(*self, data)
	}
	fn end_transaction(&mut self) -> crate::AResult<()> {
		W::end_transaction(*self)
	}
	fn request_bytes(&mut self, address: u8, count: usize) -> crate::AResult<usize> {
		W::request_bytes(*self, address, count)
	}
	fn receive_byte(&mut self) -> Option<u8> {
		W::receive_byte(*self)
	}
}
