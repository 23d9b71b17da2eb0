use crate::error::Error;

use super::{
	Device,
	Wire,
};

pub(super) fn bus_error(device: Device, e: failure::Error) -> failure::Error {
	Error::Bus {
		address: device.address(),
		message: e.to_string(),
	}.into()
}

/// Open write message; the register pointer has already been queued.
///
/// `finish` closes the message and reports bus errors. If dropped without
/// `finish` the message is still closed, but errors only get logged.
pub struct WriteTransaction<'a, W: ?Sized + Wire + 'a> {
	wire: &'a mut W,
	device: Device,
	open: bool,
}

impl<'a, W: ?Sized + Wire> WriteTransaction<'a, W> {
	pub fn send_all(&mut self, data: &[u8]) {
		for b in data {
			self.wire.queue_byte(*b);
		}
	}

	pub fn finish(mut self) -> crate::AResult<()> {
		self.open = false;
		let device = self.device;
		self.wire.end_transaction().map_err(|e| bus_error(device, e))
	}
}

impl<'a, W: ?Sized + Wire> Drop for WriteTransaction<'a, W> {
	fn drop(&mut self) {
		if self.open {
			if let Err(e) = self.wire.end_transaction() {
				warn!("{}: couldn't close abandoned write: {}", self.device, e);
			}
		}
	}
}

/// Bytes of a completed read request, in register order.
pub struct Reader<'a, W: ?Sized + Wire + 'a> {
	wire: &'a mut W,
	device: Device,
	remaining: usize,
}

impl<'a, W: ?Sized + Wire> Reader<'a, W> {
	pub fn read_byte(&mut self) -> crate::AResult<u8> {
		ensure!(0 != self.remaining, "{}: read past the requested length", self.device);
		self.remaining -= 1;
		match self.wire.receive_byte() {
			Some(b) => Ok(b),
			None => Err(Error::Bus {
				address: self.device.address(),
				message: "receive buffer ran empty".into(),
			}.into()),
		}
	}

	pub fn read(&mut self, target: &mut [u8]) -> crate::AResult<()> {
		for t in target.iter_mut() {
			*t = self.read_byte()?;
		}
		Ok(())
	}
}

pub trait LowLevel: Wire {
	/// open a write message to `device` and queue the register pointer
	fn start_write(&mut self, device: Device, pointer: u8) -> WriteTransaction<Self> {
		self.begin_transaction(device.address());
		self.queue_byte(pointer);

		WriteTransaction {
			wire: self,
			device,
			open: true,
		}
	}

	/// clock exactly `count` bytes out of `device`, starting at its current
	/// pointer
	fn start_read(&mut self, device: Device, count: usize) -> crate::AResult<Reader<Self>> {
		let received = self.request_bytes(device.address(), count).map_err(|e| bus_error(device, e))?;
		if received != count {
			return Err(Error::Bus {
				address: device.address(),
				message: format!("requested {} byte(s), received {}", count, received),
			}.into());
		}

		Ok(Reader {
			wire: self,
			device,
			remaining: count,
		})
	}
}

impl<W: Wire + ?Sized> LowLevel for W {
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire::simulated::BusEvent;
	use crate::wire::SimulatedChip;

	#[test]
	fn short_read_is_a_bus_error() {
		let mut chip = SimulatedChip::new();
		chip.set_short_reads(true);
		let e = match chip.start_read(Device::Rtc, 7) {
			Ok(_) => panic!("short read accepted"),
			Err(e) => e,
		};
		assert_eq!(e.downcast_ref::<Error>(), Some(&Error::Bus {
			address: 0x6f,
			message: "requested 7 byte(s), received 6".into(),
		}));
	}

	#[test]
	fn abandoned_write_is_still_sent() {
		let mut chip = SimulatedChip::new();
		{
			let mut tx = chip.start_write(Device::Rtc, 0x20);
			tx.send_all(&[0x11, 0x22]);
		}
		assert_eq!(chip.events(), &[
			BusEvent::Write { address: 0x6f, data: vec![0x20, 0x11, 0x22] },
		][..]);
		assert_eq!(chip.rtc_register(0x21), 0x22);
	}

	#[test]
	fn abandoned_write_failure_is_swallowed() {
		let mut chip = SimulatedChip::new();
		chip.fail_after(0);
		drop(chip.start_write(Device::Eeprom, 0x00));
		assert!(chip.events().is_empty());
	}

	#[test]
	fn read_past_requested_length() {
		let mut chip = SimulatedChip::new();
		let mut reader = chip.start_read(Device::Rtc, 1).unwrap();
		reader.read_byte().unwrap();
		assert!(reader.read_byte().is_err());
	}
}
