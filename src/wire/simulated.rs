//! In-memory model of an MCP7941x, for exercising drivers without hardware.
//!
//! Models what the driver can observe: both register files with pointer
//! auto-increment, the OSCRUN status mirroring the ST bit, and the unique
//! ID write protection with its two-key unlock. The oscillator doesn't tick.

use std::collections::VecDeque;

use crate::mcp7941x::consts::*;

use super::{
	Device,
	Wire,
};

/// A completed bus message, as seen by the chip.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BusEvent {
	Write {
		address: u8,
		data: Vec<u8>,
	},
	Read {
		address: u8,
		count: usize,
	},
}

/// State of the unique ID write protection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IdLock {
	Locked,
	/// saw 0x55 at EEUNLOCK
	FirstKey,
	/// saw 0x55 then 0xaa; the next unique ID write is accepted
	Unlocked,
}

pub struct SimulatedChip {
	rtc: [u8; 256],
	eeprom: [u8; 256],
	rtc_pointer: u8,
	eeprom_pointer: u8,
	id_lock: IdLock,
	pending: Option<(u8, Vec<u8>)>,
	received: VecDeque<u8>,
	events: Vec<BusEvent>,
	// messages still acknowledged before the chip drops off the bus
	ack_budget: Option<usize>,
	// answer read requests with one byte less than asked for
	short_reads: bool,
}

impl Default for SimulatedChip {
	fn default() -> Self {
		SimulatedChip::new()
	}
}

impl SimulatedChip {
	pub fn new() -> Self {
		SimulatedChip {
			rtc: [0u8; 256],
			// erased EEPROM reads as 0xff
			eeprom: [0xffu8; 256],
			rtc_pointer: 0,
			eeprom_pointer: 0,
			id_lock: IdLock::Locked,
			pending: None,
			received: VecDeque::new(),
			events: Vec::new(),
			ack_budget: None,
			short_reads: false,
		}
	}

	pub fn rtc_register(&self, register: u8) -> u8 {
		self.rtc[register as usize]
	}

	/// poke a register directly, bypassing the bus and the chip's rules
	pub fn set_rtc_register(&mut self, register: u8, value: u8) {
		self.rtc[register as usize] = value;
	}

	pub fn eeprom_byte(&self, address: u8) -> u8 {
		self.eeprom[address as usize]
	}

	pub fn set_eeprom_byte(&mut self, address: u8, value: u8) {
		self.eeprom[address as usize] = value;
	}

	pub fn id_lock(&self) -> IdLock {
		self.id_lock
	}

	pub fn events(&self) -> &[BusEvent] {
		&self.events
	}

	pub fn clear_events(&mut self) {
		self.events.clear();
	}

	/// data of all completed write messages to `device`
	pub fn writes_to(&self, device: Device) -> Vec<&[u8]> {
		self.events.iter().filter_map(|ev| match ev {
			BusEvent::Write { address, data } if *address == device.address() => Some(&data[..]),
			_ => None,
		}).collect()
	}

	/// acknowledge `messages` more bus messages, then stop answering
	pub fn fail_after(&mut self, messages: usize) {
		self.ack_budget = Some(messages);
	}

	pub fn reconnect(&mut self) {
		self.ack_budget = None;
	}

	/// make read requests come back one byte short
	pub fn set_short_reads(&mut self, short: bool) {
		self.short_reads = short;
	}

	fn acknowledge(&mut self, address: u8) -> crate::AResult<()> {
		if address != Device::Rtc.address() && address != Device::Eeprom.address() {
			bail!("no acknowledge from 0x{:02x}", address);
		}
		match self.ack_budget {
			Some(0) => bail!("no acknowledge from 0x{:02x}", address),
			Some(ref mut n) => *n -= 1,
			None => (),
		}
		Ok(())
	}

	fn write_rtc(&mut self, register: u8, value: u8) {
		if register == EEUNLOCK {
			self.id_lock = match (self.id_lock, value) {
				(_, EEUNLOCK_FIRST_KEY) => IdLock::FirstKey,
				(IdLock::FirstKey, EEUNLOCK_SECOND_KEY) => IdLock::Unlocked,
				_ => IdLock::Locked,
			};
			return;
		}

		let wkday = (RTC_LOCATION + RTCWKDAY) as usize;
		if register == RTC_LOCATION + RTCWKDAY {
			// OSCRUN is read-only
			self.rtc[wkday] = (value & !OSCRUN) | (self.rtc[wkday] & OSCRUN);
			return;
		}

		self.rtc[register as usize] = value;
		if register == RTC_LOCATION + RTCSEC {
			// oscillator follows the start bit
			self.rtc[wkday] &= !OSCRUN;
			if 0 != value & ST {
				self.rtc[wkday] |= OSCRUN;
			}
		}
	}

	fn apply_rtc(&mut self, data: &[u8]) {
		if let Some((&pointer, payload)) = data.split_first() {
			self.rtc_pointer = pointer;
			for &b in payload {
				let register = self.rtc_pointer;
				self.write_rtc(register, b);
				self.rtc_pointer = self.rtc_pointer.wrapping_add(1);
			}
		}
	}

	fn apply_eeprom(&mut self, data: &[u8]) {
		if let Some((&pointer, payload)) = data.split_first() {
			self.eeprom_pointer = pointer;
			if payload.is_empty() {
				return;
			}
			if pointer >= UNIQUE_ID_LOCATION {
				let unlocked = self.id_lock == IdLock::Unlocked;
				// every unique ID write consumes the unlock
				self.id_lock = IdLock::Locked;
				if !unlocked {
					return;
				}
			}
			for &b in payload {
				self.eeprom[self.eeprom_pointer as usize] = b;
				self.eeprom_pointer = self.eeprom_pointer.wrapping_add(1);
			}
		}
	}
}

impl Wire for SimulatedChip {
	fn begin_transaction(&mut self, address: u8) {
		self.pending = Some((address, Vec::new()));
	}

	fn queue_byte(&mut self, data: u8) {
		if let Some((_, ref mut buf)) = self.pending {
			buf.push(data);
		}
	}

	fn end_transaction(&mut self) -> crate::AResult<()> {
		let (address, data) = match self.pending.take() {
			Some(p) => p,
			None => bail!("no transaction in progress"),
		};
		self.acknowledge(address)?;

		if address == Device::Rtc.address() {
			self.apply_rtc(&data);
		} else {
			self.apply_eeprom(&data);
		}
		self.events.push(BusEvent::Write { address, data });
		Ok(())
	}

	fn request_bytes(&mut self, address: u8, count: usize) -> crate::AResult<usize> {
		self.received.clear();
		self.acknowledge(address)?;

		let count = if self.short_reads { count.saturating_sub(1) } else { count };
		for _ in 0..count {
			let b = if address == Device::Rtc.address() {
				let b = self.rtc[self.rtc_pointer as usize];
				self.rtc_pointer = self.rtc_pointer.wrapping_add(1);
				b
			} else {
				let b = self.eeprom[self.eeprom_pointer as usize];
				self.eeprom_pointer = self.eeprom_pointer.wrapping_add(1);
				b
			};
			self.received.push_back(b);
		}
		self.events.push(BusEvent::Read { address, count });
		Ok(count)
	}

	fn receive_byte(&mut self) -> Option<u8> {
		self.received.pop_front()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire::RegisterOperations;

	#[test]
	fn pointer_auto_increments() {
		let mut chip = SimulatedChip::new();
		chip.write_registers(Device::Rtc, 0x20, &[1, 2, 3]).unwrap();
		assert_eq!(chip.rtc_register(0x21), 2);

		let mut buf = [0u8; 3];
		chip.read_registers(Device::Rtc, 0x20, &mut buf).unwrap();
		assert_eq!(buf, [1, 2, 3]);
	}

	#[test]
	fn unlock_needs_both_keys_in_order() {
		let mut chip = SimulatedChip::new();
		chip.write_register(Device::Rtc, EEUNLOCK, 0xaa).unwrap();
		assert_eq!(chip.id_lock(), IdLock::Locked);
		chip.write_register(Device::Rtc, EEUNLOCK, 0x55).unwrap();
		assert_eq!(chip.id_lock(), IdLock::FirstKey);
		chip.write_register(Device::Rtc, EEUNLOCK, 0xaa).unwrap();
		assert_eq!(chip.id_lock(), IdLock::Unlocked);

		chip.write_registers(Device::Eeprom, 0xf2, &[0x42]).unwrap();
		assert_eq!(chip.eeprom_byte(0xf2), 0x42);
		assert_eq!(chip.id_lock(), IdLock::Locked);
	}

	#[test]
	fn locked_id_write_is_ignored() {
		let mut chip = SimulatedChip::new();
		chip.write_registers(Device::Eeprom, 0xf2, &[0x42]).unwrap();
		assert_eq!(chip.eeprom_byte(0xf2), 0xff);
		// the chip still acknowledges it
		assert_eq!(chip.writes_to(Device::Eeprom), vec![&[0xf2u8, 0x42][..]]);
	}

	#[test]
	fn stops_answering() {
		let mut chip = SimulatedChip::new();
		chip.fail_after(1);
		chip.write_register(Device::Rtc, 0x20, 1).unwrap();
		assert!(chip.write_register(Device::Rtc, 0x21, 2).is_err());
		assert_eq!(chip.rtc_register(0x21), 0);
		chip.reconnect();
		chip.write_register(Device::Rtc, 0x21, 2).unwrap();
	}
}
