use crate::error::Error;
use crate::wire::{
	Device,
	RegisterOperations,
	Wire,
};

use super::consts::*;
use super::Mcp7941x;

fn check_range(location: u8, len: usize) -> crate::AResult<()> {
	let in_range = location >= SRAM_START
		&& location <= SRAM_END
		&& len <= (SRAM_END - location) as usize + 1;
	if !in_range {
		return Err(Error::SramRange { location, len }.into());
	}
	Ok(())
}

impl<W: Wire> Mcp7941x<W> {
	/// Store a byte in battery backed SRAM (0x20..=0x5f); other locations
	/// are rejected without touching the bus.
	pub fn set_sram_byte(&mut self, location: u8, data: u8) -> crate::AResult<()> {
		check_range(location, 1)?;
		self.wire.write_register(Device::Rtc, location, data)?;
		debug!("SRAM 0x{:02x} <- 0x{:02x}", location, data);
		Ok(())
	}

	pub fn get_sram_byte(&mut self, location: u8) -> crate::AResult<u8> {
		check_range(location, 1)?;
		let data = self.wire.read_register(Device::Rtc, location)?;
		debug!("SRAM 0x{:02x} -> 0x{:02x}", location, data);
		Ok(data)
	}

	/// Burst write; the whole span has to fit into the SRAM window.
	pub fn write_sram(&mut self, location: u8, data: &[u8]) -> crate::AResult<()> {
		check_range(location, data.len())?;
		self.wire.write_registers(Device::Rtc, location, data)?;
		debug!("SRAM 0x{:02x}: wrote {} byte(s)", location, data.len());
		Ok(())
	}

	pub fn read_sram(&mut self, location: u8, target: &mut [u8]) -> crate::AResult<()> {
		check_range(location, target.len())?;
		self.wire.read_registers(Device::Rtc, location, target)?;
		debug!("SRAM 0x{:02x}: read {} byte(s)", location, target.len());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire::SimulatedChip;

	#[test]
	fn window_bounds() {
		assert!(check_range(0x20, 1).is_ok());
		assert!(check_range(0x5f, 1).is_ok());
		assert!(check_range(0x20, SRAM_LEN).is_ok());
		assert!(check_range(0x1f, 1).is_err());
		assert!(check_range(0x60, 1).is_err());
		assert!(check_range(0x21, SRAM_LEN).is_err());
		assert!(check_range(0xff, 0).is_err());
	}

	#[test]
	fn byte_round_trip() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		rtc.set_sram_byte(0x30, 0xab).unwrap();
		assert_eq!(rtc.get_sram_byte(0x30).unwrap(), 0xab);
	}

	#[test]
	fn out_of_range_is_rejected_without_bus_traffic() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		let e = rtc.set_sram_byte(0x1f, 0xab).unwrap_err();
		assert_eq!(e.downcast_ref::<Error>(), Some(&Error::SramRange { location: 0x1f, len: 1 }));
		assert!(rtc.get_sram_byte(0x60).unwrap_err().downcast_ref::<Error>().unwrap().is_range());
		assert_eq!(rtc.wire().rtc_register(0x1f), 0);
		assert!(rtc.wire().events().is_empty());
	}

	#[test]
	fn burst_access() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		rtc.write_sram(0x5c, &[1, 2, 3, 4]).unwrap();
		let mut buf = [0u8; 4];
		rtc.read_sram(0x5c, &mut buf).unwrap();
		assert_eq!(buf, [1, 2, 3, 4]);
		assert!(rtc.write_sram(0x5d, &[1, 2, 3, 4]).is_err());
	}
}
