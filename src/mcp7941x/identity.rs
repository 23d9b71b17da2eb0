use std::fmt;
use std::str;

use crate::wire::{
	Device,
	RegisterOperations,
	Wire,
};

use super::consts::*;
use super::Mcp7941x;

/// EUI-48, as stored in the protected unique ID block.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MacAddress(pub [u8; MAC_LEN]);

impl fmt::Display for MacAddress {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let m = &self.0;
		write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", m[0], m[1], m[2], m[3], m[4], m[5])
	}
}

impl fmt::Debug for MacAddress {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "MacAddress({})", self)
	}
}

impl str::FromStr for MacAddress {
	type Err = ::failure::Error;

	/// `aa:bb:cc:dd:ee:ff`, `-` also accepted as separator
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut mac = [0u8; MAC_LEN];
		let mut parts = s.split(|c: char| c == ':' || c == '-');
		for byte in mac.iter_mut() {
			let part = match parts.next() {
				Some(p) => p,
				None => bail!("MAC address too short: {:?}", s),
			};
			ensure!(
				part.len() == 2 && part.bytes().all(|b| b.is_ascii_hexdigit()),
				"invalid MAC address octet {:?} in {:?}", part, s
			);
			*byte = with_context!(("invalid MAC address octet {:?}", part),
				Ok(u8::from_str_radix(part, 16)?)
			)?;
		}
		ensure!(parts.next().is_none(), "MAC address too long: {:?}", s);
		Ok(MacAddress(mac))
	}
}

impl<W: Wire> Mcp7941x<W> {
	/// Two-key handshake making the next unique ID write stick.
	///
	/// Each key goes out in its own message; the chip relocks after the
	/// next write to the protected block.
	pub fn unlock_unique_id(&mut self) -> crate::AResult<()> {
		self.wire.write_register(Device::Rtc, EEUNLOCK, EEUNLOCK_FIRST_KEY)?;
		self.wire.write_register(Device::Rtc, EEUNLOCK, EEUNLOCK_SECOND_KEY)?;
		debug!("unique ID unlock sequence sent");
		Ok(())
	}

	/// Write the MAC in one burst. Silently ignored by the chip unless
	/// `unlock_unique_id` ran right before.
	pub fn write_mac_address(&mut self, mac: &MacAddress) -> crate::AResult<()> {
		self.wire.write_registers(Device::Eeprom, MAC_WRITE_LOCATION, &mac.0)?;
		debug!("MAC address {} written", mac);
		Ok(())
	}

	pub fn get_mac_address(&mut self) -> crate::AResult<MacAddress> {
		let mut mac = MacAddress::default();
		self.wire.read_registers(Device::Eeprom, MAC_READ_LOCATION, &mut mac.0)?;
		debug!("MAC address read: {}", mac);
		Ok(mac)
	}

	/// Whole protected block (EUI-64 on the MCP79412).
	pub fn get_unique_id(&mut self) -> crate::AResult<[u8; UNIQUE_ID_LEN]> {
		let mut id = [0u8; UNIQUE_ID_LEN];
		self.wire.read_registers(Device::Eeprom, UNIQUE_ID_LOCATION, &mut id)?;
		debug!("unique ID read: {:02x?}", id);
		Ok(id)
	}

	/// Unlock, write and verify by reading back.
	pub fn program_mac_address(&mut self, mac: &MacAddress) -> crate::AResult<()> {
		self.unlock_unique_id()?;
		self.write_mac_address(mac)?;

		let stored = self.get_mac_address()?;
		ensure!(stored == *mac, "Verify failed: wrote MAC {}, chip has {}", mac, stored);
		info!("MAC address {} programmed", mac);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wire::SimulatedChip;

	const MAC: MacAddress = MacAddress([0x00, 0x04, 0xa3, 0x12, 0x34, 0x56]);

	#[test]
	fn parse_and_display() {
		let mac: MacAddress = "00:04:A3:12:34:56".parse().unwrap();
		assert_eq!(mac, MAC);
		assert_eq!(mac.to_string(), "00:04:a3:12:34:56");
		assert_eq!("00-04-a3-12-34-56".parse::<MacAddress>().unwrap(), MAC);

		assert!("00:04:a3:12:34".parse::<MacAddress>().is_err());
		assert!("00:04:a3:12:34:56:78".parse::<MacAddress>().is_err());
		assert!("00:04:a3:12:34:5g".parse::<MacAddress>().is_err());
		assert!("0:04:a3:12:34:56".parse::<MacAddress>().is_err());
		assert!("00:04:+3:12:34:56".parse::<MacAddress>().is_err());
		assert!("00:04:-3:12:34:56".parse::<MacAddress>().is_err());
		assert!("00:04: 3:12:34:56".parse::<MacAddress>().is_err());
	}

	#[test]
	fn unlock_sequence() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		rtc.unlock_unique_id().unwrap();
		assert_eq!(rtc.wire().writes_to(Device::Rtc), vec![
			&[EEUNLOCK, 0x55][..],
			&[EEUNLOCK, 0xaa][..],
		]);
	}

	#[test]
	fn write_without_unlock_is_ignored() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		rtc.write_mac_address(&MAC).unwrap();
		assert_eq!(rtc.get_mac_address().unwrap(), MacAddress([0xff; 6]));
		assert!(rtc.program_mac_address(&MAC).is_ok());
	}

	#[test]
	fn program_and_read_back() {
		let mut rtc = Mcp7941x::new(SimulatedChip::new());
		rtc.program_mac_address(&MAC).unwrap();
		assert_eq!(rtc.get_mac_address().unwrap(), MAC);
		assert_eq!(rtc.wire().writes_to(Device::Eeprom)[0], &[0xf2u8, 0x00, 0x04, 0xa3, 0x12, 0x34, 0x56][..]);

		let id = rtc.get_unique_id().unwrap();
		assert_eq!(id, [0xffu8, 0xff, 0x00, 0x04, 0xa3, 0x12, 0x34, 0x56]);
	}
}
