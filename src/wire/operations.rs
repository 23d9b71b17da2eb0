use super::{
	Device,
	LowLevel,
	Wire,
};

/// Pointer-addressed register access on top of `LowLevel` transactions.
pub trait RegisterOperations: LowLevel {
	/// one write message: pointer followed by `data`
	fn write_registers(&mut self, device: Device, pointer: u8, data: &[u8]) -> crate::AResult<()> {
		let mut tx = self.start_write(device, pointer);
		tx.send_all(data);
		tx.finish()?;
		trace!("{} @{:02x} <- {:02x?}", device, pointer, data);
		Ok(())
	}

	fn write_register(&mut self, device: Device, pointer: u8, data: u8) -> crate::AResult<()> {
		self.write_registers(device, pointer, &[data])
	}

	/// pointer-only write; sets the chip's address pointer for the next read
	fn set_pointer(&mut self, device: Device, pointer: u8) -> crate::AResult<()> {
		self.start_write(device, pointer).finish()?;
		trace!("{} @{:02x}", device, pointer);
		Ok(())
	}

	/// set pointer, then read exactly `target.len()` bytes
	fn read_registers(&mut self, device: Device, pointer: u8, target: &mut [u8]) -> crate::AResult<()> {
		self.set_pointer(device, pointer)?;
		self.start_read(device, target.len())?.read(target)?;
		trace!("{} @{:02x} -> {:02x?}", device, pointer, target);
		Ok(())
	}

	fn read_register(&mut self, device: Device, pointer: u8) -> crate::AResult<u8> {
		let mut buf = [0u8];
		self.read_registers(device, pointer, &mut buf)?;
		Ok(buf[0])
	}
}

impl<W: Wire + ?Sized> RegisterOperations for W {
}
