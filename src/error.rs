use failure::Fail;

/// Failure kinds callers may want to tell apart.
///
/// Operations return `crate::AResult`; use `downcast_ref::<Error>()` on the
/// `failure::Error` to find out which kind (if any) it was.
#[derive(Clone, Debug, PartialEq, Eq, Fail)]
pub enum Error {
	/// SRAM access (of `len` bytes) starting outside the SRAM window
	#[fail(display = "SRAM access of {} byte(s) at 0x{:02x} outside of 0x20..=0x5f", len, location)]
	SramRange {
		location: u8,
		len: usize,
	},

	/// transport failure: no acknowledge, short read, OS error
	#[fail(display = "bus error on device 0x{:02x}: {}", address, message)]
	Bus {
		address: u8,
		message: String,
	},
}

impl Error {
	pub fn is_range(&self) -> bool {
		match self {
			Error::SramRange { .. } => true,
			_ => false,
		}
	}

	pub fn is_bus(&self) -> bool {
		match self {
			Error::Bus { .. } => true,
			_ => false,
		}
	}
}

/// Find the typed error kind inside a `failure::Error`, if any.
pub fn error_kind(e: &failure::Error) -> Option<&Error> {
	e.downcast_ref::<Error>()
}
