//! Register access over a two-wire (I²C) bus.
//!
//! The MCP7941x answers on two fixed 7-bit addresses: one for the RTC
//! registers and SRAM, one for the EEPROM and the protected unique ID.
//!
//! Every access starts with a write transaction carrying the register
//! pointer:
//! - Write: START, address+W, pointer, data..., STOP
//! - Read: START, address+W, pointer, STOP; then START, address+R,
//!   exactly N data bytes, STOP
//!
//! The chip auto-increments its pointer after each data byte; there is no
//! length negotiation, the master has to know how many bytes to clock.

mod hardware;
mod linux;
mod low_level;
mod operations;
pub mod simulated;

pub use self::hardware::{
	Device,
	Wire,
};

pub use self::linux::{
	LinuxI2c,
	open_i2c_dev,
};

pub use self::low_level::{
	LowLevel,
	Reader,
	WriteTransaction,
};

pub use self::operations::RegisterOperations;

pub use self::simulated::SimulatedChip;
