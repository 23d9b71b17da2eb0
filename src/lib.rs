#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

macro_rules! with_context {
	(( $fmt:tt $($t:tt)* ), $e:expr) => {{
		use failure::Error;

		match (|| { $e })() {
			Ok(v) => Ok(v),
			Err(e) => {
				let e: Error = e;
				let msg = format!(concat!($fmt, ": {}") $($t)*, e);
				Err(Error::from(e.context(msg)))
			}
		}
	}};

	($msg:expr, $e:expr) => {
		with_context!(("{}", $msg), $e)
	};
}

pub type AResult<T> = Result<T, failure::Error>;

mod error;

pub mod bcd;
pub mod mcp7941x;
pub mod wire;

pub use self::error::{
	Error,
	error_kind,
};

pub use self::mcp7941x::{
	ControlStatus,
	DateTime,
	Lenient,
	MacAddress,
	Mcp7941x,
};

/// Open the chip on a Linux I2C bus device (e.g. `/dev/i2c-1`).
pub fn open_i2c_dev<P: AsRef<std::path::Path>>(path: P) -> AResult<Mcp7941x<wire::LinuxI2c>> {
	let path = path.as_ref();
	let bus = with_context!(("couldn't open I2C bus {}", path.display()), {
		Ok(wire::open_i2c_dev(path)?)
	})?;
	Ok(Mcp7941x::new(bus))
}
