use std::collections::VecDeque;
use std::ffi::CString;
use std::fs;
use std::io::{
	self,
	Read,
	Write,
};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::{
	AsRawFd,
	FromRawFd,
};
use std::path::{
	Path,
	PathBuf,
};

use libc::{
	O_CLOEXEC,
	O_RDWR,
	c_ulong,
	ioctl,
	open,
};

use super::Wire;

// <linux/i2c-dev.h>: use this slave address for following read/write
const I2C_SLAVE: c_ulong = 0x0703;

/// `/dev/i2c-N` character device; every `write(2)`/`read(2)` is one
/// message with START and STOP.
#[derive(Debug)]
pub struct LinuxI2c {
	file: fs::File,
	path: PathBuf,
	slave: Option<u8>,
	pending: Option<(u8, Vec<u8>)>,
	received: VecDeque<u8>,
}

impl LinuxI2c {
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn select(&mut self, address: u8) -> io::Result<()> {
		if self.slave == Some(address) {
			return Ok(());
		}
		let res = unsafe { ioctl(self.file.as_raw_fd(), I2C_SLAVE as _, address as c_ulong) };
		if -1 == res {
			return Err(io::Error::last_os_error());
		}
		self.slave = Some(address);
		Ok(())
	}
}

impl Wire for LinuxI2c {
	fn begin_transaction(&mut self, address: u8) {
		if let Some((previous, _)) = self.pending.take() {
			warn!("{}: discarding unfinished write to 0x{:02x}", self.path.display(), previous);
		}
		self.pending = Some((address, Vec::new()));
	}

	fn queue_byte(&mut self, data: u8) {
		match self.pending {
			Some((_, ref mut buf)) => buf.push(data),
			None => warn!("{}: byte 0x{:02x} queued outside of a transaction, dropped", self.path.display(), data),
		}
	}

	fn end_transaction(&mut self) -> crate::AResult<()> {
		let (address, buf) = match self.pending.take() {
			Some(p) => p,
			None => bail!("no transaction in progress"),
		};
		self.select(address)?;
		let written = self.file.write(&buf)?;
		ensure!(written == buf.len(), "short write: {} of {} byte(s)", written, buf.len());
		Ok(())
	}

	fn request_bytes(&mut self, address: u8, count: usize) -> crate::AResult<usize> {
		self.received.clear();
		self.select(address)?;
		let mut buf = vec![0u8; count];
		let len = self.file.read(&mut buf)?;
		self.received.extend(&buf[..len]);
		Ok(len)
	}

	fn receive_byte(&mut self) -> Option<u8> {
		self.received.pop_front()
	}
}

// TODO: flock() the device so two processes cannot interleave messages
pub fn open_i2c_dev(path: &Path) -> io::Result<LinuxI2c> {
	let c_path = CString::new(path.as_os_str().as_bytes())?;

	let fd = unsafe { open(c_path.as_ptr(), O_RDWR | O_CLOEXEC) };
	if -1 == fd {
		return Err(io::Error::last_os_error());
	}
	// now get fd managed to prevent resource leak
	let file = unsafe { fs::File::from_raw_fd(fd) };

	Ok(LinuxI2c {
		file,
		path: path.to_path_buf(),
		slave: None,
		pending: None,
		received: VecDeque::new(),
	})
}
