#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate mcp7941x_rtc;
use mcp7941x_rtc::*;

use std::env;
use std::process::exit;

use mcp7941x_rtc::mcp7941x::consts::{
	SRAM_LEN,
	SRAM_START,
};

const DEFAULT_BUS: &str = "/dev/i2c-1";
const BUS_ENV: &str = "MCP7941X_BUS";

type Rtc = Mcp7941x<wire::LinuxI2c>;

fn get_param<T>(matches: &clap::ArgMatches, name: &str) -> AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	param.parse::<T>().map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid parameter {}: {}", name, e);
		e.context(msg).into()
	})
}

// decimal, or hex with 0x prefix
fn get_byte(matches: &clap::ArgMatches, name: &str) -> AResult<u8> {
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	let parsed = if param.starts_with("0x") || param.starts_with("0X") {
		u8::from_str_radix(&param[2..], 16)
	} else {
		param.parse::<u8>()
	};
	parsed.map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid parameter {} {:?}: {}", name, param, e);
		e.context(msg).into()
	})
}

fn bus_path(matches: &clap::ArgMatches) -> String {
	match matches.value_of("bus") {
		Some(p) => p.into(),
		None => env::var(BUS_ENV).unwrap_or_else(|_| DEFAULT_BUS.into()),
	}
}

fn get_time(rtc: &mut Rtc) -> AResult<()> {
	let dt = rtc.get_date_time()?;
	println!("{} (day of week {})", dt, dt.day_of_week);
	Ok(())
}

fn set_time(rtc: &mut Rtc, sub_m: &clap::ArgMatches) -> AResult<()> {
	let dt = if sub_m.is_present("now") {
		DateTime::now_local()?
	} else {
		get_param::<DateTime>(sub_m, "DATETIME")?
	};
	rtc.set_date_time(&dt)?;
	info!("Clock set to {} (day of week {})", dt, dt.day_of_week);
	Ok(())
}

fn status(rtc: &mut Rtc) -> AResult<()> {
	println!("{}", rtc.control_status()?);
	Ok(())
}

fn sram_dump(rtc: &mut Rtc) -> AResult<()> {
	let mut sram = [0u8; SRAM_LEN];
	rtc.read_sram(SRAM_START, &mut sram)?;
	for (i, b) in sram.iter().enumerate() {
		if 0 == i % 16 {
			print!("{:02x} ", SRAM_START as usize + i);
		} else if 0 == i % 8 {
			print!(" ");
		}
		print!(" {:02x}", b);
		if 15 == i % 16 {
			println!();
		}
	}
	Ok(())
}

fn mac_set(rtc: &mut Rtc, sub_m: &clap::ArgMatches) -> AResult<()> {
	let mac: MacAddress = get_param(sub_m, "MAC")?;
	if sub_m.is_present("unchecked") {
		rtc.unlock_unique_id()?;
		rtc.write_mac_address(&mac)?;
	} else {
		rtc.program_mac_address(&mac)?;
	}
	Ok(())
}

fn unique_id(rtc: &mut Rtc) -> AResult<()> {
	let id = rtc.get_unique_id()?;
	let parts: Vec<String> = id.iter().map(|b| format!("{:02x}", b)).collect();
	println!("{}", parts.join(":"));
	Ok(())
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (app_from_crate!())
		(@setting SubcommandRequiredElseHelp)
		(global_setting: clap::AppSettings::VersionlessSubcommands)
		(@arg bus: -b --bus +takes_value "I2C bus device (default: $MCP7941X_BUS or /dev/i2c-1)")
		(@subcommand get_time =>
			(about: "print date and time")
		)
		(@subcommand set_time =>
			(about: "set date and time (24-hour), start the clock and enable battery backup")
			(@arg now: --now "use the local time of this host")
			(@arg DATETIME: "\"YYYY-MM-DD HH:MM:SS\"; day of week is derived (1 = Sunday)")
		)
		(@subcommand enable_clock =>
			(about: "start the oscillator")
		)
		(@subcommand disable_clock =>
			(about: "stop the oscillator")
		)
		(@subcommand enable_battery =>
			(about: "enable battery backup")
		)
		(@subcommand status =>
			(about: "show control and status bits")
		)
		(@subcommand sram_get =>
			(about: "read SRAM byte")
			(@arg ADDRESS: +required "SRAM address (0x20-0x5f)")
		)
		(@subcommand sram_set =>
			(about: "write SRAM byte")
			(@arg ADDRESS: +required "SRAM address (0x20-0x5f)")
			(@arg VALUE: +required "byte to store")
		)
		(@subcommand sram_dump =>
			(about: "hexdump the whole SRAM")
		)
		(@subcommand mac_get =>
			(about: "print MAC address from the unique ID block")
		)
		(@subcommand mac_set =>
			(about: "program MAC address into the unique ID block")
			(@arg unchecked: --unchecked "skip reading back after writing")
			(@arg MAC: +required "MAC address (aa:bb:cc:dd:ee:ff)")
		)
		(@subcommand unique_id =>
			(about: "print the whole unique ID block")
		)
	).get_matches();

	let path = bus_path(&matches);
	let mut rtc = open_i2c_dev(&path)?;
	debug!("using I2C bus {}", rtc.wire().path().display());

	match matches.subcommand() {
		("get_time", _) => get_time(&mut rtc),
		("set_time", Some(sub_m)) => {
			ensure!(sub_m.is_present("now") != sub_m.is_present("DATETIME"), "need exactly one of --now and DATETIME");
			set_time(&mut rtc, sub_m)
		},
		("enable_clock", _) => rtc.enable_clock(),
		("disable_clock", _) => rtc.disable_clock(),
		("enable_battery", _) => rtc.enable_battery(),
		("status", _) => status(&mut rtc),
		("sram_get", Some(sub_m)) => {
			let address = get_byte(sub_m, "ADDRESS")?;
			println!("0x{:02x}", rtc.get_sram_byte(address)?);
			Ok(())
		},
		("sram_set", Some(sub_m)) => {
			let address = get_byte(sub_m, "ADDRESS")?;
			let value = get_byte(sub_m, "VALUE")?;
			rtc.set_sram_byte(address, value)
		},
		("sram_dump", _) => sram_dump(&mut rtc),
		("mac_get", _) => {
			println!("{}", rtc.get_mac_address()?);
			Ok(())
		},
		("mac_set", Some(sub_m)) => mac_set(&mut rtc, sub_m),
		("unique_id", _) => unique_id(&mut rtc),
		("", _) => bail!("no subcommand"),
		(cmd, _) => bail!("not implemented subcommand {:?}", cmd),
	}
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
