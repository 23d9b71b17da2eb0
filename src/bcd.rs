//! Packed binary coded decimal, as used by the timekeeping registers.
//!
//! Only 0..=99 (resp. bytes with both nibbles in 0..=9) convert
//! meaningfully; anything else yields garbage, but never panics.

/// Convert 0..=99 to packed BCD (`0x59` for 59).
pub fn dec_to_bcd(value: u8) -> u8 {
	(value / 10).wrapping_mul(16).wrapping_add(value % 10)
}

/// Convert packed BCD to decimal (`59` for `0x59`).
pub fn bcd_to_dec(value: u8) -> u8 {
	(value / 16).wrapping_mul(10).wrapping_add(value % 16)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_values() {
		assert_eq!(dec_to_bcd(0), 0x00);
		assert_eq!(dec_to_bcd(9), 0x09);
		assert_eq!(dec_to_bcd(10), 0x10);
		assert_eq!(dec_to_bcd(59), 0x59);
		assert_eq!(dec_to_bcd(99), 0x99);
		assert_eq!(bcd_to_dec(0x23), 23);
		assert_eq!(bcd_to_dec(0x59), 59);
		assert_eq!(bcd_to_dec(0x99), 99);
	}

	#[test]
	fn decimal_round_trip() {
		for v in 0..=99u8 {
			assert_eq!(bcd_to_dec(dec_to_bcd(v)), v, "value {}", v);
		}
	}

	#[test]
	fn bcd_round_trip() {
		for tens in 0..=9u8 {
			for ones in 0..=9u8 {
				let b = tens << 4 | ones;
				assert_eq!(dec_to_bcd(bcd_to_dec(b)), b, "byte 0x{:02x}", b);
			}
		}
	}

	#[test]
	fn out_of_range_does_not_panic() {
		// 255 / 10 * 16 overflows a byte; result is garbage but defined
		assert_eq!(dec_to_bcd(255), (25u8.wrapping_mul(16)).wrapping_add(5));
		assert_eq!(bcd_to_dec(0xff), 165);
		assert_eq!(bcd_to_dec(0x1a), 20);
	}
}
