use crate::bcd::Error::{NotPackedDecimal, OutOfRange};

/// Bit 7 of the seconds register.
/// RTC chips of this family use it as an out-of-band flag (clock halt /
/// oscillator state) packed alongside the two decimal digits. It is not part
/// of the numeric value and must survive encode/decode unchanged.
pub const MARKER_BIT: u8 = 0b1000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A register byte whose nibbles are not two decimal digits
    /// (tens > 5 or ones > 9).
    NotPackedDecimal(u8),
    /// A value outside 0..=99, which has no packed representation.
    OutOfRange(u8),
}

/// Converts a packed-decimal register byte to its numeric value,
/// where 0x48 == 48.
pub fn decode(byte: u8) -> Result<u8, Error> {
    let tens = (byte & 0b1111_0000) >> 4;
    let ones = byte & 0b0000_1111;
    if tens > 5 || ones > 9 {
        return Err(NotPackedDecimal(byte));
    }
    return Ok(tens * 10 + ones);
}

/// Converts a value in 0..=99 to its packed-decimal register byte.
pub fn encode(value: u8) -> Result<u8, Error> {
    if value > 99 {
        return Err(OutOfRange(value));
    }
    return Ok(((value / 10) << 4) | (value % 10));
}

/// Sets the marker flag on an encoded byte.
pub fn with_marker(byte: u8) -> u8 {
    return byte | MARKER_BIT;
}

/// Separates the marker flag from the numeric payload of a register byte.
pub fn split_marker(byte: u8) -> (bool, u8) {
    return (byte & MARKER_BIT != 0, byte & !MARKER_BIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_register_byte() {
        assert_eq!(decode(0x00), Ok(0));
        assert_eq!(decode(0x09), Ok(9));
        assert_eq!(decode(0x10), Ok(10));
        assert_eq!(decode(0x48), Ok(48));
        assert_eq!(decode(0x59), Ok(59));
    }

    #[test]
    fn decode_rejects_bad_nibbles() {
        assert_eq!(decode(0x0A), Err(NotPackedDecimal(0x0A)));
        assert_eq!(decode(0x60), Err(NotPackedDecimal(0x60)));
        assert_eq!(decode(0xFF), Err(NotPackedDecimal(0xFF)));
        // a marked seconds byte is not decodable as-is
        assert_eq!(decode(0x85), Err(NotPackedDecimal(0x85)));
    }

    #[test]
    fn encode_register_byte() {
        assert_eq!(encode(0), Ok(0x00));
        assert_eq!(encode(5), Ok(0x05));
        assert_eq!(encode(21), Ok(0x21));
        assert_eq!(encode(99), Ok(0x99));
        assert_eq!(encode(100), Err(OutOfRange(100)));
    }

    #[test]
    fn round_trip() {
        for value in 0..=99 {
            assert_eq!(decode(encode(value).unwrap()), Ok(value));
        }
    }

    #[test]
    fn marker_flag() {
        assert_eq!(with_marker(0x05), 0x85);
        assert_eq!(split_marker(0x85), (true, 0x05));
        assert_eq!(split_marker(0x05), (false, 0x05));
        let (marked, payload) = split_marker(with_marker(encode(5).unwrap()));
        assert_eq!(marked, true);
        assert_eq!(decode(payload), Ok(5));
    }
}
