//! Time-keeping register map, DS1307 layout.

pub const SECONDS: u8 = 0x00;
pub const MINUTES: u8 = 0x01;
pub const HOURS: u8 = 0x02;

/// Default I2C slave address for RTC chips of this family.
pub const DEFAULT_ADDRESS: u16 = 0x68;

/// A register write that has been planned but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub address: u8,
    pub value: u8,
}
