#![no_std]

pub mod bcd;
pub mod clock;
pub mod debounce;
pub mod fields;
pub mod registers;

pub use crate::clock::{Clock, ClockSnapshot, Error, Led, Monotonic, RegisterBus, Tick, TimeSource};
pub use crate::debounce::{DebounceGate, GateMode, TriggerSource};
pub use crate::registers::RegisterWrite;
