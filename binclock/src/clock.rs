//! Clock context: debounced trigger entry points, the display tick, and the
//! pure planners they are built from.
//!
//! The planners compute intended register writes without touching hardware;
//! [`Clock`] is the single writer that applies them to the register bus.

use crate::bcd;
use crate::debounce::{GateMode, TriggerGates, TriggerSource};
use crate::fields;
use crate::registers;
use crate::registers::RegisterWrite;

/// Register-oriented transport to the RTC chip.
pub trait RegisterBus {
    type Error;

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error>;
    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

/// Monotonic millisecond counter for debounce timestamps.
pub trait Monotonic {
    fn now_ms(&mut self) -> u64;
}

/// Provider of externally sourced wall-clock time.
pub trait TimeSource {
    fn hours(&mut self) -> u8;
    fn minutes(&mut self) -> u8;
    fn seconds(&mut self) -> u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Transport failure reported by the register bus.
    Bus(E),
    /// A register byte outside the packed-decimal domain.
    Codec(bcd::Error),
}

impl<E> From<bcd::Error> for Error<E> {
    fn from(value: bcd::Error) -> Error<E> {
        return Error::Codec(value);
    }
}

/// Seconds indicator, toggled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    On,
    Off,
}

impl Led {
    pub fn toggled(self) -> Led {
        return match self {
            Led::On => Led::Off,
            Led::Off => Led::On,
        };
    }
}

/// The time decoded from the registers within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSnapshot {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// Outcome of one display tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub time: ClockSnapshot,
    pub led: Led,
}

/// Plans the write for one hour-button press: hour + 1, wrapping 23 -> 0.
pub fn plan_hour_increment(hour_byte: u8) -> Result<RegisterWrite, bcd::Error> {
    let hour = bcd::decode(hour_byte)?;
    return Ok(RegisterWrite {
        address: registers::HOURS,
        value: bcd::encode(fields::increment_hour(hour))?,
    });
}

/// Plans the writes for one minute-button press. The hour write is present
/// iff the minute wrapped 59 -> 0; a carry triggers exactly one hour
/// increment.
pub fn plan_minute_increment(
    minute_byte: u8,
    hour_byte: u8,
) -> Result<(RegisterWrite, Option<RegisterWrite>), bcd::Error> {
    let minute = bcd::decode(minute_byte)?;
    let hour = bcd::decode(hour_byte)?;
    let rollover = fields::increment_minute(minute, hour);
    let minute_write = RegisterWrite {
        address: registers::MINUTES,
        value: bcd::encode(rollover.minute)?,
    };
    if !rollover.carried {
        return Ok((minute_write, None));
    }
    let hour_write = RegisterWrite {
        address: registers::HOURS,
        value: bcd::encode(rollover.hour)?,
    };
    return Ok((minute_write, Some(hour_write)));
}

/// Plans the writes for importing an external time triple. The hour is
/// mapped through [`fields::format_hour`] before encoding, and the seconds
/// byte carries the marker flag (bit 7), exactly as the RTC chip expects on
/// its seconds register.
pub fn plan_time_sync(
    hours: u8,
    minutes: u8,
    seconds: u8,
) -> Result<[RegisterWrite; 3], bcd::Error> {
    let hour_write = RegisterWrite {
        address: registers::HOURS,
        value: bcd::encode(fields::format_hour(hours))?,
    };
    let minute_write = RegisterWrite {
        address: registers::MINUTES,
        value: bcd::encode(minutes)?,
    };
    let seconds_write = RegisterWrite {
        address: registers::SECONDS,
        value: bcd::with_marker(bcd::encode(seconds)?),
    };
    return Ok([hour_write, minute_write, seconds_write]);
}

/// Clock context owning the register bus handle, the monotonic source, the
/// trigger debounce gates, and the LED indicator state.
pub struct Clock<B, M> {
    bus: B,
    millis: M,
    gates: TriggerGates,
    led: Led,
}

impl<B, M> Clock<B, M> {
    pub fn new(bus: B, millis: M, mode: GateMode) -> Clock<B, M> {
        return Clock {
            bus,
            millis,
            gates: TriggerGates::new(mode),
            led: Led::Off,
        };
    }

    /// Consumes the clock and hands the bus back.
    pub fn destroy(self) -> B {
        return self.bus;
    }
}

impl<B: RegisterBus, M: Monotonic> Clock<B, M> {
    /// Hour-button trigger. Returns `Ok(false)` when the debounce gate
    /// suppressed the event.
    pub fn on_hour_button(&mut self) -> Result<bool, Error<B::Error>> {
        let now_ms = self.millis.now_ms();
        if !self.gates.admit(TriggerSource::HourButton, now_ms) {
            return Ok(false);
        }
        let hour_byte = self.read(registers::HOURS)?;
        let write = plan_hour_increment(hour_byte)?;
        self.apply(write)?;
        return Ok(true);
    }

    /// Minute-button trigger. Returns `Ok(false)` when the debounce gate
    /// suppressed the event. On carry the hour register is written before
    /// the minute register.
    pub fn on_minute_button(&mut self) -> Result<bool, Error<B::Error>> {
        let now_ms = self.millis.now_ms();
        if !self.gates.admit(TriggerSource::MinuteButton, now_ms) {
            return Ok(false);
        }
        let minute_byte = self.read(registers::MINUTES)?;
        let hour_byte = self.read(registers::HOURS)?;
        let (minute_write, hour_write) = plan_minute_increment(minute_byte, hour_byte)?;
        if let Some(write) = hour_write {
            self.apply(write)?;
        }
        self.apply(minute_write)?;
        return Ok(true);
    }

    /// External time-sync trigger, debounced like the buttons. Returns
    /// `Ok(false)` when suppressed.
    pub fn on_external_sync<S: TimeSource>(
        &mut self,
        source: &mut S,
    ) -> Result<bool, Error<B::Error>> {
        let now_ms = self.millis.now_ms();
        if !self.gates.admit(TriggerSource::ExternalSync, now_ms) {
            return Ok(false);
        }
        let hours = source.hours();
        let minutes = source.minutes();
        let seconds = source.seconds();
        self.set_time(hours, minutes, seconds)?;
        return Ok(true);
    }

    /// Writes a time triple to the registers without debouncing. Used for
    /// the startup seed before any trigger can fire.
    pub fn set_time(&mut self, hours: u8, minutes: u8, seconds: u8) -> Result<(), Error<B::Error>> {
        for write in plan_time_sync(hours, minutes, seconds)? {
            self.apply(write)?;
        }
        return Ok(());
    }

    /// One display tick: decodes the three registers and toggles the LED
    /// indicator. The first tick turns the indicator on.
    pub fn tick(&mut self) -> Result<Tick, Error<B::Error>> {
        let time = self.read_time()?;
        self.led = self.led.toggled();
        return Ok(Tick {
            time,
            led: self.led,
        });
    }

    /// Decodes the current register contents. The marker flag on the
    /// seconds register is stripped before decoding, so a previously synced
    /// seconds byte stays readable.
    pub fn read_time(&mut self) -> Result<ClockSnapshot, Error<B::Error>> {
        let hours = bcd::decode(self.read(registers::HOURS)?)?;
        let minutes = bcd::decode(self.read(registers::MINUTES)?)?;
        let (_, seconds_byte) = bcd::split_marker(self.read(registers::SECONDS)?);
        let seconds = bcd::decode(seconds_byte)?;
        return Ok(ClockSnapshot {
            hours,
            minutes,
            seconds,
        });
    }

    fn read(&mut self, address: u8) -> Result<u8, Error<B::Error>> {
        return self.bus.read_register(address).map_err(Error::Bus);
    }

    // single writer for planned register writes
    fn apply(&mut self, write: RegisterWrite) -> Result<(), Error<B::Error>> {
        return self
            .bus
            .write_register(write.address, write.value)
            .map_err(Error::Bus);
    }
}
