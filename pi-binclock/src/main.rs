use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use binclock::registers;
use binclock::{Clock, GateMode, Led, Monotonic, RegisterBus, TimeSource};
use chrono::Timelike;
use log::{debug, info, warn};
use rppal::gpio::{Gpio, InputPin, Level, Trigger};
use rppal::i2c::I2c;
use tokio::signal;
use tokio::time;

// BCM pin numbers, see pinout.xyz
const LED_PIN: u8 = 17;
const HOUR_BUTTON_PIN: u8 = 23;
const MINUTE_BUTTON_PIN: u8 = 24;
const SYNC_BUTTON_PIN: u8 = 25;

/// RTC register transport over the Pi's I2C bus.
struct RtcBus {
    i2c: I2c,
}

impl RtcBus {
    fn new() -> Result<RtcBus, rppal::i2c::Error> {
        let mut i2c = I2c::new()?;
        i2c.set_slave_address(registers::DEFAULT_ADDRESS)?;
        return Ok(RtcBus { i2c });
    }
}

impl RegisterBus for RtcBus {
    type Error = rppal::i2c::Error;

    fn read_register(&mut self, address: u8) -> Result<u8, Self::Error> {
        return self.i2c.smbus_read_byte(address);
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        return self.i2c.smbus_write_byte(address, value);
    }
}

/// Milliseconds since process start.
struct Uptime {
    started: Instant,
}

impl Monotonic for Uptime {
    fn now_ms(&mut self) -> u64 {
        return self.started.elapsed().as_millis() as u64;
    }
}

/// Local system time as the external sync source. Local time already
/// carries the timezone offset the original firmware added by hand.
struct SystemTime;

impl TimeSource for SystemTime {
    fn hours(&mut self) -> u8 {
        return chrono::Local::now().hour() as u8;
    }

    fn minutes(&mut self) -> u8 {
        return chrono::Local::now().minute() as u8;
    }

    fn seconds(&mut self) -> u8 {
        return chrono::Local::now().second() as u8;
    }
}

type PiClock = Clock<RtcBus, Uptime>;

fn attach_button<F>(pin: &mut InputPin, handler: F)
where
    F: FnMut(Level) + Send + 'static,
{
    pin.set_async_interrupt(Trigger::RisingEdge, handler)
        .expect("unable to attach button interrupt");
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let bus = RtcBus::new().expect("unable to open the I2C bus");
    let uptime = Uptime {
        started: Instant::now(),
    };
    let mut clock = Clock::new(bus, uptime, GateMode::PerSource);

    // Seed the registers from the system clock before the loop starts,
    // like the original firmware's startup write.
    let mut source = SystemTime;
    clock
        .set_time(source.hours(), source.minutes(), source.seconds())
        .expect("unable to seed the RTC registers");

    let clock = Arc::new(Mutex::new(clock));

    let gpio = Gpio::new().expect("unable to open GPIO");
    let mut led = gpio
        .get(LED_PIN)
        .expect("unable to claim the LED pin")
        .into_output_low();

    let mut hour_button = gpio
        .get(HOUR_BUTTON_PIN)
        .expect("unable to claim the hour button pin")
        .into_input_pullup();
    {
        let clock = Arc::clone(&clock);
        attach_button(&mut hour_button, move |_| {
            match clock.lock().unwrap().on_hour_button() {
                Ok(true) => info!("hour button accepted;"),
                Ok(false) => debug!("hour button suppressed;"),
                Err(e) => warn!("hour button failed; error={:?}", e),
            }
        });
    }

    let mut minute_button = gpio
        .get(MINUTE_BUTTON_PIN)
        .expect("unable to claim the minute button pin")
        .into_input_pullup();
    {
        let clock = Arc::clone(&clock);
        attach_button(&mut minute_button, move |_| {
            match clock.lock().unwrap().on_minute_button() {
                Ok(true) => info!("minute button accepted;"),
                Ok(false) => debug!("minute button suppressed;"),
                Err(e) => warn!("minute button failed; error={:?}", e),
            }
        });
    }

    let mut sync_button = gpio
        .get(SYNC_BUTTON_PIN)
        .expect("unable to claim the sync button pin")
        .into_input_pullup();
    {
        let clock = Arc::clone(&clock);
        let mut source = SystemTime;
        attach_button(&mut sync_button, move |_| {
            match clock.lock().unwrap().on_external_sync(&mut source) {
                Ok(true) => info!("time sync accepted;"),
                Ok(false) => debug!("time sync suppressed;"),
                Err(e) => warn!("time sync failed; error={:?}", e),
            }
        });
    }

    info!("setup done");

    let mut ticker = time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match clock.lock().unwrap().tick() {
                    Ok(tick) => {
                        led.write(match tick.led {
                            Led::On => Level::High,
                            Led::Off => Level::Low,
                        });
                        info!(
                            "time {:02}:{:02}:{:02}",
                            tick.time.hours, tick.time.minutes, tick.time.seconds
                        );
                    }
                    Err(e) => warn!("tick failed; error={:?}", e),
                }
            }
            _ = signal::ctrl_c() => {
                info!("cleaning up");
                break;
            }
        }
    }

    // rppal restores the pin modes when the pins drop
    led.set_low();
}
