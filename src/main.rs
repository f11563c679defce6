//! difftherm firmware - nRF52840 + SSD1306 differential thermostat HMI.
//!
//! The control loop multiplexes debounced button presses with a fixed
//! refresh ticker. Readings and settings arrive through signals published
//! by the sensor and persistence tasks; commands produced by the HMI are
//! queued for the persistence task.

#![no_std]
#![no_main]

mod buttons;
mod oled;

use defmt::{error, info, warn};
use difftherm::config::TICK_PERIOD_MS;
use difftherm::ui::input_logic::{map_press, Button, ButtonPress};
use difftherm::{Command, Hmi, Readings, Settings};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Debounced presses from the button tasks.
static BUTTONS: Channel<CriticalSectionRawMutex, ButtonPress, 4> = Channel::new();

/// Latest readings from the sensor / pump-control task.
pub static READINGS: Signal<CriticalSectionRawMutex, Readings> = Signal::new();

/// Settings from the persistence task (boot load, new sensor binding).
pub static SETTINGS: Signal<CriticalSectionRawMutex, Settings> = Signal::new();

/// Work for the persistence task, with the settings to write.
pub static COMMANDS: Channel<CriticalSectionRawMutex, (Command, Settings), 2> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("difftherm starting");

    // Pump relay held off; this is also the safe state on a fault.
    let _pump = Output::new(p.P0_13, Level::Low, OutputDrive::Standard);

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = match oled::init(i2c) {
        Ok(display) => display,
        Err(e) => {
            error!("Display init failed: {} - parking with outputs off", e);
            loop {
                Timer::after(Duration::from_secs(60)).await;
            }
        }
    };

    spawner.must_spawn(buttons::button_task(
        p.P0_11.degrade(),
        Button::Up,
        BUTTONS.sender(),
    ));
    spawner.must_spawn(buttons::button_task(
        p.P0_12.degrade(),
        Button::Down,
        BUTTONS.sender(),
    ));

    let mut hmi = Hmi::new(display, Settings::factory());
    if let Err(e) = hmi.begin() {
        error!("Initial draw failed: {}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        match select(BUTTONS.receive(), ticker.next()).await {
            Either::First(press) => {
                let event = map_press(press, hmi.mode());
                match hmi.handle(event) {
                    Ok(Some(cmd)) => {
                        if COMMANDS.try_send((cmd, hmi.settings().clone())).is_err() {
                            warn!("Command queue full, dropping {}", cmd);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Display error: {}", e),
                }
            }
            Either::Second(()) => {
                if let Some(settings) = SETTINGS.try_take() {
                    hmi.set_settings(settings);
                }
                if let Some(readings) = READINGS.try_take() {
                    if let Err(e) = hmi.update_readings(readings) {
                        warn!("Display error: {}", e);
                    }
                }
                if let Err(e) = hmi.tick() {
                    warn!("Display error: {}", e);
                }
            }
        }
    }
}
