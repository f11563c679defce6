//! GPIO button input with async debouncing and long-press detection.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - UP   - raise the edited value / hold to cycle modes
//!   - DOWN - lower the edited value / hold to request a reset
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, times the hold, and sends a `ButtonPress` to the UI
//! channel.

use defmt::info;
use difftherm::config::{BUTTON_DEBOUNCE_MS, BUTTON_LONG_PRESS_MS};
use difftherm::ui::input_logic::{Button, ButtonPress};
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, then races the
/// release against the long-press timer. Long presses are reported as
/// soon as the hold time elapses, without waiting for release.
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(
    pin: AnyPin,
    button: Button,
    tx: Sender<'static, CriticalSectionRawMutex, ButtonPress, 4>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);
    let hold = Duration::from_millis(BUTTON_LONG_PRESS_MS - BUTTON_DEBOUNCE_MS);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if !btn.is_low() {
            continue;
        }

        let long = match select(btn.wait_for_rising_edge(), Timer::after(hold)).await {
            Either::First(()) => false,
            Either::Second(()) => true,
        };

        let press = ButtonPress { button, long };
        info!("Button: {}", press);
        tx.send(press).await;

        // Wait for release to avoid repeat triggers.
        if long {
            btn.wait_for_rising_edge().await;
        }
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
    }
}
