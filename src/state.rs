//! Shared device state read by the HMI.
//!
//! `Settings` are owned by the persistence collaborator and `Readings` by
//! the sensor collaborator; the HMI only reads them, except for setpoint
//! edits made from the setup screen.

use crate::address::{is_zero_address, DeviceAddress};
use crate::config::{
    DEFAULT_DT_OFF, DEFAULT_DT_ON, DEFAULT_T_MAX, RESET_ROWS, RESET_YES_ROW, SETPOINT_MAX,
    SETPOINT_MIN, TEMP_MAX_VALID, TEMP_MIN_VALID,
};

/// `true` iff `temp` lies strictly inside the sensor's valid range.
///
/// Boundary values and NaN are fault sentinels.
pub fn is_valid_temp(temp: f32) -> bool {
    temp > TEMP_MIN_VALID && temp < TEMP_MAX_VALID
}

/// A threshold editable from the setup screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Setpoint {
    /// Differential at which the pump starts.
    On,
    /// Differential at which the pump stops.
    Off,
    /// Upper temperature limit (optional).
    Max,
}

impl Setpoint {
    pub const fn label(self) -> &'static str {
        match self {
            Setpoint::On => "tOn ",
            Setpoint::Off => "tOff",
            Setpoint::Max => "tMax",
        }
    }
}

/// Persisted configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Sensor identities have been bound.
    pub setup: bool,
    pub dt_on: f32,
    pub dt_off: f32,
    /// Upper limit; `None` on two-threshold builds, which drops the
    /// `tMax` row and the `SetMax` mode.
    pub t_max: Option<f32>,
    pub sensor_low: DeviceAddress,
    pub sensor_high: DeviceAddress,
}

impl Settings {
    /// Factory defaults: unbound sensors, default thresholds.
    pub const fn factory() -> Self {
        Self::factory_for(true)
    }

    /// Factory defaults for a two- or three-threshold build.
    pub const fn factory_for(three_thresholds: bool) -> Self {
        Self {
            setup: false,
            dt_on: DEFAULT_DT_ON,
            dt_off: DEFAULT_DT_OFF,
            t_max: if three_thresholds {
                Some(DEFAULT_T_MAX)
            } else {
                None
            },
            sensor_low: [0; 8],
            sensor_high: [0; 8],
        }
    }

    /// Neither sensor slot holds an all-zero identity.
    pub fn all_sensors_defined(&self) -> bool {
        !is_zero_address(&self.sensor_low) && !is_zero_address(&self.sensor_high)
    }

    /// Setpoints shown on the setup screen, top to bottom.
    pub fn setpoints(&self) -> &'static [Setpoint] {
        if self.t_max.is_some() {
            &[Setpoint::On, Setpoint::Off, Setpoint::Max]
        } else {
            &[Setpoint::On, Setpoint::Off]
        }
    }

    pub fn setpoint(&self, setpoint: Setpoint) -> Option<f32> {
        match setpoint {
            Setpoint::On => Some(self.dt_on),
            Setpoint::Off => Some(self.dt_off),
            Setpoint::Max => self.t_max,
        }
    }

    /// Add `delta` to a setpoint, clamped to the editable range.
    ///
    /// Returns `true` if the stored value changed.
    pub fn adjust(&mut self, setpoint: Setpoint, delta: f32) -> bool {
        let slot = match setpoint {
            Setpoint::On => &mut self.dt_on,
            Setpoint::Off => &mut self.dt_off,
            Setpoint::Max => match self.t_max.as_mut() {
                Some(v) => v,
                None => return false,
            },
        };
        let next = (*slot + delta).clamp(SETPOINT_MIN, SETPOINT_MAX);
        let changed = next != *slot;
        *slot = next;
        changed
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::factory()
    }
}

/// Latest sensor readings and pump state.
///
/// The differential is derived on demand so it can never drift from the
/// two temperatures.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    pub temp_low: f32,
    pub temp_high: f32,
    pub pump_running: bool,
}

impl Readings {
    /// Both sensors reported as faulted, pump off.
    pub const fn unknown() -> Self {
        Self {
            temp_low: TEMP_MIN_VALID,
            temp_high: TEMP_MIN_VALID,
            pump_running: false,
        }
    }

    /// `temp_high - temp_low`.
    pub fn dt(&self) -> f32 {
        self.temp_high - self.temp_low
    }

    /// The differential is only meaningful when both readings are valid.
    pub fn dt_valid(&self) -> bool {
        is_valid_temp(self.temp_low) && is_valid_temp(self.temp_high)
    }
}

impl Default for Readings {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Highlighted row on the reset screen; always within `0..RESET_ROWS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetSelection(u8);

impl ResetSelection {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn row(self) -> u8 {
        self.0
    }

    pub const fn is_yes(self) -> bool {
        self.0 == RESET_YES_ROW
    }

    /// Move one row down, stopping at the last row.
    pub fn next(self) -> Self {
        if self.0 + 1 < RESET_ROWS {
            Self(self.0 + 1)
        } else {
            self
        }
    }

    /// Move one row up, stopping at the first row.
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}
