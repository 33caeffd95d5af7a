//! Working settings and the recalculation engine.
//!
//! `Settings` is the single source of truth mutated by button input and
//! measurement. Exactly one of aperture/shutter is *driven* (computed from
//! the EV and snapped) at any time, determined by the priority mode; the
//! other is *free* and directly steppable. Every public mutation leaves
//! both on their scale tables.
//!
//! The flash record layout (`to_bytes`/`from_bytes`) lives here beside the
//! type. Offsets match the original device image for compatibility:
//!
//! ```text
//! 0..4   ISO            u32 LE
//! 4..8   aperture       f32 LE
//! 8..12  mode           u32 LE (0 = aperture priority, 1 = shutter priority)
//! 12..16 shutter speed  f32 LE
//! 16..24 last EV        f64 LE
//! ```

use crate::meter::exposure::{compute_aperture, compute_ev, compute_shutter_speed};
use crate::meter::scales::{StepDir, APERTURES, ISO_VALUES, SHUTTER_SPEEDS};

/// Serialized settings record size in bytes.
pub const SETTINGS_RECORD_SIZE: usize = 24;

/// Which of aperture/shutter the user directly controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Aperture is free; shutter speed is derived.
    AperturePriority,
    /// Shutter speed is free; aperture is derived.
    ShutterPriority,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::AperturePriority => Mode::ShutterPriority,
            Mode::ShutterPriority => Mode::AperturePriority,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::AperturePriority => "Aperture",
            Mode::ShutterPriority => "Shutter",
        }
    }

    fn to_u32(self) -> u32 {
        match self {
            Mode::AperturePriority => 0,
            Mode::ShutterPriority => 1,
        }
    }

    fn from_u32(raw: u32) -> Self {
        match raw {
            1 => Mode::ShutterPriority,
            _ => Mode::AperturePriority,
        }
    }
}

/// The mutable working state of the meter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub mode: Mode,
    pub iso: u32,
    pub aperture: f32,
    pub shutter_speed: f32,
    pub last_ev: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::AperturePriority,
            iso: 400,
            aperture: 2.8,
            shutter_speed: 1.0,
            last_ev: 1.0,
        }
    }
}

impl Settings {
    /// Recompute the driven value from the free one and snap it onto its
    /// scale. The single dispatch point on the priority mode.
    pub fn recalculate(&mut self) {
        match self.mode {
            Mode::AperturePriority => {
                let computed = compute_shutter_speed(self.last_ev, self.iso, self.aperture);
                self.shutter_speed = SHUTTER_SPEEDS.snap(computed as f64);
            }
            Mode::ShutterPriority => {
                let computed = compute_aperture(self.last_ev, self.iso, self.shutter_speed);
                self.aperture = APERTURES.snap(computed as f64);
            }
        }
    }

    /// Take a new illuminance measurement: derive the EV and recalculate.
    pub fn measure(&mut self, lux: f32) {
        self.last_ev = compute_ev(lux as f64, self.iso);
        self.recalculate();
    }

    /// Switch priority mode. The newly driven field is recomputed from the
    /// now-free field (i.e. from the previous driven value).
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.recalculate();
    }

    /// Step the ISO one stop, wrapping at either end of the table.
    pub fn step_iso(&mut self, dir: StepDir) {
        self.iso = ISO_VALUES.step(self.iso, dir);
        self.recalculate();
    }

    /// Step the free value (aperture or shutter, depending on mode) one
    /// stop, wrapping at either end of its table.
    pub fn step_free_value(&mut self, dir: StepDir) {
        match self.mode {
            Mode::AperturePriority => {
                self.aperture = APERTURES.step(self.aperture, dir);
            }
            Mode::ShutterPriority => {
                self.shutter_speed = SHUTTER_SPEEDS.step(self.shutter_speed, dir);
            }
        }
        self.recalculate();
    }

    /// The currently driven (computed-then-snapped) value.
    pub fn driven_value(&self) -> f32 {
        match self.mode {
            Mode::AperturePriority => self.shutter_speed,
            Mode::ShutterPriority => self.aperture,
        }
    }

    /// Force every field onto its scale table and the EV to a finite value.
    ///
    /// Applied to records loaded from flash, which may be zeroed or garbage
    /// on a never-saved device.
    pub fn sanitize(&mut self) {
        self.iso = ISO_VALUES.snap(self.iso as f64);
        self.aperture = APERTURES.snap(self.aperture as f64);
        self.shutter_speed = SHUTTER_SPEEDS.snap(self.shutter_speed as f64);
        if !self.last_ev.is_finite() {
            self.last_ev = Settings::default().last_ev;
        }
    }

    /// Serialize into the fixed flash record layout.
    pub fn to_bytes(&self) -> [u8; SETTINGS_RECORD_SIZE] {
        let mut buf = [0u8; SETTINGS_RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.iso.to_le_bytes());
        buf[4..8].copy_from_slice(&self.aperture.to_le_bytes());
        buf[8..12].copy_from_slice(&self.mode.to_u32().to_le_bytes());
        buf[12..16].copy_from_slice(&self.shutter_speed.to_le_bytes());
        buf[16..24].copy_from_slice(&self.last_ev.to_le_bytes());
        buf
    }

    /// Deserialize from the fixed flash record layout.
    ///
    /// Unknown mode values fall back to aperture priority; callers are
    /// expected to `sanitize` the result before use.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < SETTINGS_RECORD_SIZE {
            return None;
        }
        let iso = u32::from_le_bytes(data[0..4].try_into().ok()?);
        let aperture = f32::from_le_bytes(data[4..8].try_into().ok()?);
        let mode = Mode::from_u32(u32::from_le_bytes(data[8..12].try_into().ok()?));
        let shutter_speed = f32::from_le_bytes(data[12..16].try_into().ok()?);
        let last_ev = f64::from_le_bytes(data[16..24].try_into().ok()?);
        Some(Self {
            mode,
            iso,
            aperture,
            shutter_speed,
            last_ev,
        })
    }
}
