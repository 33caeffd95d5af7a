//! Exposure value math.
//!
//! Incident-metering relations between illuminance, ISO sensitivity,
//! aperture and shutter speed. All functions are pure; `libm` supplies
//! the transcendentals so they work under `no_std`.

/// ISO speed scale constant (the `n` in `sv = log2(ISO * n)`).
pub const SPEED_SCALE_N: f64 = 0.32;

/// Incident-light meter calibration constant.
pub const CALIBRATION_K: f64 = 340.0;

/// Convert measured illuminance to an exposure value at the given ISO.
///
/// `EV = log2(lux / (n*K)) + log2(ISO * n)`.
///
/// Non-positive `lux` yields a non-finite EV; callers either guard or let
/// the scale snapper clamp the downstream result.
pub fn compute_ev(lux: f64, iso: u32) -> f64 {
    let sv = libm::log2(iso as f64 * SPEED_SCALE_N);
    let iv = libm::log2(lux / (SPEED_SCALE_N * CALIBRATION_K));
    iv + sv
}

/// Aperture (f-number) that complements `shutter_speed` at `ev` and `iso`.
pub fn compute_aperture(ev: f64, iso: u32, shutter_speed: f32) -> f32 {
    let sv = libm::log2(iso as f64 / 100.0);
    libm::sqrt(shutter_speed as f64 * libm::exp2(ev + sv)) as f32
}

/// Shutter speed (seconds) that complements `aperture` at `ev` and `iso`.
pub fn compute_shutter_speed(ev: f64, iso: u32, aperture: f32) -> f32 {
    let sv = libm::log2(iso as f64 / 100.0);
    (aperture as f64 * aperture as f64 / libm::exp2(ev + sv)) as f32
}
