//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and calibration
//! constants live here so they can be tuned in one place.

// Timing

/// Inactivity window before the device checkpoints settings and powers off (ms).
pub const INACTIVITY_TIMEOUT_MS: u64 = 20_000;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP       → P0.11
//   Button DOWN     → P0.12
//   Button OK       → P0.24
//   Button MEASURE  → P0.25
//   Power latch     → P0.13
//   Sensor I²C SDA  → P0.26
//   Sensor I²C SCL  → P0.27
//   OLED I²C SDA    → P0.30
//   OLED I²C SCL    → P0.31
//   Battery sense   → P0.02 (AIN0)

// Battery gauge

/// Voltage divider scale from the battery sense pin back to pack voltage.
pub const BATTERY_DIVIDER_SCALE: f32 = 25.1 / 5.1;

/// Pack voltage considered empty (0 %).
pub const BATTERY_EMPTY_VOLTS: f32 = 3.3;

/// Pack voltage considered full (100 %).
pub const BATTERY_FULL_VOLTS: f32 = 4.3;

// Fallback illuminance ("crazy mode")

/// Lower bound of the pseudo-random fallback illuminance (lux).
pub const FALLBACK_LUX_MIN: f32 = 1.25;

/// Upper bound of the pseudo-random fallback illuminance (lux).
pub const FALLBACK_LUX_MAX: f32 = 1280.0;

/// Seed for the fallback generator.
pub const FALLBACK_LUX_SEED: u32 = 0x1705_0B50;

// Settings storage

/// Flash page index where the settings record starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for the settings record.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
