//! Core library for lightmeter.
//!
//! All decision logic lives here and is hardware-independent: exposure
//! math, stop-scale snapping, the settings/recalculation engine, the
//! menu state machine, the fallback illuminance generator, and the power
//! policy. It can be unit-tested on the host (no embedded hardware
//! required) with `cargo test`.
//!
//! The embedded binary (`main.rs`, behind the `embedded` feature) wires
//! this core to the BH1750 sensor, SSD1306 OLED, buttons, battery ADC,
//! and internal-flash storage on an nRF52840.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod meter;
pub mod power_logic;
pub mod sensor_logic;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod sensor;
#[cfg(feature = "embedded")]
pub mod storage;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
