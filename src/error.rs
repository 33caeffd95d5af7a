//! Unified error type for lightmeter.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// Nothing here is fatal: a sensor error degrades to the fallback
/// illuminance generator, a storage error degrades to default settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// I²C transaction to the light sensor failed.
    Sensor,

    /// Flash read/write/erase failed.
    Storage,
}
