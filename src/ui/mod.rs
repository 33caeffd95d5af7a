//! User interface subsystem - menu state machine, OLED display, buttons.
//!
//! The control loop reacts to debounced button events, drives the menu
//! state machine against the settings, and redraws the whole frame on the
//! SSD1306 OLED whenever something changed.

pub mod menu;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;

/// Physical button events (after debouncing).
///
/// Four buttons:
///   - UP/DOWN: move the cursor, or step the edited value
///   - OK: toggle mode / enter / leave edit
///   - MEASURE: take a light reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Up,
    Down,
    Ok,
    Measure,
}
