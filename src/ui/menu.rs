//! Menu/edit navigation state machine.
//!
//! Three logical rows: priority mode, ISO, and the free value (aperture or
//! shutter, depending on the mode). Two states: BROWSE (cursor moves) and
//! EDIT (the bound value steps). Row 0 is a direct toggle and never enters
//! EDIT.
//!
//! Measurement is independent of menu state; the control loop feeds new
//! illuminance straight into `Settings::measure` without touching the
//! cursor or edit flag.

use crate::meter::scales::StepDir;
use crate::meter::settings::Settings;

/// Number of menu rows.
pub const MENU_ROWS: usize = 3;

/// Row index: priority mode (direct toggle).
pub const ROW_MODE: usize = 0;

/// Row index: ISO.
pub const ROW_ISO: usize = 1;

/// Row index: free value (aperture or shutter, depending on mode).
pub const ROW_VALUE: usize = 2;

/// Cursor position plus edit flag. Persists across renders; only a power
/// cycle resets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Menu {
    cursor: usize,
    edit_mode: bool,
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            cursor: ROW_MODE,
            edit_mode: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// UP button: move the cursor up circularly, or step the edited value
    /// one position toward lower index.
    pub fn prev(&mut self, settings: &mut Settings) {
        if !self.edit_mode {
            self.cursor = (self.cursor + MENU_ROWS - 1) % MENU_ROWS;
            return;
        }
        self.step_value(settings, StepDir::Prev);
    }

    /// DOWN button: move the cursor down circularly, or step the edited
    /// value one position toward higher index.
    pub fn next(&mut self, settings: &mut Settings) {
        if !self.edit_mode {
            self.cursor = (self.cursor + 1) % MENU_ROWS;
            return;
        }
        self.step_value(settings, StepDir::Next);
    }

    /// OK button: toggle the mode on row 0, enter/leave EDIT on rows 1-2.
    pub fn confirm(&mut self, settings: &mut Settings) {
        if self.cursor == ROW_MODE {
            settings.toggle_mode();
        } else {
            self.edit_mode = !self.edit_mode;
        }
    }

    fn step_value(&mut self, settings: &mut Settings, dir: StepDir) {
        match self.cursor {
            ROW_ISO => settings.step_iso(dir),
            ROW_VALUE => settings.step_free_value(dir),
            _ => {}
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
