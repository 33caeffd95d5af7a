//! Discrete stop scales and nearest-stop snapping.
//!
//! Each scale is an immutable ordered table. Apertures and ISO values are
//! listed ascending; shutter speeds are listed slowest (30 s) to fastest
//! (1/1000 s), i.e. numerically descending. Clamping at the ends of a
//! table follows the *listed* order, not numeric order, so the first and
//! last entries define the clamp bounds on both kinds of table.

/// Direction for one circular step through a scale table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDir {
    /// One position toward lower index, wrapping to the last entry.
    Prev,
    /// One position toward higher index, wrapping to the first entry.
    Next,
}

/// An immutable ordered table of legal stop values.
///
/// `labels`, when present, runs parallel to `entries` and carries the
/// display form of each stop (used by the shutter scale: `"1/125"` etc.).
pub struct ScaleTable<T: 'static> {
    entries: &'static [T],
    labels: Option<&'static [&'static str]>,
}

impl<T> ScaleTable<T>
where
    T: Copy + PartialEq + Into<f64>,
{
    pub const fn new(entries: &'static [T]) -> Self {
        Self {
            entries,
            labels: None,
        }
    }

    pub const fn with_labels(entries: &'static [T], labels: &'static [&'static str]) -> Self {
        assert!(entries.len() == labels.len());
        Self {
            entries,
            labels: Some(labels),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of `value` in the table, if it is a member.
    pub fn position(&self, value: T) -> Option<usize> {
        self.entries.iter().position(|&e| e == value)
    }

    /// Display label for a member value, if the table carries labels.
    pub fn label(&self, value: T) -> Option<&'static str> {
        let labels = self.labels?;
        self.position(value).map(|i| labels[i])
    }

    /// Snap an arbitrary computed value onto the nearest legal stop.
    ///
    /// Values beyond the first listed entry clamp to it; values beyond the
    /// last listed entry clamp to that. In between, a linear scan picks the
    /// entry with minimum absolute difference, lowest index winning ties.
    pub fn snap(&self, value: f64) -> T {
        let first = self.entries[0];
        let last = self.entries[self.entries.len() - 1];
        let first_f: f64 = first.into();
        let last_f: f64 = last.into();
        let descending = first_f > last_f;

        let (past_first, past_last) = if descending {
            (value > first_f, value < last_f)
        } else {
            (value < first_f, value > last_f)
        };
        if past_first {
            return first;
        }
        if past_last {
            return last;
        }

        let mut closest = 0;
        let mut min_difference = libm::fabs(first_f - value);
        for (i, &entry) in self.entries.iter().enumerate().skip(1) {
            let entry_f: f64 = entry.into();
            let difference = libm::fabs(entry_f - value);
            if difference < min_difference {
                min_difference = difference;
                closest = i;
            }
        }
        self.entries[closest]
    }

    /// Step one position through the table, wrapping circularly.
    ///
    /// `value` is expected to be a member (the settings invariant); a
    /// non-member starts from index 0.
    pub fn step(&self, value: T, dir: StepDir) -> T {
        let i = self.position(value).unwrap_or(0);
        let stepped = match dir {
            StepDir::Prev => {
                if i == 0 {
                    self.entries.len() - 1
                } else {
                    i - 1
                }
            }
            StepDir::Next => {
                if i + 1 == self.entries.len() {
                    0
                } else {
                    i + 1
                }
            }
        };
        self.entries[stepped]
    }
}

/// Shutter speeds in seconds, slowest to fastest.
pub static SHUTTER_SPEEDS: ScaleTable<f32> = ScaleTable::with_labels(
    &[
        30.0, 15.0, 8.0, 4.0, 2.0, 1.0, 0.5, 0.25, 0.125, 0.0667, 0.0333, 0.0167, 0.008, 0.004,
        0.002, 0.001,
    ],
    &[
        "30s", "15s", "8s", "4s", "2s", "1s", "1/2", "1/4", "1/8", "1/15", "1/30", "1/60", "1/125",
        "1/250", "1/500", "1/1000",
    ],
);

/// Aperture f-numbers, ascending.
pub static APERTURES: ScaleTable<f32> =
    ScaleTable::new(&[1.4, 1.8, 2.0, 2.8, 3.5, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0]);

/// ISO sensitivities, ascending.
pub static ISO_VALUES: ScaleTable<u32> = ScaleTable::new(&[50, 100, 200, 400, 800, 1600]);
