use std::time::{Duration, Instant};

use super::options::PredefinedOption;

pub const HOVER_DELAY: Duration = Duration::from_millis(120);

/// Sidebar row of one predefined option.
///
/// Entering the row only schedules the hover; it is reported by `poll`
/// once the delay has passed without the pointer leaving again. At most one
/// hover is pending per row, and it dies with the row.
#[derive(Debug, Clone)]
pub struct DropdownLink {
    option: PredefinedOption,
    delay: Duration,
    pending: Option<Instant>,
}

impl DropdownLink {
    pub fn new(option: PredefinedOption, delay: Duration) -> Self {
        DropdownLink {
            option,
            delay,
            pending: None,
        }
    }

    pub fn option(&self) -> PredefinedOption {
        self.option
    }

    pub fn enter(&mut self, now: Instant) {
        self.pending = Some(now + self.delay);
    }

    pub fn leave(&mut self) {
        self.pending = None;
    }

    /// Returns the option once its hover delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<PredefinedOption> {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                Some(self.option)
            }
            _ => None,
        }
    }

    pub fn click(&mut self) -> PredefinedOption {
        self.pending = None;
        self.option
    }
}
