//! Transient notifications
//!
//! Each `show` bumps a generation counter. The caller schedules a
//! `DismissToast(generation)` message; a dismissal carrying an older
//! generation is ignored, so showing again effectively restarts the timer.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct Toaster {
    current: Option<Toast>,
    generation: u64,
    duration: Duration,
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            generation: 0,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Display `text` and return the generation to dismiss later.
    pub fn show(&mut self, text: impl Into<String>) -> u64 {
        self.generation += 1;
        self.current = Some(Toast {
            text: text.into(),
            generation: self.generation,
        });
        self.generation
    }

    /// Clear the toast if `generation` is still the latest one.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(toast) if toast.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_matching_generation() {
        let mut toaster = Toaster::new(Duration::from_secs(3));
        let generation = toaster.show("24 chars truncated");
        assert!(toaster.dismiss(generation));
        assert!(toaster.current().is_none());
    }

    #[test]
    fn test_reshow_ignores_stale_dismiss() {
        let mut toaster = Toaster::new(Duration::from_secs(3));
        let first = toaster.show("first");
        let second = toaster.show("second");
        assert!(!toaster.dismiss(first));
        assert_eq!(toaster.current().map(|t| t.text.as_str()), Some("second"));
        assert!(toaster.dismiss(second));
    }
}
