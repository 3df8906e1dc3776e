//! Counter page state

use std::fmt;

use serde::Serialize;

/// How the count should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Normal,
    /// Count dropped below zero
    Negative,
}

/// Increment/decrement/reset counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counter {
    count: i64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn value(&self) -> i64 {
        self.count
    }

    pub fn tone(&self) -> Tone {
        if self.count < 0 {
            Tone::Negative
        } else {
            Tone::Normal
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Count: {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_decrement_reset() {
        let mut counter = Counter::new();
        counter.increment();
        counter.increment();
        counter.decrement();
        assert_eq!(counter.value(), 1);

        counter.reset();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_negative_tone() {
        let mut counter = Counter::new();
        assert_eq!(counter.tone(), Tone::Normal);

        counter.decrement();
        assert_eq!(counter.tone(), Tone::Negative);
        assert_eq!(counter.to_string(), "Count: -1");

        counter.increment();
        assert_eq!(counter.tone(), Tone::Normal);
    }
}
