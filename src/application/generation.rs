use std::sync::atomic::{AtomicU64, Ordering};

/// Token handed out when a navigation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic counter used to discard results of navigations that were overtaken by newer ones.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: AtomicU64,
}

impl RequestGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_generation_is_current() {
        let generations = RequestGenerations::new();
        let first = generations.begin();
        assert!(generations.is_current(first));

        let second = generations.begin();
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
        assert!(second.value() > first.value());
    }
}
