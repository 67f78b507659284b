use std::num::NonZeroUsize;

/// Completion counter that says when a progress line is due.
#[derive(Debug, Clone)]
pub struct Progress {
    total: usize,
    done: usize,
    every: NonZeroUsize,
}

impl Progress {
    pub fn new(total: usize, every: NonZeroUsize) -> Self {
        Self { total, done: 0, every }
    }

    /// Count one completion. Returns true on every `every`-th completion and
    /// on the last one.
    pub fn tick(&mut self) -> bool {
        self.done += 1;
        self.done % self.every.get() == 0 || self.done == self.total
    }

    pub fn done(&self) -> usize {
        self.done
    }

    pub fn total(&self) -> usize {
        self.total
    }
}
