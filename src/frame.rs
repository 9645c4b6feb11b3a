//! Animation pacing counter.

/// Tick counter used to pace sprite animation.
///
/// Not wall-clock time: it advances once per loop iteration and wraps to 0
/// after `2 * fps` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameFrame {
    value: u32,
    period: u32,
}

impl GameFrame {
    /// Counter for a loop targeting `fps` ticks per second.
    pub fn new(fps: u32) -> Self {
        Self {
            value: 0,
            period: fps.max(1) * 2,
        }
    }

    /// Step one tick and return the new value.
    pub fn advance(&mut self) -> u32 {
        self.value = (self.value + 1) % self.period;
        self.value
    }

    /// Current value, always in `[0, 2 * fps)`.
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// True on the ticks where a timer of `every` ticks fires.
    #[inline]
    pub fn fires_every(&self, every: u32) -> bool {
        every != 0 && self.value % every == 1
    }
}
