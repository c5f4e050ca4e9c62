//! The six-breath lock. The Foundry opens only after six complete
//! press-and-release breath cycles on the breathing circle.

pub const REQUIRED_CYCLES: u8 = 6;

#[derive(Debug, Default)]
pub struct BreathLock {
    cycles: u8,
    holding: bool,
}

impl BreathLock {
    pub fn cycles(&self) -> u8 {
        self.cycles
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }

    pub fn is_complete(&self) -> bool {
        self.cycles >= REQUIRED_CYCLES
    }

    /// Feed the current pressed state of the breathing circle. A cycle
    /// counts on the release edge; input after completion is ignored.
    pub fn set_held(&mut self, held: bool) {
        if self.is_complete() {
            return;
        }
        if held && !self.holding {
            self.holding = true;
        } else if !held && self.holding {
            self.holding = false;
            self.cycles += 1;
        }
    }

    /// Re-arm the lock for a fresh session.
    pub fn reset(&mut self) {
        self.cycles = 0;
        self.holding = false;
    }

    pub fn instruction(&self) -> &'static str {
        if self.is_complete() {
            "Nervous System Regulated. Unlocking Foundry."
        } else if self.holding {
            "Hold... Inhaling..."
        } else if self.cycles > 0 {
            "Exhaling... Click and hold to Inhale"
        } else {
            "Click and hold to Inhale"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_cycles_unlock() {
        let mut lock = BreathLock::default();
        for _ in 0..6 {
            assert!(!lock.is_complete());
            lock.set_held(true);
            lock.set_held(false);
        }
        assert!(lock.is_complete());
    }

    #[test]
    fn test_release_without_press_does_not_count() {
        let mut lock = BreathLock::default();
        lock.set_held(false);
        lock.set_held(false);
        assert_eq!(lock.cycles(), 0);
    }

    #[test]
    fn test_repeated_press_is_one_hold() {
        let mut lock = BreathLock::default();
        lock.set_held(true);
        lock.set_held(true);
        lock.set_held(false);
        assert_eq!(lock.cycles(), 1);
    }

    #[test]
    fn test_input_after_completion_is_ignored() {
        let mut lock = BreathLock::default();
        for _ in 0..6 {
            lock.set_held(true);
            lock.set_held(false);
        }
        lock.set_held(true);
        lock.set_held(false);
        assert_eq!(lock.cycles(), 6);
    }

    #[test]
    fn test_reset_rearms() {
        let mut lock = BreathLock::default();
        for _ in 0..6 {
            lock.set_held(true);
            lock.set_held(false);
        }
        lock.reset();
        assert!(!lock.is_complete());
        assert_eq!(lock.cycles(), 0);
    }
}
