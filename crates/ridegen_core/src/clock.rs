/// Seconds the clock moves forward after every generation tick.
pub const TICK_STEP_SECS: i64 = 5;

/// Logical simulation time in unix seconds. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    now: i64,
    step_secs: i64,
}

impl SimulationClock {
    pub fn new(start_secs: i64) -> Self {
        Self {
            now: start_secs,
            step_secs: TICK_STEP_SECS,
        }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn step_secs(&self) -> i64 {
        self.step_secs
    }

    /// Advance by one fixed step and return the new time.
    pub fn advance(&mut self) -> i64 {
        self.now = self.now.saturating_add(self.step_secs);
        self.now
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = SimulationClock::new(1_000);
        assert_eq!(clock.now(), 1_000);
        assert_eq!(clock.advance(), 1_005);
        assert_eq!(clock.advance(), 1_010);
        assert_eq!(clock.now(), 1_010);
    }

    #[test]
    fn clock_saturates_instead_of_wrapping() {
        let mut clock = SimulationClock::new(i64::MAX - 1);
        clock.advance();
        assert_eq!(clock.now(), i64::MAX);
    }
}
