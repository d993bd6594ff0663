use crate::api::types::Channel;

/// Fixed timestep accumulator.
/// Decides how many fixed-rate ticks a variable frame delta is worth.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on steps per frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, 10)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha between fixed ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Process-wide script time in seconds.
///
/// Variable-rate ticks read `time`; fixed-rate ticks read `fixed_time`.
/// Neither value ever moves backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    time: f32,
    fixed_time: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn fixed_time(&self) -> f32 {
        self.fixed_time
    }

    /// Current time as seen by chains on `channel`.
    pub fn now(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Update => self.time,
            Channel::FixedUpdate => self.fixed_time,
        }
    }

    /// Advance the variable-rate time by a frame delta.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt.max(0.0);
    }

    /// Advance the fixed-rate time by one fixed step.
    pub fn advance_fixed(&mut self, dt: f32) {
        self.fixed_time += dt.max(0.0);
    }

    /// Move the time of `channel` forward to `now`. Earlier values are ignored.
    pub fn set(&mut self, channel: Channel, now: f32) {
        let slot = match channel {
            Channel::Update => &mut self.time,
            Channel::FixedUpdate => &mut self.fixed_time,
        };
        *slot = slot.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0); // half a frame
        assert_eq!(ts.accumulate(0.010), 1); // over one frame total
    }

    #[test]
    fn caps_at_max_steps() {
        let mut ts = FixedTimestep::with_max_steps(1.0 / 60.0, 4);
        let steps = ts.accumulate(1.0); // 60 frames worth, capped
        assert_eq!(steps, 4);
    }

    #[test]
    fn alpha_is_between_zero_and_one() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        ts.accumulate(0.008);
        let a = ts.alpha();
        assert!((0.0..=1.0).contains(&a), "alpha was {}", a);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut clock = Clock::new();
        clock.set(Channel::Update, 2.0);
        clock.set(Channel::Update, 1.0);
        assert_eq!(clock.time(), 2.0);

        clock.advance(-1.0);
        assert_eq!(clock.time(), 2.0);

        clock.advance_fixed(0.5);
        assert_eq!(clock.now(Channel::FixedUpdate), 0.5);
        assert_eq!(clock.now(Channel::Update), 2.0);
    }
}
