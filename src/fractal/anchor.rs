use crate::config::AnchorSchedule;
use crate::math::AnchorRatio;

/// Advances the anchor ratio once per generation according to a schedule
#[derive(Debug, Clone)]
pub struct AnchorStepper {
    schedule: AnchorSchedule,
    ratio: AnchorRatio,
    generation: u32,
    rising: bool,
}

impl AnchorStepper {
    pub fn new(schedule: AnchorSchedule, initial: AnchorRatio) -> Self {
        Self {
            schedule,
            ratio: initial,
            generation: 0,
            rising: false,
        }
    }

    pub fn current(&self) -> AnchorRatio {
        self.ratio
    }

    /// Step to the next generation's ratio; returns true if it changed
    pub fn advance(&mut self) -> bool {
        let previous = self.ratio;

        match self.schedule {
            AnchorSchedule::Fixed => {}
            // Holds for `period` generations, mirrors on the next one
            AnchorSchedule::Flipping { period } => {
                if self.generation < period {
                    self.generation += 1;
                } else {
                    self.generation = 0;
                    self.ratio = AnchorRatio::nudged(1.0 - self.ratio.get());
                }
            }
            // `limit` moves, then one generation held while the direction turns
            AnchorSchedule::Wave { step, limit } => {
                if self.generation < limit {
                    let delta = if self.rising { step } else { -step };
                    self.ratio = AnchorRatio::nudged((self.ratio.get() + delta).rem_euclid(1.0));
                    self.generation += 1;
                } else {
                    self.generation = 0;
                    self.rising = !self.rising;
                }
            }
        }

        self.ratio != previous
    }
}
