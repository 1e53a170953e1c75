use serde::{Serialize, Deserialize};

/// Inverse-time learning-rate decay: `base / (1 + decay · iteration)`.
///
/// The iteration counter only moves when the caller invokes [`decay`](Self::decay);
/// whether that happens per sample or per epoch is the training driver's choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRateSchedule {
    base: f64,
    decay: f64,
    #[serde(default)]
    iteration: u64,
}

impl LearningRateSchedule {
    pub fn new(base: f64, decay: f64) -> LearningRateSchedule {
        LearningRateSchedule { base, decay, iteration: 0 }
    }

    /// A schedule that never changes.
    pub fn constant(base: f64) -> LearningRateSchedule {
        LearningRateSchedule::new(base, 0.0)
    }

    /// Current effective learning rate.
    pub fn value(&self) -> f64 {
        self.base / (1.0 + self.decay * self.iteration as f64)
    }

    /// Advances the iteration counter by one.
    pub fn decay(&mut self) {
        self.iteration += 1;
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_base_rate() {
        assert_eq!(LearningRateSchedule::new(0.5, 0.1).value(), 0.5);
    }

    #[test]
    fn decays_inverse_to_iteration() {
        let mut schedule = LearningRateSchedule::new(1.0, 0.5);
        schedule.decay();
        assert!((schedule.value() - 1.0 / 1.5).abs() < 1e-12);
        schedule.decay();
        assert!((schedule.value() - 0.5).abs() < 1e-12);
        assert_eq!(schedule.iteration(), 2);
    }

    #[test]
    fn constant_schedule_ignores_decay() {
        let mut schedule = LearningRateSchedule::constant(0.15);
        for _ in 0..100 {
            schedule.decay();
        }
        assert_eq!(schedule.value(), 0.15);
    }
}
