use std::time::{Duration, Instant};

use crate::config::GameRules;

/// Cosmetic score that walks toward the real one in a few linear steps.
///
/// Reads the authoritative score through [`retarget`](Self::retarget) and never
/// feeds anything back into the session.
#[derive(Debug, Clone)]
pub struct ScorePresenter {
    duration: Duration,
    steps: u32,
    from: i32,
    target: i32,
    started_at: Option<Instant>,
}

impl ScorePresenter {
    pub fn new(duration: Duration, steps: u32) -> Self {
        Self {
            duration,
            steps: steps.max(1),
            from: 0,
            target: 0,
            started_at: None,
        }
    }

    pub fn from_rules(rules: &GameRules) -> Self {
        Self::new(rules.score_animation(), rules.score_animation_steps)
    }

    /// Starts a new interpolation from whatever is on screen right now.
    pub fn retarget(&mut self, score: i32, now: Instant) {
        if score == self.target {
            return;
        }
        self.from = self.display_at(now);
        self.target = score;
        self.started_at = Some(now);
    }

    pub fn display_at(&self, now: Instant) -> i32 {
        let Some(started_at) = self.started_at else {
            return self.target;
        };

        let step = self.duration / self.steps;
        let elapsed = now.saturating_duration_since(started_at);
        let completed = if step.is_zero() {
            self.steps
        } else {
            let done = elapsed.as_nanos() / step.as_nanos();
            u32::try_from(done).unwrap_or(u32::MAX).min(self.steps)
        };

        let progress = f64::from(completed) / f64::from(self.steps);
        let span = f64::from(self.target) - f64::from(self.from);
        (f64::from(self.from) + span * progress).round() as i32
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.display_at(now) == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> ScorePresenter {
        ScorePresenter::new(Duration::from_millis(400), 20)
    }

    #[test]
    fn test_converges_in_linear_steps() {
        let start = Instant::now();
        let mut presenter = presenter();
        presenter.retarget(100, start);

        assert_eq!(presenter.display_at(start), 0);
        assert_eq!(presenter.display_at(start + Duration::from_millis(19)), 0);
        assert_eq!(presenter.display_at(start + Duration::from_millis(20)), 5);
        assert_eq!(presenter.display_at(start + Duration::from_millis(200)), 50);
        assert_eq!(presenter.display_at(start + Duration::from_millis(400)), 100);
        assert_eq!(presenter.display_at(start + Duration::from_secs(5)), 100);
        assert!(presenter.is_settled(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_retarget_restarts_from_displayed_value() {
        let start = Instant::now();
        let mut presenter = presenter();
        presenter.retarget(100, start);

        let midway = start + Duration::from_millis(200);
        presenter.retarget(50, midway);
        assert_eq!(presenter.display_at(midway), 50);
        assert_eq!(presenter.display_at(midway + Duration::from_millis(400)), 50);

        let later = midway + Duration::from_millis(400);
        presenter.retarget(0, later);
        assert_eq!(presenter.display_at(later + Duration::from_millis(200)), 25);
    }

    #[test]
    fn test_negative_scores() {
        let start = Instant::now();
        let mut presenter = presenter();
        presenter.retarget(-50, start);
        assert_eq!(presenter.display_at(start + Duration::from_millis(200)), -25);
        assert_eq!(presenter.display_at(start + Duration::from_millis(400)), -50);
    }
}
