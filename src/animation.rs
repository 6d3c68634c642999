use eframe::egui::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::particle::ParticleField;
use crate::scene::{self, Frame, Shape};
use crate::score::ScoreResult;
use crate::visual::VisualParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No result yet, showing the calm default animation.
    Idle,
    Animating,
}

/// Owns everything that changes from frame to frame.
pub struct Controller {
    state: State,
    params: VisualParameters,
    field: ParticleField,
    rng: StdRng,
    /// Elapsed nominal frames since the current parameters were applied.
    clock: f32,
    running: bool,
}

impl Controller {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let params = VisualParameters::calm();
        let field = ParticleField::new(&params, &mut rng);
        Self {
            state: State::Idle,
            params,
            field,
            rng,
            clock: 0.0,
            running: true,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn params(&self) -> &VisualParameters {
        &self.params
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Shapes for the current frame on a canvas of `size` pixels.
    pub fn compose(&mut self, size: Vec2) -> Vec<Shape> {
        let frame = Frame {
            state: self.state,
            params: &self.params,
            field: &self.field,
            clock: self.clock,
            size,
        };
        scene::compose(&frame, &mut self.rng)
    }

    /// Starts animating `score`. The only way out of `Idle`.
    pub fn submit(&mut self, score: &ScoreResult) {
        self.apply(Some(VisualParameters::from_score(score)));
        if self.state == State::Idle {
            info!("assessment received, leaving idle");
        }
        self.state = State::Animating;
    }

    /// Installs new parameters and reseeds the field without changing state.
    /// Missing or degenerate parameters fall back to the calm baseline.
    pub fn apply(&mut self, params: Option<VisualParameters>) {
        let params = match params {
            Some(params) if params.is_degenerate() => {
                warn!(?params, "degenerate visual parameters, using calm baseline");
                VisualParameters::calm()
            }
            Some(params) => params,
            None => VisualParameters::calm(),
        };
        info!(
            archetype = params.archetype.name(),
            jitter = params.jitter,
            particles = params.particle_count,
            state = ?self.state,
            "visual parameters applied"
        );
        self.field = ParticleField::new(&params, &mut self.rng);
        self.params = params;
        self.clock = 0.0;
    }

    /// Back to the idle animation, e.g. after the answers were cleared.
    pub fn reset(&mut self) {
        debug!("controller reset to idle");
        self.params = VisualParameters::calm();
        self.field = ParticleField::new(&self.params, &mut self.rng);
        self.clock = 0.0;
        self.state = State::Idle;
    }

    /// Advances the clock by `dt` nominal frames. The field only moves in
    /// whole frames, however the time is sliced.
    pub fn tick(&mut self, dt: f32) {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.field.step(&self.params, dt, &mut self.rng);
        self.clock += dt;
    }

    /// Called when the window closes; later ticks do nothing.
    pub fn stop(&mut self) {
        if self.running {
            debug!(clock = self.clock, "animation stopped");
        }
        self.running = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::answer::AnswerStore;
    use std::collections::BTreeMap;

    #[test]
    fn test_starts_idle_and_calm() {
        let controller = Controller::new(Some(1));
        assert_eq!(controller.state(), State::Idle);
        assert_eq!(controller.params(), &VisualParameters::calm());
        assert_eq!(controller.field().particles.len(), 150);
        assert!(controller.is_running());
    }

    #[test]
    fn test_idle_still_animates() {
        let mut controller = Controller::new(Some(1));
        let before = controller.field().particles[0].position;
        controller.tick(1.0);
        assert_eq!(controller.state(), State::Idle);
        assert_ne!(controller.field().particles[0].position, before);
        assert_eq!(controller.clock(), 1.0);
    }

    #[test]
    fn test_submit_transitions() {
        let mut controller = Controller::new(Some(2));
        let score = AnswerStore::demo().unwrap().to_score_result().unwrap();
        controller.submit(&score);
        assert_eq!(controller.state(), State::Animating);
        assert_eq!(controller.params(), &VisualParameters::from_score(&score));
        assert_eq!(
            controller.field().particles.len(),
            controller.params().particle_count
        );
        assert_eq!(controller.clock(), 0.0);
    }

    #[test]
    fn test_apply_without_result_stays_idle() {
        let mut controller = Controller::new(Some(8));
        controller.apply(None);
        assert_eq!(controller.state(), State::Idle);
        let shapes = controller.compose(Vec2::new(800.0, 600.0));
        assert!(shapes.iter().any(|s| matches!(
            s,
            Shape::Text { text, .. } if text == "Take the assessment to reveal your stone"
        )));

        controller.apply(Some(VisualParameters::from_score(&ScoreResult::maximum())));
        assert_eq!(controller.state(), State::Idle);
    }

    #[test]
    fn test_missing_parameters_fall_back() {
        let mut controller = Controller::new(Some(3));
        controller.submit(&ScoreResult::maximum());
        controller.apply(None);
        assert_eq!(controller.params(), &VisualParameters::calm());
        assert_eq!(controller.state(), State::Animating);

        let mut broken = VisualParameters::from_score(&ScoreResult::new(
            40,
            300,
            0,
            BTreeMap::new(),
        ));
        broken.speed_multiplier = f32::INFINITY;
        controller.apply(Some(broken));
        assert_eq!(controller.params(), &VisualParameters::calm());
    }

    #[test]
    fn test_reset() {
        let mut controller = Controller::new(Some(4));
        controller.submit(&ScoreResult::maximum());
        controller.tick(3.0);
        controller.reset();
        assert_eq!(controller.state(), State::Idle);
        assert_eq!(controller.clock(), 0.0);
        assert_eq!(controller.params(), &VisualParameters::calm());
    }

    #[test]
    fn test_compose_tracks_state() {
        let mut controller = Controller::new(Some(7));
        let size = Vec2::new(800.0, 600.0);
        let idle = controller.compose(size);
        controller.submit(&ScoreResult::maximum());
        let animating = controller.compose(size);
        let titles = |shapes: &[Shape]| {
            shapes
                .iter()
                .filter(|s| matches!(s, Shape::Text { .. }))
                .count()
        };
        assert_eq!(titles(&idle), 1);
        assert_eq!(titles(&animating), 4);
    }

    #[test]
    fn test_stop() {
        let mut controller = Controller::new(Some(5));
        controller.stop();
        let before = controller.field().clone();
        controller.tick(1.0);
        assert_eq!(controller.field(), &before);
        assert_eq!(controller.clock(), 0.0);
    }

    #[test]
    fn test_tick_rate_does_not_change_field() {
        let mut steady = Controller::new(Some(12));
        let mut busy = Controller::new(Some(12));
        let score = ScoreResult::maximum();
        steady.submit(&score);
        busy.submit(&score);

        // a repaint every 10ms against one every 40ms, over 8 frames
        for _ in 0..8 {
            steady.tick(1.0);
        }
        for _ in 0..32 {
            busy.tick(0.25);
        }
        assert_eq!(steady.field(), busy.field());
        assert_eq!(steady.clock(), busy.clock());
    }

    #[test]
    fn test_bad_delta_is_ignored() {
        let mut controller = Controller::new(Some(6));
        controller.tick(f32::NAN);
        controller.tick(-1.0);
        assert_eq!(controller.clock(), 0.0);
    }
}
