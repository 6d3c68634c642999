use std::f32::consts::TAU;

use eframe::egui::{vec2, Vec2};
use rand::Rng;

use crate::visual::VisualParameters;

/// Pull toward the stone centre, per frame.
pub const GRAVITY: f32 = 0.08;
/// Velocity retained per frame.
pub const DAMPING: f32 = 0.98;
/// Fragments closer than this to the centre are recycled.
const FRAGMENT_REACH: f32 = 20.0;
/// Accumulated time this close to a whole frame counts as one.
const FRAME_EPSILON: f32 = 1e-3;
/// Most frames simulated for a single `step` call. Longer gaps are dropped.
pub const MAX_CATCH_UP: usize = 8;

/// Which stressor a particle stands for. Only affects its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyKind {
    Core,
    Stress,
    Economic,
}

impl EnergyKind {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => EnergyKind::Core,
            1 => EnergyKind::Stress,
            _ => EnergyKind::Economic,
        }
    }
}

/// Positions are relative to the stone centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub kind: EnergyKind,
    /// Colour cycle position in turns, 0..1
    pub phase: f32,
}

impl Particle {
    fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let max_life = rng.gen_range(50.0..200.0);
        Self {
            position: Vec2::new(rng.gen_range(-100.0..100.0), rng.gen_range(-100.0..100.0)),
            velocity: Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)),
            life: rng.gen_range(1.0..=max_life),
            max_life,
            size: rng.gen_range(1.0..4.0),
            kind: EnergyKind::random(rng),
            phase: rng.gen_range(0.0..1.0),
        }
    }

    /// Sends an expired particle back out onto the outer ring.
    fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let angle = rng.gen_range(0.0..TAU);
        self.position = Vec2::angled(angle) * rng.gen_range(150.0f32..250.0);
        self.velocity = vec2(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        self.life = self.max_life;
    }

    /// Remaining life as a fraction, used to fade the particle out.
    pub fn vitality(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    /// One nominal frame.
    fn step<R: Rng + ?Sized>(&mut self, params: &VisualParameters, rng: &mut R) {
        let distance = match self.position.length() {
            d if d > 0.0 => d,
            _ => 1.0,
        };
        self.velocity += -self.position * (GRAVITY / distance);

        let jitter = params.jitter;
        if jitter > 0.0 {
            self.velocity += vec2(
                rng.gen_range(-jitter..=jitter),
                rng.gen_range(-jitter..=jitter),
            );
        }

        self.position += self.velocity * params.speed_multiplier;
        self.velocity *= DAMPING;
        self.phase = (self.phase + params.color_speed).rem_euclid(1.0);

        self.life -= 1.0;
        if self.life <= 0.0 {
            self.respawn(rng);
        }
    }
}

/// Ribbon of light orbiting the stone.
#[derive(Debug, Clone, PartialEq)]
pub struct Wisp {
    /// Orbit position in radians, wrapped to one turn.
    pub angle: f32,
    /// Colour offset in turns. Advances with `angle` but wraps at 1.0 so the
    /// hue never jumps.
    pub hue_phase: f32,
    pub radius: f32,
    pub flow_speed: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Wisp {
    fn step(&mut self, params: &VisualParameters) {
        let advance = self.flow_speed * params.speed_multiplier;
        self.angle = (self.angle + advance) % TAU;
        self.hue_phase = (self.hue_phase + advance).rem_euclid(1.0);
    }
}

/// Shard pulled into the stone; only present under stress.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub position: Vec2,
    pub speed: f32,
    pub size: f32,
}

impl Fragment {
    fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            position: vec2(rng.gen_range(-200.0..200.0), rng.gen_range(-200.0..200.0)),
            speed: rng.gen_range(0.5..2.0),
            size: rng.gen_range(2.0..6.0),
        }
    }

    fn step<R: Rng + ?Sized>(&mut self, params: &VisualParameters, rng: &mut R) {
        let distance = self.position.length();
        if distance < FRAGMENT_REACH {
            self.position = Vec2::angled(rng.gen_range(0.0..TAU)) * rng.gen_range(200.0f32..260.0);
            return;
        }
        let toward = -self.position / distance;
        let chaos = params.stress * 2.0;
        let wobble = if chaos > 0.0 {
            vec2(rng.gen_range(-chaos..=chaos), rng.gen_range(-chaos..=chaos))
        } else {
            Vec2::ZERO
        };
        self.position += (toward * self.speed + wobble) * params.speed_multiplier;
    }
}

/// All moving parts of the animation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub wisps: Vec<Wisp>,
    pub fragments: Vec<Fragment>,
    /// Nominal time received but not yet simulated, below one frame.
    pending: f32,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(params: &VisualParameters, rng: &mut R) -> Self {
        let particles = (0..params.particle_count)
            .map(|_| Particle::spawn(rng))
            .collect();

        let count = params.wisp_count.max(1);
        let wisps = (0..count)
            .map(|i| {
                let angle = i as f32 * TAU / count as f32;
                Wisp {
                    angle,
                    hue_phase: angle.rem_euclid(1.0),
                    radius: rng.gen_range(80.0..150.0),
                    flow_speed: rng.gen_range(0.01..0.03),
                    amplitude: rng.gen_range(10.0..30.0),
                    frequency: rng.gen_range(0.5..2.0),
                }
            })
            .collect();

        let fragments = (0..params.fragment_count)
            .map(|_| Fragment::spawn(rng))
            .collect();

        Self {
            particles,
            wisps,
            fragments,
            pending: 0.0,
        }
    }

    /// Feeds `dt` nominal frames of elapsed time and simulates every whole
    /// frame that has accumulated. Returns the number of frames simulated.
    ///
    /// Frames are fixed one-frame steps: the same elapsed time gives the same
    /// field however it is sliced.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        params: &VisualParameters,
        dt: f32,
        rng: &mut R,
    ) -> usize {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.pending = (self.pending + dt).min(MAX_CATCH_UP as f32);
        let mut frames = 0;
        while self.pending >= 1.0 - FRAME_EPSILON {
            self.pending -= 1.0;
            self.frame(params, rng);
            frames += 1;
        }
        frames
    }

    fn frame<R: Rng + ?Sized>(&mut self, params: &VisualParameters, rng: &mut R) {
        for particle in &mut self.particles {
            particle.step(params, rng);
        }
        for wisp in &mut self.wisps {
            wisp.step(params);
        }
        for fragment in &mut self.fragments {
            fragment.step(params, rng);
        }
    }
}
