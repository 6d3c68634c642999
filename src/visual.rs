use crate::archetype::Archetype;
use crate::pattern::StressPattern;
use crate::score::ScoreResult;

/// Jitter amplitude at rest. Keeps the idle stone from looking frozen.
pub const CALM_JITTER: f32 = 0.02;
/// Jitter amplitude at the top of the aggregate scale.
pub const MAX_JITTER: f32 = 0.3;
/// Colour phase advance per frame, in turns.
pub const CALM_COLOR_SPEED: f32 = 0.003;
pub const MAX_COLOR_SPEED: f32 = 0.012;
/// Teal, in turns around the colour wheel.
pub const CALM_HUE: f32 = 0.5;
pub const MAX_SPEED_BOOST: f32 = 0.8;

/// Everything the render loop needs to know about a result.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualParameters {
    pub archetype: Archetype,
    pub patterns: Vec<StressPattern>,
    /// Stress intensity, 0..=1
    pub stress: f32,
    /// Economic pressure, 0..=1
    pub pressure: f32,
    /// Life disruption, 0..=1
    pub disruption: f32,
    /// Chaos parameter: bound of the per-tick random velocity kick.
    pub jitter: f32,
    pub color_speed: f32,
    pub speed_multiplier: f32,
    /// Hue in turns the background drifts around.
    pub hue_base: f32,
    pub particle_count: usize,
    pub wisp_count: usize,
    pub fragment_count: usize,
}

impl VisualParameters {
    /// Baseline shown before any assessment has been submitted.
    pub fn calm() -> Self {
        Self {
            archetype: Archetype::BalancedNavigator,
            patterns: Vec::new(),
            stress: 0.0,
            pressure: 0.0,
            disruption: 0.0,
            jitter: CALM_JITTER,
            color_speed: CALM_COLOR_SPEED,
            speed_multiplier: 1.0,
            hue_base: CALM_HUE,
            particle_count: 150,
            wisp_count: 12,
            fragment_count: 0,
        }
    }

    pub fn from_score(score: &ScoreResult) -> Self {
        let stress_pct = clamp_percent(score.stress_intensity);
        let pressure_pct = clamp_percent(score.economic_pressure);
        let disruption_pct = clamp_percent(score.life_disruption);
        let t = clamp_percent(score.aggregate) / 100.0;

        Self {
            archetype: Archetype::classify(score),
            patterns: StressPattern::detect(score),
            stress: stress_pct / 100.0,
            pressure: pressure_pct / 100.0,
            disruption: disruption_pct / 100.0,
            jitter: lerp(CALM_JITTER, MAX_JITTER, t),
            color_speed: lerp(CALM_COLOR_SPEED, MAX_COLOR_SPEED, t),
            speed_multiplier: 1.0 + MAX_SPEED_BOOST * t,
            hue_base: CALM_HUE * (1.0 - t),
            particle_count: (150.0 - stress_pct.trunc()).clamp(50.0, 200.0) as usize,
            wisp_count: (12 - (pressure_pct as usize) / 10).max(6),
            fragment_count: (30.0 * stress_pct / 100.0) as usize,
        }
    }

    /// Parameters that would break the simulation: non-finite numbers or an
    /// empty particle field.
    pub fn is_degenerate(&self) -> bool {
        let finite = [
            self.stress,
            self.pressure,
            self.disruption,
            self.jitter,
            self.color_speed,
            self.speed_multiplier,
            self.hue_base,
        ]
        .iter()
        .all(|v| v.is_finite());
        !finite || self.jitter < 0.0 || self.particle_count == 0 || self.wisp_count == 0
    }

    /// `self`, or the calm baseline when degenerate.
    pub fn or_calm(self) -> Self {
        if self.is_degenerate() {
            VisualParameters::calm()
        } else {
            self
        }
    }

    pub fn stress_percent(&self) -> u32 {
        (self.stress * 100.0) as u32
    }

    pub fn pressure_percent(&self) -> u32 {
        (self.pressure * 100.0) as u32
    }

    pub fn disruption_percent(&self) -> u32 {
        (self.disruption * 100.0) as u32
    }
}

impl Default for VisualParameters {
    fn default() -> Self {
        VisualParameters::calm()
    }
}

/// Exact at both ends and never above `to`, so results stay monotonic in `t`.
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 {
        to
    } else {
        (from + (to - from) * t).min(to)
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
