use std::collections::BTreeMap;
use std::fmt;

use crate::questions::EconomicFactor;

/// PSS-10 maximum (10 items × 4).
pub const PSS_MAX: u8 = 40;
/// Life-event points at which disruption is reported as 100%.
pub const LIFE_EVENTS_CEILING: u32 = 300;
/// Economic security maximum (6 factors × 5).
pub const ECONOMIC_MAX: u8 = 30;

/// PSS score at which stress is a clinical concern.
pub const HIGH_PSS: u8 = 20;
/// Holmes-Rahe points marking elevated risk.
pub const HIGH_LIFE_EVENTS: u32 = 200;
/// Economic security at or below which a respondent is in financial distress.
pub const LOW_ECONOMIC_SECURITY: u8 = 15;

/// Result of one complete answer set.
///
/// `economic` grows with security, so economic *pressure* is its complement.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub pss: u8,
    pub life_events: u32,
    pub economic: u8,
    pub factors: BTreeMap<EconomicFactor, u8>,
    /// PSS as percent of its maximum
    pub stress_intensity: f32,
    /// Life-event points as percent of the ceiling, capped at 100
    pub life_disruption: f32,
    /// Missing economic security as percent
    pub economic_pressure: f32,
    /// Mean of the three percentages
    pub aggregate: f32,
}

impl ScoreResult {
    pub fn new(
        pss: u8,
        life_events: u32,
        economic: u8,
        factors: BTreeMap<EconomicFactor, u8>,
    ) -> Self {
        let pss = pss.min(PSS_MAX);
        let economic = economic.min(ECONOMIC_MAX);
        let stress_intensity = f32::from(pss) / f32::from(PSS_MAX) * 100.0;
        let life_disruption =
            (life_events as f32 / LIFE_EVENTS_CEILING as f32 * 100.0).min(100.0);
        let economic_pressure =
            f32::from(ECONOMIC_MAX - economic) / f32::from(ECONOMIC_MAX) * 100.0;
        let aggregate = (stress_intensity + life_disruption + economic_pressure) / 3.0;
        Self {
            pss,
            life_events,
            economic,
            factors,
            stress_intensity,
            life_disruption,
            economic_pressure,
            aggregate,
        }
    }

    /// Lowest possible stress: no perceived stress, no life events, full
    /// economic security.
    pub fn minimum() -> Self {
        ScoreResult::new(0, 0, ECONOMIC_MAX, BTreeMap::new())
    }

    /// Highest possible stress on every derived metric.
    pub fn maximum() -> Self {
        ScoreResult::new(PSS_MAX, LIFE_EVENTS_CEILING, 0, BTreeMap::new())
    }

    pub fn scores(&self) -> (u8, u32, u8) {
        (self.pss, self.life_events, self.economic)
    }

    pub fn high_pss(&self) -> bool {
        self.pss >= HIGH_PSS
    }

    pub fn high_life_events(&self) -> bool {
        self.life_events >= HIGH_LIFE_EVENTS
    }

    pub fn low_economic_security(&self) -> bool {
        self.economic <= LOW_ECONOMIC_SECURITY
    }

    /// Score of a single economic factor, 0 when it was not asked.
    pub fn factor(&self, factor: EconomicFactor) -> u8 {
        self.factors.get(&factor).copied().unwrap_or(0)
    }

    pub fn has_stress(&self) -> bool {
        self.pss_band() == PssBand::High
    }

    pub fn pss_band(&self) -> PssBand {
        match self.pss {
            0..=13 => PssBand::Low,
            14..=20 => PssBand::Moderate,
            _ => PssBand::High,
        }
    }

    pub fn life_event_band(&self) -> LifeEventBand {
        match self.life_events {
            0..=149 => LifeEventBand::Low,
            150..=299 => LifeEventBand::Moderate,
            _ => LifeEventBand::Major,
        }
    }

    pub fn economic_band(&self) -> EconomicBand {
        match self.economic_pressure {
            p if p < 25.0 => EconomicBand::Low,
            p if p < 50.0 => EconomicBand::Moderate,
            p if p < 75.0 => EconomicBand::High,
            _ => EconomicBand::Severe,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PssBand {
    Low,
    Moderate,
    High,
}

impl fmt::Display for PssBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PssBand::Low => write!(f, "Low stress"),
            PssBand::Moderate => write!(f, "Moderate stress"),
            PssBand::High => write!(f, "High stress - consider professional support"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeEventBand {
    Low,
    Moderate,
    Major,
}

impl fmt::Display for LifeEventBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeEventBand::Low => write!(f, "Low change impact"),
            LifeEventBand::Moderate => write!(f, "Moderate life changes"),
            LifeEventBand::Major => write!(f, "Major life disruption"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomicBand {
    Low,
    Moderate,
    High,
    Severe,
}

impl fmt::Display for EconomicBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomicBand::Low => write!(f, "Low economic pressure"),
            EconomicBand::Moderate => write!(f, "Moderate economic stress"),
            EconomicBand::High => write!(f, "High economic pressure"),
            EconomicBand::Severe => write!(f, "Severe economic distress"),
        }
    }
}
