use crate::questions::EconomicFactor;
use crate::score::ScoreResult;

/// Combinations of stressors that amplify each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressPattern {
    EconomicPsychologicalSpiral,
    TripleStressAmplification,
    PrivilegeGuiltComplex,
    SurvivalModeActivation,
    HeroicFunctioning,
}

impl StressPattern {
    /// Every pattern present in `score`, in a stable order.
    pub fn detect(score: &ScoreResult) -> Vec<StressPattern> {
        let high_pss = score.high_pss();
        let high_life_events = score.high_life_events();
        let low_security = score.low_economic_security();

        let mut patterns = Vec::new();
        if low_security && high_pss {
            patterns.push(StressPattern::EconomicPsychologicalSpiral);
        }
        if high_pss && high_life_events && low_security {
            patterns.push(StressPattern::TripleStressAmplification);
        }
        if high_pss && !low_security && !high_life_events {
            patterns.push(StressPattern::PrivilegeGuiltComplex);
        }
        if low_security && score.factor(EconomicFactor::EmergencyPreparedness) <= 1 {
            patterns.push(StressPattern::SurvivalModeActivation);
        }
        if (high_pss || high_life_events) && score.economic < 20 {
            patterns.push(StressPattern::HeroicFunctioning);
        }
        patterns
    }

    pub fn title(self) -> &'static str {
        match self {
            StressPattern::EconomicPsychologicalSpiral => "Economic-Psychological Spiral",
            StressPattern::TripleStressAmplification => "Triple Stress Amplification",
            StressPattern::PrivilegeGuiltComplex => "Privilege Guilt Complex",
            StressPattern::SurvivalModeActivation => "Survival Mode Activation",
            StressPattern::HeroicFunctioning => "Heroic Functioning Under Pressure",
        }
    }

    pub fn insight(self) -> &'static str {
        match self {
            StressPattern::EconomicPsychologicalSpiral => {
                "Your stress may be a rational response to economic pressure rather than a personal failing."
            }
            StressPattern::TripleStressAmplification => {
                "You're managing multiple major stressors simultaneously - this requires exceptional resilience."
            }
            StressPattern::PrivilegeGuiltComplex => {
                "Economic security doesn't invalidate psychological struggles - your pain is real."
            }
            StressPattern::SurvivalModeActivation => {
                "Your nervous system is in constant threat detection due to financial insecurity."
            }
            StressPattern::HeroicFunctioning => {
                "You're maintaining functionality while processing major life challenges."
            }
        }
    }

    pub fn validation(self) -> &'static str {
        match self {
            StressPattern::EconomicPsychologicalSpiral => {
                "Research shows financial stress directly impacts mental health - your feelings make sense."
            }
            StressPattern::TripleStressAmplification => {
                "You're performing heroic emotional labor under extraordinary circumstances."
            }
            StressPattern::PrivilegeGuiltComplex => {
                "Mental health challenges exist across all economic levels and deserve attention."
            }
            StressPattern::SurvivalModeActivation => {
                "Hypervigilance about money is an adaptive response to real economic threat."
            }
            StressPattern::HeroicFunctioning => {
                "This level of resilience under stress demonstrates exceptional psychological strength."
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;

    fn score(pss: u8, life_events: u32, economic: u8, emergency: u8) -> ScoreResult {
        let factors = BTreeMap::from([(EconomicFactor::EmergencyPreparedness, emergency)]);
        ScoreResult::new(pss, life_events, economic, factors)
    }

    #[test]
    fn test_calm_has_no_patterns() {
        assert!(StressPattern::detect(&score(5, 40, 28, 5)).is_empty());
    }

    #[test]
    fn test_triple() {
        assert_eq!(
            StressPattern::detect(&score(30, 250, 10, 2)),
            vec![
                StressPattern::EconomicPsychologicalSpiral,
                StressPattern::TripleStressAmplification,
                StressPattern::HeroicFunctioning,
            ]
        );
    }

    #[test]
    fn test_survival_mode() {
        let patterns = StressPattern::detect(&score(5, 0, 12, 0));
        assert_eq!(patterns, vec![StressPattern::SurvivalModeActivation]);
        // a $400 cushion switches it off
        assert!(StressPattern::detect(&score(5, 0, 12, 2)).is_empty());
    }

    #[test]
    fn test_privilege_guilt() {
        assert_eq!(
            StressPattern::detect(&score(25, 0, 25, 5)),
            vec![StressPattern::PrivilegeGuiltComplex]
        );
    }

    #[test]
    fn test_heroic_functioning() {
        assert_eq!(
            StressPattern::detect(&score(25, 0, 18, 5)),
            vec![
                StressPattern::PrivilegeGuiltComplex,
                StressPattern::HeroicFunctioning
            ]
        );
    }
}
