use crate::color::Rgb;
use crate::score::ScoreResult;

/// Overall mood category, chosen from the derived percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    EconomicSurvivor,
    StormNavigator,
    PrivilegedAnxious,
    BalancedNavigator,
    AdaptiveResponder,
}

impl Archetype {
    /// First matching rule wins.
    pub fn classify(score: &ScoreResult) -> Archetype {
        let stress = score.stress_intensity;
        let disruption = score.life_disruption;
        let pressure = score.economic_pressure;

        if pressure > 70.0 && stress > 60.0 {
            Archetype::EconomicSurvivor
        } else if stress > 70.0 && disruption > 50.0 {
            Archetype::StormNavigator
        } else if pressure < 30.0 && stress > 60.0 {
            Archetype::PrivilegedAnxious
        } else if score.aggregate < 40.0 {
            Archetype::BalancedNavigator
        } else {
            Archetype::AdaptiveResponder
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Archetype::EconomicSurvivor => "The Economic Survivor",
            Archetype::StormNavigator => "The Storm Navigator",
            Archetype::PrivilegedAnxious => "The Privileged Anxious",
            Archetype::BalancedNavigator => "The Balanced Navigator",
            Archetype::AdaptiveResponder => "The Adaptive Responder",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Archetype::EconomicSurvivor => "Managing high stress under significant economic pressure",
            Archetype::StormNavigator => "Processing multiple life changes with heightened stress",
            Archetype::PrivilegedAnxious => {
                "Experiencing psychological distress despite economic security"
            }
            Archetype::BalancedNavigator => "Managing life stressors with relative stability",
            Archetype::AdaptiveResponder => "Experiencing moderate stress with active coping",
        }
    }

    pub fn primary_insight(self) -> &'static str {
        match self {
            Archetype::EconomicSurvivor => {
                "You're displaying remarkable resilience under economic duress"
            }
            Archetype::StormNavigator => {
                "You're actively processing major life transitions - this is emotional work"
            }
            Archetype::PrivilegedAnxious => {
                "Economic privilege allows focus on deeper psychological growth needs"
            }
            Archetype::BalancedNavigator => {
                "You're demonstrating healthy coping and emotional regulation"
            }
            Archetype::AdaptiveResponder => {
                "You're actively adapting to life challenges with resilience"
            }
        }
    }

    /// Five colours the stone core cycles through, darkest first.
    pub fn palette(self) -> [Rgb; 5] {
        match self {
            Archetype::EconomicSurvivor => [
                Rgb::hex(0x8B0000),
                Rgb::hex(0xB22222),
                Rgb::hex(0xCD5C5C),
                Rgb::hex(0xF08080),
                Rgb::hex(0xFFB6C1),
            ],
            Archetype::StormNavigator => [
                Rgb::hex(0x4B0082),
                Rgb::hex(0x6A5ACD),
                Rgb::hex(0x9370DB),
                Rgb::hex(0xDDA0DD),
                Rgb::hex(0xE6E6FA),
            ],
            Archetype::PrivilegedAnxious => [
                Rgb::hex(0x2F4F4F),
                Rgb::hex(0x708090),
                Rgb::hex(0x778899),
                Rgb::hex(0xB0C4DE),
                Rgb::hex(0xF0F8FF),
            ],
            Archetype::BalancedNavigator => [
                Rgb::hex(0x27AE60),
                Rgb::hex(0x16A085),
                Rgb::hex(0x95A5A6),
                Rgb::hex(0xBDC3C7),
                Rgb::hex(0xECF0F1),
            ],
            Archetype::AdaptiveResponder => [
                Rgb::hex(0xE67E22),
                Rgb::hex(0xF39C12),
                Rgb::hex(0xF1C40F),
                Rgb::hex(0xFFFACD),
                Rgb::hex(0xFFFFF0),
            ],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;

    fn classify(pss: u8, life_events: u32, economic: u8) -> Archetype {
        Archetype::classify(&ScoreResult::new(pss, life_events, economic, BTreeMap::new()))
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(30, 0, 4), Archetype::EconomicSurvivor);
        assert_eq!(classify(30, 200, 20), Archetype::StormNavigator);
        assert_eq!(classify(28, 0, 25), Archetype::PrivilegedAnxious);
        assert_eq!(classify(0, 0, 30), Archetype::BalancedNavigator);
        assert_eq!(classify(20, 150, 15), Archetype::AdaptiveResponder);
    }

    #[test]
    fn test_economic_survivor_takes_precedence() {
        // also matches the storm navigator rule
        assert_eq!(classify(36, 300, 0), Archetype::EconomicSurvivor);
    }

    #[test]
    fn test_palette() {
        assert_eq!(
            Archetype::EconomicSurvivor.palette()[0],
            Rgb::new(0x8B, 0x00, 0x00)
        );
    }
}
