use std::fmt;

use crate::archetype::Archetype;
use crate::pattern::StressPattern;
use crate::score::ScoreResult;

/// Human readable summary of a result.
#[derive(Debug, Clone)]
pub struct Report {
    pub score: ScoreResult,
    pub archetype: Archetype,
    pub patterns: Vec<StressPattern>,
}

impl Report {
    pub fn new(score: &ScoreResult) -> Self {
        Self {
            score: score.clone(),
            archetype: Archetype::classify(score),
            patterns: StressPattern::detect(score),
        }
    }

    pub fn recommendations(&self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.score.pss > 20 {
            lines.push("Consider stress management techniques (meditation, therapy)");
            lines.push("Practice daily stress-reduction activities");
        }
        if self.score.economic < 15 {
            lines.push("Explore financial assistance resources");
            lines.push("Consider financial counseling services");
            lines.push(
                "Remember: Economic stress impacts mental health - be gentle with yourself",
            );
        }
        if self.score.life_events > 200 {
            lines.push("Allow extra time for adjustment and processing");
            lines.push("Increase social support during this transition period");
        }
        lines.push("Remember: Your responses to stress are normal and adaptive");
        lines.push("Consider professional support if stress feels overwhelming");
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = &self.score;
        writeln!(f, "ARCHETYPE: {}", self.archetype.name())?;
        writeln!(f, "{}", self.archetype.description())?;
        writeln!(f, "{}", self.archetype.primary_insight())?;

        if !self.patterns.is_empty() {
            writeln!(f)?;
            writeln!(f, "DEEPER PATTERNS")?;
            for pattern in &self.patterns {
                writeln!(f, "  {}:", pattern.title())?;
                writeln!(f, "    {}", pattern.insight())?;
                writeln!(f, "    {}", pattern.validation())?;
            }
        }

        writeln!(f)?;
        writeln!(f, "ASSESSMENT")?;
        writeln!(
            f,
            "  Perceived stress: {}/40 ({})",
            score.pss,
            score.pss_band()
        )?;
        writeln!(
            f,
            "  Life events: {} ({})",
            score.life_events,
            score.life_event_band()
        )?;
        writeln!(
            f,
            "  Economic pressure: {:.0}% ({})",
            score.economic_pressure,
            score.economic_band()
        )?;

        writeln!(f)?;
        writeln!(f, "RECOMMENDATIONS")?;
        for line in self.recommendations() {
            writeln!(f, "  - {}", line)?;
        }
        Ok(())
    }
}
