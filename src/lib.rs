pub mod animation;
pub mod answer;
pub mod app;
pub mod archetype;
pub mod bulk;
pub mod color;
pub mod config;
mod error;
pub mod particle;
pub mod pattern;
pub mod questions;
pub mod report;
pub mod scene;
pub mod score;
pub mod snapshot;
pub mod visual;

pub use animation::{Controller, State};
pub use answer::AnswerStore;
pub use archetype::Archetype;
pub use bulk::read_bulk;
pub use config::Config;
pub use error::Error;
pub use pattern::StressPattern;
pub use questions::{QuestionKind, ScaleId, QUESTIONS};
pub use report::Report;
pub use score::ScoreResult;
pub use visual::VisualParameters;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `MOODSTONE_LOG` overrides the default `info`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("MOODSTONE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
