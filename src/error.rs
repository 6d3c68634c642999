use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Submitted before every question was answered.
    #[error("{} question(s) left unanswered: {missing:?}", .missing.len())]
    IncompleteInput { missing: Vec<u32> },

    /// Option index, Likert value or count outside the question's range.
    #[error("answer {value} is out of range for question {question}")]
    InvalidAnswerValue { question: u32, value: u8 },

    #[error("answer {text:?} to question {question} is not a number")]
    UnparsableAnswer { question: u32, text: String },

    #[error("question {0} does not exist")]
    UnknownQuestion(u32),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed answer sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("snapshot encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
