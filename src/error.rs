pub type RaceChartResult<T> = Result<T, RaceChartError>;

/// Which step of loading the dataset gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LoadStage {
    Transport,
    Status,
    Read,
    Parse,
    Validate,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Read => "read",
            Self::Parse => "parse",
            Self::Validate => "validate",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RaceChartError {
    #[error("load failure ({stage}) for '{source_uri}': {message}")]
    LoadFailure {
        stage: LoadStage,
        source_uri: String,
        message: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaceChartError {
    pub fn load(stage: LoadStage, source_uri: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::LoadFailure {
            stage,
            source_uri: source_uri.into(),
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::LoadFailure { .. })
    }
}
