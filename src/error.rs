//! Error type shared across the pipeline.
//!
//! Every failure surfaces at the CLI boundary as a stage-labeled message and a
//! process exit code; nothing is retried or silently swallowed.

/// Pipeline error, tagged by the kind of failure.
#[derive(Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Bad year/month input or missing token; raised before any network call.
    Validation(String),
    /// The donation platform rejected the access token.
    Auth(String),
    /// The request could not complete, or the response was unusable.
    Network(String),
    /// Zero donations were recorded for the requested month (soft failure).
    EmptyMonth { year: i32, month: u32 },
    /// Chart rendering or PDF assembly failed.
    Render(String),
    /// The report could not be written to its destination.
    Io(String),
}

impl ReportError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Pipeline stage that produced the error, used as the message prefix.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validate",
            Self::Auth(_) | Self::Network(_) | Self::EmptyMonth { .. } => "fetch",
            Self::Render(_) => "render",
            Self::Io(_) => "write",
        }
    }

    /// Process exit code for the CLI boundary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Auth(_) => 3,
            Self::Network(_) => 4,
            Self::EmptyMonth { .. } => 5,
            Self::Render(_) => 6,
            Self::Io(_) => 7,
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg)
            | Self::Auth(msg)
            | Self::Network(msg)
            | Self::Render(msg)
            | Self::Io(msg) => write!(f, "{}: {msg}", self.stage()),
            Self::EmptyMonth { year, month } => write!(
                f,
                "{}: no donations recorded for {year}-{month:02}",
                self.stage()
            ),
        }
    }
}

impl std::fmt::Debug for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReportError({self})")
    }
}

impl std::error::Error for ReportError {}
