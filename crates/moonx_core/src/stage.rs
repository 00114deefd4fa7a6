//! Forward-only progress marker for a single run.

use serde::{Deserialize, Serialize};

/// Where a run currently stands.
///
/// Stages only move forward; `Failed` is terminal and reachable from any
/// stage. There is no edge back to an earlier stage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum RunStage {
    /// Nothing done yet
    #[display("INIT")]
    Init,
    /// Astronomy payload received and audited
    #[display("FETCHED")]
    Fetched,
    /// Phase code mapped to its display string
    #[display("TRANSLATED")]
    Translated,
    /// Log table reachable and reply target known
    #[display("DB_CONNECTED")]
    DbConnected,
    /// Remote post created
    #[display("POSTED")]
    Posted,
    /// Log row committed
    #[display("LOGGED")]
    Logged,
    /// Run finished
    #[display("DONE")]
    Done,
    /// Run aborted
    #[display("FAILED")]
    Failed,
}

impl RunStage {
    /// The stage that follows this one on the success path.
    ///
    /// Terminal stages return themselves.
    pub fn next(self) -> Self {
        match self {
            Self::Init => Self::Fetched,
            Self::Fetched => Self::Translated,
            Self::Translated => Self::DbConnected,
            Self::DbConnected => Self::Posted,
            Self::Posted => Self::Logged,
            Self::Logged => Self::Done,
            Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    /// Whether the remote post already exists at this stage.
    pub fn is_post_live(self) -> bool {
        matches!(self, Self::Posted | Self::Logged | Self::Done)
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}
