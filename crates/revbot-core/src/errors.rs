//! Logic errors.

use revbot_database_interface::DatabaseError;
use thiserror::Error;

/// Logic error.
///
/// Every variant maps to a stable symbolic code through [`DomainError::code`],
/// so callers branch on tags, never on message content.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Team must have at least one member")]
    NoTeamMembers,

    #[error("Team member at index {index} has an empty {field}")]
    EmptyTeamMemberField { index: usize, field: &'static str },

    #[error("Duplicate team member '{user_id}'")]
    DuplicateTeamMember { user_id: String },

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Team '{0}' not found")]
    TeamNotFound(String),

    #[error("Pull request '{0}' not found")]
    PullRequestNotFound(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Pull request '{0}' is already merged")]
    PullRequestAlreadyMerged(String),

    #[error("Reviewer '{reviewer_id}' is not assigned to pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error("No eligible replacement candidate for pull request '{pull_request_id}'")]
    NoReviewerCandidate { pull_request_id: String },

    /// Wraps [`revbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError { source: DatabaseError },
}

impl DomainError {
    /// Stable symbolic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. }
            | Self::NoTeamMembers
            | Self::EmptyTeamMemberField { .. }
            | Self::DuplicateTeamMember { .. } => "BAD_REQUEST",
            Self::UserNotFound(_) | Self::TeamNotFound(_) | Self::PullRequestNotFound(_) => {
                "NOT_FOUND"
            }
            Self::TeamAlreadyExists(_) => "TEAM_EXISTS",
            Self::PullRequestAlreadyExists(_) => "PR_EXISTS",
            Self::PullRequestAlreadyMerged(_) => "PR_MERGED",
            Self::ReviewerNotAssigned { .. } => "NOT_ASSIGNED",
            Self::NoReviewerCandidate { .. } => "NO_CANDIDATE",
            Self::DatabaseError { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        Self::DatabaseError { source: e }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
