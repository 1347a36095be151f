use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Team '{0}' already exists")]
    TeamAlreadyExists(String),

    #[error("Pull request '{0}' already exists")]
    PullRequestAlreadyExists(String),

    #[error("Reviewer '{reviewer_id}' is not assigned to pull request '{pull_request_id}'")]
    ReviewerNotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
