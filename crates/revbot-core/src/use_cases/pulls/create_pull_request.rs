use async_trait::async_trait;
use revbot_database_interface::DatabaseError;
use revbot_models::PullRequest;
use shaku::{Component, HasComponent, Interface};

use crate::{
    use_cases::reviewers::AssignReviewersInterface, CoreContext, DomainError, Result,
};

/// Creates a pull request with its initial reviewer set. The pull request
/// row and its reviewer rows are persisted as one atomic unit.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if pull_request_id.is_empty() {
            return Err(DomainError::EmptyField {
                field: "pull_request_id",
            });
        }
        if title.is_empty() {
            return Err(DomainError::EmptyField { field: "title" });
        }
        if author_id.is_empty() {
            return Err(DomainError::EmptyField { field: "author_id" });
        }

        let assign_reviewers: &dyn AssignReviewersInterface = ctx.core_module.resolve_ref();
        let reviewers = assign_reviewers.run(ctx, author_id).await?;

        let pr = PullRequest {
            id: pull_request_id.into(),
            title: title.into(),
            author_id: author_id.into(),
            reviewers,
            ..Default::default()
        };

        match ctx.db_service.pull_requests_create(pr).await {
            Ok(created) => Ok(created),
            Err(DatabaseError::PullRequestAlreadyExists(id)) => {
                Err(DomainError::PullRequestAlreadyExists(id))
            }
            Err(e) => Err(e.into()),
        }
    }
}
