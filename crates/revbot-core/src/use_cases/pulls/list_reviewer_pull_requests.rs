use async_trait::async_trait;
use revbot_models::PullRequestSummary;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

/// Lists the pull requests a user is currently assigned to, newest first.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListReviewerPullRequestsInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
    ) -> Result<Vec<PullRequestSummary>>;
}

#[derive(Component)]
#[shaku(interface = ListReviewerPullRequestsInterface)]
pub(crate) struct ListReviewerPullRequests;

#[async_trait]
impl ListReviewerPullRequestsInterface for ListReviewerPullRequests {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
    ) -> Result<Vec<PullRequestSummary>> {
        if user_id.is_empty() {
            return Err(DomainError::EmptyField { field: "user_id" });
        }

        ctx.db_service
            .users_get(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.into()))?;

        Ok(ctx
            .db_service
            .pull_requests_list_for_reviewer(user_id)
            .await?)
    }
}
