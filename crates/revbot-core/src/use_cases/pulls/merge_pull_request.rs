use async_trait::async_trait;
use revbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

/// Transitions a pull request from `OPEN` to `MERGED`. Merging an already
/// merged pull request is idempotent and keeps the original merge timestamp.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        if pull_request_id.is_empty() {
            return Err(DomainError::EmptyField {
                field: "pull_request_id",
            });
        }

        let pr = ctx
            .db_service
            .pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DomainError::PullRequestNotFound(pull_request_id.into()))?;

        if pr.status == PullRequestStatus::Merged {
            return Ok(pr);
        }

        Ok(ctx.db_service.pull_requests_merge(pull_request_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;
    use revbot_models::{PullRequest, Team, TeamMember};

    use super::*;
    use crate::context::tests::CoreContextTest;

    async fn seed_pull_request(ctx: &CoreContextTest) {
        ctx.db_service
            .teams_create(Team {
                name: "backend".into(),
                members: vec![TeamMember {
                    id: "u30".into(),
                    username: "u30".into(),
                    is_active: true,
                }],
            })
            .await
            .unwrap();
        ctx.db_service
            .pull_requests_create(PullRequest {
                id: "pr-1".into(),
                title: "Add widget".into(),
                author_id: "u30".into(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_pull_request() {
        let ctx = CoreContextTest::new();

        let result = MergePullRequest.run(&ctx.as_context(), "pr-1").await;
        assert!(matches!(result, Err(DomainError::PullRequestNotFound(id)) if id == "pr-1"));
    }

    #[tokio::test]
    async fn open_pull_request_is_merged() {
        let ctx = CoreContextTest::new();
        seed_pull_request(&ctx).await;

        let pr = MergePullRequest
            .run(&ctx.as_context(), "pr-1")
            .await
            .unwrap();

        assert_eq!(pr.status, PullRequestStatus::Merged);
        assert!(pr.merged_at.is_some());
    }

    #[tokio::test]
    async fn second_merge_is_idempotent() {
        let ctx = CoreContextTest::new();
        seed_pull_request(&ctx).await;

        let first = MergePullRequest
            .run(&ctx.as_context(), "pr-1")
            .await
            .unwrap();
        let second = MergePullRequest
            .run(&ctx.as_context(), "pr-1")
            .await
            .unwrap();

        assert_eq!(second.status, PullRequestStatus::Merged);
        assert_eq!(second.merged_at, first.merged_at);
    }
}
