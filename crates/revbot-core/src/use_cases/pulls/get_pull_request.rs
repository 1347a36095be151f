use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetPullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = GetPullRequestInterface)]
pub(crate) struct GetPullRequest;

#[async_trait]
impl GetPullRequestInterface for GetPullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        if pull_request_id.is_empty() {
            return Err(DomainError::EmptyField {
                field: "pull_request_id",
            });
        }

        ctx.db_service
            .pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DomainError::PullRequestNotFound(pull_request_id.into()))
    }
}

#[cfg(test)]
mod tests {
    use revbot_database_interface::DbService;
    use revbot_models::{PullRequest, Team, TeamMember};

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn unknown_pull_request() {
        let ctx = CoreContextTest::new();

        let result = GetPullRequest.run(&ctx.as_context(), "pr-1").await;
        assert!(matches!(result, Err(DomainError::PullRequestNotFound(id)) if id == "pr-1"));
    }

    #[tokio::test]
    async fn existing_pull_request() {
        let ctx = CoreContextTest::new();
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

        let pr = GetPullRequest.run(&ctx.as_context(), "pr-1").await.unwrap();
        assert_eq!(pr.id, "pr-1");
        assert_eq!(pr.title, "Add widget");
    }
}
