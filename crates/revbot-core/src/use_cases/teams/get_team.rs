use async_trait::async_trait;
use revbot_models::Team;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = GetTeamInterface)]
pub(crate) struct GetTeam;

#[async_trait]
impl GetTeamInterface for GetTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team> {
        if team_name.is_empty() {
            return Err(DomainError::EmptyField { field: "team_name" });
        }

        ctx.db_service
            .teams_get(team_name)
            .await?
            .ok_or_else(|| DomainError::TeamNotFound(team_name.into()))
    }
}

#[cfg(test)]
mod tests {
    use revbot_database_interface::DbService;
    use revbot_models::TeamMember;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn unknown_team() {
        let ctx = CoreContextTest::new();

        let result = GetTeam.run(&ctx.as_context(), "backend").await;
        assert!(matches!(result, Err(DomainError::TeamNotFound(name)) if name == "backend"));
    }

    #[tokio::test]
    async fn existing_team() {
        let ctx = CoreContextTest::new();
        ctx.db_service
            .teams_create(Team {
                name: "backend".into(),
                members: vec![TeamMember {
                    id: "u30".into(),
                    username: "alice".into(),
                    is_active: true,
                }],
            })
            .await
            .unwrap();

        let team = GetTeam.run(&ctx.as_context(), "backend").await.unwrap();
        assert_eq!(team.name, "backend");
        assert_eq!(team.members.len(), 1);
    }
}
