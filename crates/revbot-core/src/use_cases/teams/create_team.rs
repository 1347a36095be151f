use std::collections::HashSet;

use async_trait::async_trait;
use revbot_database_interface::DatabaseError;
use revbot_models::Team;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

/// Creates a team and upserts its members as one atomic unit.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = CreateTeamInterface)]
pub(crate) struct CreateTeam;

#[async_trait]
impl CreateTeamInterface for CreateTeam {
    #[tracing::instrument(skip(self, ctx, team), fields(team_name = team.name), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team: Team) -> Result<Team> {
        if team.name.is_empty() {
            return Err(DomainError::EmptyField { field: "team_name" });
        }
        if team.members.is_empty() {
            return Err(DomainError::NoTeamMembers);
        }

        for (index, member) in team.members.iter().enumerate() {
            if member.id.is_empty() {
                return Err(DomainError::EmptyTeamMemberField {
                    index,
                    field: "user_id",
                });
            }
            if member.username.is_empty() {
                return Err(DomainError::EmptyTeamMemberField {
                    index,
                    field: "username",
                });
            }
        }

        let mut seen = HashSet::new();
        for member in &team.members {
            if !seen.insert(member.id.as_str()) {
                return Err(DomainError::DuplicateTeamMember {
                    user_id: member.id.clone(),
                });
            }
        }

        match ctx.db_service.teams_create(team).await {
            Ok(created) => Ok(created),
            Err(DatabaseError::TeamAlreadyExists(name)) => Err(DomainError::TeamAlreadyExists(name)),
            Err(e) => Err(e.into()),
        }
    }
}
