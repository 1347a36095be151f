use std::collections::HashMap;

use async_trait::async_trait;
use revbot_models::{PullRequest, PullRequestSummary, Team, User};

use crate::{DatabaseError, Result};

#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    /// Atomic team + member upserts. Fails if the team name is taken.
    async fn teams_create(&self, instance: Team) -> Result<Team>;
    async fn teams_get(&self, name: &str) -> Result<Option<Team>>;
    async fn teams_get_expect(&self, name: &str) -> Result<Team> {
        self.teams_get(name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(name.into()))
    }

    async fn users_get(&self, id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, id: &str) -> Result<User> {
        self.users_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))
    }
    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User>;
    /// Active members of a team, minus the exclusion set. Order is not
    /// guaranteed; callers shuffle or sort themselves.
    async fn users_active_in_team(
        &self,
        team_name: &str,
        excluded_ids: &[String],
    ) -> Result<Vec<String>>;

    /// Atomic insert of the pull request and its reviewer rows.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, id: &str) -> Result<PullRequest> {
        self.pull_requests_get(id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))
    }
    /// Conditional transition: only rows still `OPEN` are updated, so the
    /// merge timestamp is written at most once.
    async fn pull_requests_merge(&self, id: &str) -> Result<PullRequest>;
    /// Atomic delete + insert. Fails with `ReviewerNotAssigned` when the
    /// delete matches zero rows at commit time; nothing is inserted then.
    async fn pull_requests_swap_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()>;
    async fn pull_requests_list_for_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<PullRequestSummary>>;

    async fn review_assignment_counts(&self) -> Result<HashMap<String, u64>>;
}
