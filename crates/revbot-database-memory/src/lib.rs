use std::{
    collections::{HashMap, HashSet},
    sync::RwLock,
};

use async_trait::async_trait;
use revbot_database_interface::{DatabaseError, DbService, Result};
use revbot_models::{PullRequest, PullRequestStatus, PullRequestSummary, Team, TeamMember, User};
use time::OffsetDateTime;

#[derive(Debug, Default)]
pub struct MemoryDb {
    teams: RwLock<HashSet<String>>,
    users: RwLock<HashMap<String, User>>,
    pull_requests: RwLock<HashMap<String, PullRequest>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn teams_create(&self, instance: Team) -> Result<Team> {
        {
            let mut teams = self.teams.write().unwrap();
            if teams.contains(&instance.name) {
                return Err(DatabaseError::TeamAlreadyExists(instance.name));
            }
            teams.insert(instance.name.clone());

            // Members are upserted, matching the SQL ON CONFLICT behavior.
            let mut users = self.users.write().unwrap();
            for member in &instance.members {
                users.insert(
                    member.id.clone(),
                    User {
                        id: member.id.clone(),
                        username: member.username.clone(),
                        team_name: instance.name.clone(),
                        is_active: member.is_active,
                    },
                );
            }
        }

        self.teams_get_expect(&instance.name).await
    }

    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        if !self.teams.read().unwrap().contains(name) {
            return Ok(None);
        }

        let mut members: Vec<TeamMember> = self
            .users
            .read()
            .unwrap()
            .values()
            .filter(|u| u.team_name == name)
            .map(|u| TeamMember {
                id: u.id.clone(),
                username: u.username.clone(),
                is_active: u.is_active,
            })
            .collect();
        members.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(Some(Team {
            name: name.into(),
            members,
        }))
    }

    async fn users_get(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User> {
        let mut users = self.users.write().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownUser(id.into()))?;
        user.is_active = value;
        Ok(user.clone())
    }

    async fn users_active_in_team(
        &self,
        team_name: &str,
        excluded_ids: &[String],
    ) -> Result<Vec<String>> {
        let mut values: Vec<String> = self
            .users
            .read()
            .unwrap()
            .values()
            .filter(|u| u.team_name == team_name && u.is_active)
            .filter(|u| !excluded_ids.contains(&u.id))
            .map(|u| u.id.clone())
            .collect();
        values.sort();
        Ok(values)
    }

    async fn pull_requests_create(&self, mut instance: PullRequest) -> Result<PullRequest> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        if pull_requests.contains_key(&instance.id) {
            return Err(DatabaseError::PullRequestAlreadyExists(instance.id));
        }

        instance.created_at = Some(OffsetDateTime::now_utc());
        pull_requests.insert(instance.id.clone(), instance.clone());
        Ok(instance)
    }

    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
        Ok(self.pull_requests.read().unwrap().get(id).cloned())
    }

    async fn pull_requests_merge(&self, id: &str) -> Result<PullRequest> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        let pr = pull_requests
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(id.into()))?;

        // Only rows still open transition, so the timestamp is written once.
        if pr.status == PullRequestStatus::Open {
            pr.status = PullRequestStatus::Merged;
            pr.merged_at = Some(OffsetDateTime::now_utc());
        }

        Ok(pr.clone())
    }

    async fn pull_requests_swap_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        // Single write lock: the delete + insert pair is one atomic unit.
        let mut pull_requests = self.pull_requests.write().unwrap();
        let pr = pull_requests
            .get_mut(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;

        let position = pr
            .reviewers
            .iter()
            .position(|r| r == old_reviewer_id)
            .ok_or_else(|| DatabaseError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                reviewer_id: old_reviewer_id.into(),
            })?;

        pr.reviewers.remove(position);
        pr.reviewers.push(new_reviewer_id.into());
        Ok(())
    }

    async fn pull_requests_list_for_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<PullRequestSummary>> {
        let mut values: Vec<PullRequestSummary> = self
            .pull_requests
            .read()
            .unwrap()
            .values()
            .filter(|pr| pr.reviewers.iter().any(|r| r == reviewer_id))
            .map(|pr| PullRequestSummary {
                id: pr.id.clone(),
                title: pr.title.clone(),
                author_id: pr.author_id.clone(),
                status: pr.status,
                created_at: pr.created_at,
            })
            .collect();
        values.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(values)
    }

    async fn review_assignment_counts(&self) -> Result<HashMap<String, u64>> {
        let mut counts = HashMap::new();
        for pr in self.pull_requests.read().unwrap().values() {
            for reviewer in &pr.reviewers {
                *counts.entry(reviewer.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
