use std::collections::HashMap;

use async_trait::async_trait;
use revbot_database_interface::{DatabaseError, DbService, Result};
use revbot_models::{PullRequest, PullRequestSummary, Team, User};
use sqlx::{PgPool, Row};

use crate::row::{PullRequestRow, PullRequestSummaryRow, TeamMemberRow, UserRow};

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_row_not_found(e: sqlx::Error, target: DatabaseError) -> DatabaseError {
        if let sqlx::Error::RowNotFound = e {
            target
        } else {
            DatabaseError::ImplementationError { source: e.into() }
        }
    }

    fn wrap_unknown_user(e: sqlx::Error, id: &str) -> DatabaseError {
        Self::wrap_row_not_found(e, DatabaseError::UnknownUser(id.into()))
    }

    async fn reviewers_for_pull_request(&self, pull_request_id: &str) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT reviewer_id
            FROM pr_reviewers
            WHERE pull_request_id = $1
            ORDER BY assigned_at, id
        "#,
        )
        .bind(pull_request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, instance: Team) -> Result<Team> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = $1)")
                .bind(&instance.name)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        if exists {
            return Err(DatabaseError::TeamAlreadyExists(instance.name));
        }

        sqlx::query("INSERT INTO teams (team_name) VALUES ($1)")
            .bind(&instance.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        for member in &instance.members {
            sqlx::query(
                r#"
                INSERT INTO users (user_id, username, team_name, is_active)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id) DO UPDATE SET
                    username = EXCLUDED.username,
                    team_name = EXCLUDED.team_name,
                    is_active = EXCLUDED.is_active,
                    updated_at = CURRENT_TIMESTAMP
            "#,
            )
            .bind(&member.id)
            .bind(&member.username)
            .bind(&instance.name)
            .bind(member.is_active)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        self.teams_get_expect(&instance.name).await
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get(&self, name: &str) -> Result<Option<Team>> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE team_name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        if !exists {
            return Ok(None);
        }

        let members = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT user_id, username, is_active
            FROM users
            WHERE team_name = $1
            ORDER BY username
        "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(Some(Team {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }))
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, team_name, is_active
            FROM users
            WHERE user_id = $1
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_set_is_active(&self, id: &str, value: bool) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING user_id, username, team_name, is_active
        "#,
        )
        .bind(id)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::wrap_unknown_user(e, id))?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn users_active_in_team(
        &self,
        team_name: &str,
        excluded_ids: &[String],
    ) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT user_id
            FROM users
            WHERE team_name = $1
            AND is_active = TRUE
            AND user_id <> ALL($2)
        "#,
        )
        .bind(team_name)
        .bind(excluded_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM pull_requests WHERE pull_request_id = $1)",
        )
        .bind(&instance.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        if exists {
            return Err(DatabaseError::PullRequestAlreadyExists(instance.id));
        }

        sqlx::query(
            r#"
            INSERT INTO pull_requests (pull_request_id, title, author_id, status)
            VALUES ($1, $2, $3, $4)
        "#,
        )
        .bind(&instance.id)
        .bind(&instance.title)
        .bind(&instance.author_id)
        .bind(instance.status.to_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        for reviewer_id in &instance.reviewers {
            sqlx::query(
                r#"
                INSERT INTO pr_reviewers (pull_request_id, reviewer_id)
                VALUES ($1, $2)
            "#,
            )
            .bind(&instance.id)
            .bind(reviewer_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        self.pull_requests_get_expect(&instance.id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(
            r#"
            SELECT pull_request_id, title, author_id, status, created_at, merged_at
            FROM pull_requests
            WHERE pull_request_id = $1
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        match row {
            None => Ok(None),
            Some(row) => {
                let mut pr: PullRequest = row.into();
                pr.reviewers = self.reviewers_for_pull_request(id).await?;
                Ok(Some(pr))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_merge(&self, id: &str) -> Result<PullRequest> {
        sqlx::query(
            r#"
            UPDATE pull_requests
            SET status = 'MERGED', merged_at = CURRENT_TIMESTAMP
            WHERE pull_request_id = $1 AND status = 'OPEN'
        "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        self.pull_requests_get_expect(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_swap_reviewer(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
        new_reviewer_id: &str,
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        let result = sqlx::query(
            r#"
            DELETE FROM pr_reviewers
            WHERE pull_request_id = $1 AND reviewer_id = $2
        "#,
        )
        .bind(pull_request_id)
        .bind(old_reviewer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        // Losing the race against a concurrent swap surfaces here, before
        // anything is inserted. Dropping the transaction rolls back.
        if result.rows_affected() == 0 {
            return Err(DatabaseError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                reviewer_id: old_reviewer_id.into(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO pr_reviewers (pull_request_id, reviewer_id)
            VALUES ($1, $2)
        "#,
        )
        .bind(pull_request_id)
        .bind(new_reviewer_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_for_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<PullRequestSummary>> {
        let rows = sqlx::query_as::<_, PullRequestSummaryRow>(
            r#"
            SELECT DISTINCT p.pull_request_id, p.title, p.author_id, p.status, p.created_at
            FROM pull_requests p
            INNER JOIN pr_reviewers r ON p.pull_request_id = r.pull_request_id
            WHERE r.reviewer_id = $1
            ORDER BY p.created_at DESC
        "#,
        )
        .bind(reviewer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn review_assignment_counts(&self) -> Result<HashMap<String, u64>> {
        let rows = sqlx::query(
            r#"
            SELECT reviewer_id, COUNT(*) AS assignments
            FROM pr_reviewers
            GROUP BY reviewer_id
        "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;

        let mut counts = HashMap::with_capacity(rows.len());
        for row in rows {
            let reviewer_id: String = row
                .try_get("reviewer_id")
                .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;
            let assignments: i64 = row
                .try_get("assignments")
                .map_err(|e| DatabaseError::ImplementationError { source: e.into() })?;
            counts.insert(reviewer_id, assignments as u64);
        }

        Ok(counts)
    }
}
