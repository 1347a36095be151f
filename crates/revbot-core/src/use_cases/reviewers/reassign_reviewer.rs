use async_trait::async_trait;
use revbot_database_interface::DatabaseError;
use revbot_models::PullRequestStatus;
use shaku::{Component, HasComponent, Interface};

use super::select_reviewer_candidates::SelectReviewerCandidatesInterface;
use crate::{CoreContext, DomainError, Result};

/// Replaces one assigned reviewer with a uniformly drawn teammate. The
/// replacement pool excludes the pull request author and every currently
/// assigned reviewer, including the one being replaced.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<String>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> Result<String> {
        if pull_request_id.is_empty() {
            return Err(DomainError::EmptyField {
                field: "pull_request_id",
            });
        }
        if old_reviewer_id.is_empty() {
            return Err(DomainError::EmptyField {
                field: "old_reviewer_id",
            });
        }

        let pr = ctx
            .db_service
            .pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DomainError::PullRequestNotFound(pull_request_id.into()))?;

        if pr.status == PullRequestStatus::Merged {
            return Err(DomainError::PullRequestAlreadyMerged(pr.id));
        }

        if !pr.reviewers.iter().any(|r| r == old_reviewer_id) {
            return Err(DomainError::ReviewerNotAssigned {
                pull_request_id: pr.id,
                reviewer_id: old_reviewer_id.into(),
            });
        }

        let old_reviewer = ctx
            .db_service
            .users_get(old_reviewer_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(old_reviewer_id.into()))?;

        let mut excluded_ids = vec![pr.author_id.clone()];
        excluded_ids.extend(pr.reviewers.iter().cloned());

        let select_candidates: &dyn SelectReviewerCandidatesInterface =
            ctx.core_module.resolve_ref();
        let candidates = select_candidates
            .run(ctx, &old_reviewer.team_name, &excluded_ids, 1)
            .await?;

        let Some(new_reviewer_id) = candidates.into_iter().next() else {
            return Err(DomainError::NoReviewerCandidate {
                pull_request_id: pr.id,
            });
        };

        // The swap is one atomic unit in the store. Losing the race against a
        // concurrent reassignment of the same reviewer surfaces as
        // `ReviewerNotAssigned`; nothing was inserted and nobody retries.
        match ctx
            .db_service
            .pull_requests_swap_reviewer(pull_request_id, old_reviewer_id, &new_reviewer_id)
            .await
        {
            Ok(()) => Ok(new_reviewer_id),
            Err(DatabaseError::ReviewerNotAssigned {
                pull_request_id,
                reviewer_id,
            }) => Err(DomainError::ReviewerNotAssigned {
                pull_request_id,
                reviewer_id,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
