use async_trait::async_trait;
use shaku::{Component, HasComponent, Interface};

use super::select_reviewer_candidates::SelectReviewerCandidatesInterface;
use crate::{CoreContext, DomainError, Result};

/// Picks the initial reviewer set for a pull request: a uniform draw from
/// the author's active teammates, author excluded.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait AssignReviewersInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, author_id: &str) -> Result<Vec<String>>;
}

#[derive(Component)]
#[shaku(interface = AssignReviewersInterface)]
pub(crate) struct AssignReviewers;

#[async_trait]
impl AssignReviewersInterface for AssignReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, author_id: &str) -> Result<Vec<String>> {
        let author = ctx
            .db_service
            .users_get(author_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(author_id.into()))?;

        let select_candidates: &dyn SelectReviewerCandidatesInterface =
            ctx.core_module.resolve_ref();

        // An empty draw is a valid outcome: a pull request may carry zero
        // reviewers when the author is the only active team member.
        select_candidates
            .run(
                ctx,
                &author.team_name,
                &[author_id.into()],
                ctx.config.max_assigned_reviewers,
            )
            .await
    }
}
