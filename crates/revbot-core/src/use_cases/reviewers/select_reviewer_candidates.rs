use async_trait::async_trait;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use revbot_config::Config;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

/// Shared candidate selection for assignment and reassignment: both engines
/// filter and draw through this one component so the exclusion semantics
/// cannot drift apart.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SelectReviewerCandidatesInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        excluded_ids: &[String],
        count: usize,
    ) -> Result<Vec<String>>;
}

#[derive(Component)]
#[shaku(interface = SelectReviewerCandidatesInterface)]
pub(crate) struct SelectReviewerCandidates;

#[async_trait]
impl SelectReviewerCandidatesInterface for SelectReviewerCandidates {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        excluded_ids: &[String],
        count: usize,
    ) -> Result<Vec<String>> {
        let mut candidates = ctx
            .db_service
            .users_active_in_team(team_name, excluded_ids)
            .await?;

        // Full permutation rather than positional sampling: the directory's
        // ordering must not bias who gets picked.
        candidates.shuffle(&mut Self::build_rng(ctx.config));
        candidates.truncate(count);

        Ok(candidates)
    }
}

impl SelectReviewerCandidates {
    fn build_rng(config: &Config) -> ChaCha8Rng {
        match config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use revbot_database_interface::DbService;
    use revbot_models::{Team, TeamMember};

    use super::*;
    use crate::context::tests::CoreContextTest;

    async fn seed_team(ctx: &CoreContextTest, name: &str, member_ids: &[&str]) {
        ctx.db_service
            .teams_create(Team {
                name: name.into(),
                members: member_ids
                    .iter()
                    .map(|id| TeamMember {
                        id: (*id).into(),
                        username: (*id).into(),
                        is_active: true,
                    })
                    .collect(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn excluded_ids_never_selected() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx, "backend", &["u30", "u31", "u32", "u33", "u34"]).await;

        let candidates = SelectReviewerCandidates
            .run(
                &ctx.as_context(),
                "backend",
                &["u30".into(), "u31".into()],
                5,
            )
            .await
            .unwrap();

        let mut sorted = candidates.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["u32", "u33", "u34"]);
    }

    #[tokio::test]
    async fn count_caps_the_draw() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx, "backend", &["u30", "u31", "u32", "u33", "u34"]).await;

        let candidates = SelectReviewerCandidates
            .run(&ctx.as_context(), "backend", &["u30".into()], 2)
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert!(!candidates.contains(&"u30".into()));
        assert_ne!(candidates[0], candidates[1]);
    }

    #[tokio::test]
    async fn inactive_members_are_not_candidates() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx, "backend", &["u30", "u31", "u32"]).await;
        ctx.db_service
            .users_set_is_active("u31", false)
            .await
            .unwrap();

        let candidates = SelectReviewerCandidates
            .run(&ctx.as_context(), "backend", &["u30".into()], 2)
            .await
            .unwrap();

        assert_eq!(candidates, vec!["u32"]);
    }

    #[tokio::test]
    async fn empty_pool_yields_empty_draw() {
        let ctx = CoreContextTest::new();
        seed_team(&ctx, "solo", &["u30"]).await;

        let candidates = SelectReviewerCandidates
            .run(&ctx.as_context(), "solo", &["u30".into()], 2)
            .await
            .unwrap();

        assert_eq!(candidates, Vec::<String>::new());
    }

    #[tokio::test]
    async fn fixed_seed_is_deterministic() {
        let mut ctx = CoreContextTest::new();
        ctx.config.random_seed = Some(1);
        seed_team(&ctx, "backend", &["u30", "u31", "u32", "u33", "u34"]).await;

        let first = SelectReviewerCandidates
            .run(&ctx.as_context(), "backend", &["u30".into()], 2)
            .await
            .unwrap();
        let second = SelectReviewerCandidates
            .run(&ctx.as_context(), "backend", &["u30".into()], 2)
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
