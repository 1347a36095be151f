use std::collections::HashMap;

use async_trait::async_trait;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

/// Current number of assignment rows per reviewer, across all pull requests.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReviewAssignmentCountsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<HashMap<String, u64>>;
}

#[derive(Component)]
#[shaku(interface = ReviewAssignmentCountsInterface)]
pub(crate) struct ReviewAssignmentCounts;

#[async_trait]
impl ReviewAssignmentCountsInterface for ReviewAssignmentCounts {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<HashMap<String, u64>> {
        Ok(ctx.db_service.review_assignment_counts().await?)
    }
}
