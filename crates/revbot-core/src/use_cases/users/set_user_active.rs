use async_trait::async_trait;
use revbot_models::User;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

/// Toggles a user's active flag. Deactivation does not touch existing
/// reviewer assignments; those change only through explicit reassignment.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SetUserActiveInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str, is_active: bool) -> Result<User>;
}

#[derive(Component)]
#[shaku(interface = SetUserActiveInterface)]
pub(crate) struct SetUserActive;

#[async_trait]
impl SetUserActiveInterface for SetUserActive {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str, is_active: bool) -> Result<User> {
        if user_id.is_empty() {
            return Err(DomainError::EmptyField { field: "user_id" });
        }

        ctx.db_service
            .users_get(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.into()))?;

        Ok(ctx.db_service.users_set_is_active(user_id, is_active).await?)
    }
}
