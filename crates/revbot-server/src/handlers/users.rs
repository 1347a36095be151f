//! User handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::{
    pulls::ListReviewerPullRequestsInterface, users::SetUserActiveInterface,
};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SetUserActiveJson {
    user_id: String,
    is_active: bool,
}

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
pub(crate) async fn set_user_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetUserActiveJson>,
) -> Result<HttpResponse> {
    let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
    let user = set_user_active
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}

#[tracing::instrument(skip_all, fields(user_id = %path))]
pub(crate) async fn list_review_requests(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let list_pull_requests: &dyn ListReviewerPullRequestsInterface = ctx.core_module.resolve_ref();
    let pull_requests = list_pull_requests
        .run(&ctx.as_core_context(), &path)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": path.into_inner(),
        "pull_requests": pull_requests,
    })))
}
