//! Pull request handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::{
    pulls::{CreatePullRequestInterface, GetPullRequestInterface, MergePullRequestInterface},
    reviewers::ReassignReviewerInterface,
};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreatePullRequestJson {
    pull_request_id: String,
    title: String,
    author_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReassignReviewerJson {
    old_reviewer_id: String,
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    author_id = data.author_id,
))]
pub(crate) async fn create_pull_request(
    ctx: web::Data<AppContext>,
    data: web::Json<CreatePullRequestJson>,
) -> Result<HttpResponse> {
    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = create_pull_request
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.title,
            &data.author_id,
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "pull_request": pr })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = %path))]
pub(crate) async fn get_pull_request(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let get_pull_request: &dyn GetPullRequestInterface = ctx.core_module.resolve_ref();
    let pr = get_pull_request
        .run(&ctx.as_core_context(), &path)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "pull_request": pr })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = %path))]
pub(crate) async fn merge_pull_request(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = merge_pull_request
        .run(&ctx.as_core_context(), &path)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "pull_request": pr })))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = %path,
    old_reviewer_id = data.old_reviewer_id,
))]
pub(crate) async fn reassign_reviewer(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    data: web::Json<ReassignReviewerJson>,
) -> Result<HttpResponse> {
    let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
    let new_reviewer_id = reassign_reviewer
        .run(&ctx.as_core_context(), &path, &data.old_reviewer_id)
        .await?;

    // Re-fetch so the response reflects the committed swap.
    let get_pull_request: &dyn GetPullRequestInterface = ctx.core_module.resolve_ref();
    let pr = get_pull_request
        .run(&ctx.as_core_context(), &path)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "pull_request": pr,
        "replaced_by": new_reviewer_id,
    })))
}
