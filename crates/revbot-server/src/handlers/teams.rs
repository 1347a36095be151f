//! Team handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::teams::{CreateTeamInterface, GetTeamInterface};
use revbot_models::Team;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[tracing::instrument(skip_all, fields(team_name = data.name))]
pub(crate) async fn create_team(
    ctx: web::Data<AppContext>,
    data: web::Json<Team>,
) -> Result<HttpResponse> {
    let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
    let team = create_team
        .run(&ctx.as_core_context(), data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": team })))
}

#[tracing::instrument(skip_all, fields(team_name = %path))]
pub(crate) async fn get_team(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = get_team.run(&ctx.as_core_context(), &path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "team": team })))
}
