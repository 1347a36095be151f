//! Stats handlers.

use actix_web::{web, HttpResponse};
use revbot_core::use_cases::stats::ReviewAssignmentCountsInterface;
use shaku::HasComponent;

use crate::{server::AppContext, Result};

#[tracing::instrument(skip_all)]
pub(crate) async fn review_assignments(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let review_assignment_counts: &dyn ReviewAssignmentCountsInterface =
        ctx.core_module.resolve_ref();
    let counts = review_assignment_counts.run(&ctx.as_core_context()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "review_assignments": counts })))
}

#[cfg(test)]
mod tests {
    use actix_http::StatusCode;
    use actix_web::test;
    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;
    use revbot_models::{PullRequest, Team, TeamMember};

    use crate::{handlers::test_utils::build_test_context, server::build_actix_app};

    #[actix_web::test]
    async fn assignment_counts() {
        let ctx = build_test_context();
        ctx.db_service
            .teams_create(Team {
                name: "backend".into(),
                members: ["u30", "u31", "u32"]
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
        ctx.db_service
            .pull_requests_create(PullRequest {
                id: "pr-1".into(),
                title: "Add widget".into(),
                author_id: "u30".into(),
                reviewers: vec!["u31".into(), "u32".into()],
                ..Default::default()
            })
            .await
            .unwrap();
        let app = test::init_service(build_actix_app(ctx)).await;

        let req = test::TestRequest::get()
            .uri("/stats/review-assignments")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["review_assignments"]["u31"], 1);
        assert_eq!(body["review_assignments"]["u32"], 1);
    }
}
