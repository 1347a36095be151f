//! Server module.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error,
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use revbot_config::Config;
use revbot_core::{CoreContext, CoreModule};
use revbot_database_interface::DbService;
use tracing::info;

use crate::{
    handlers::{
        pulls::{create_pull_request, get_pull_request, merge_pull_request, reassign_reviewer},
        stats::review_assignments,
        teams::{create_team, get_team},
        users::{list_review_requests, set_user_active},
    },
    health::health_check_route,
    Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Core module.
    pub core_module: CoreModule,
    /// Database adapter.
    pub db_service: Box<dyn DbService>,
}

impl AppContext {
    /// Create new app context.
    pub fn new(config: Config, core_module: CoreModule, db_service: Box<dyn DbService>) -> Self {
        Self {
            config,
            core_module,
            db_service,
        }
    }

    /// Convert the context for the core module.
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            db_service: self.db_service.as_ref(),
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(context.clone())
        .wrap(Logger::default())
        .service(
            web::scope("/teams")
                .route("", web::post().to(create_team))
                .route("/{team_name}", web::get().to(get_team)),
        )
        .service(
            web::scope("/users")
                .route("/set-is-active", web::post().to(set_user_active))
                .route("/{user_id}/review-requests", web::get().to(list_review_requests)),
        )
        .service(
            web::scope("/pull-requests")
                .route("", web::post().to(create_pull_request))
                .route("/{pull_request_id}", web::get().to(get_pull_request))
                .route("/{pull_request_id}/merge", web::post().to(merge_pull_request))
                .route(
                    "/{pull_request_id}/reassign",
                    web::post().to(reassign_reviewer),
                ),
        )
        .service(
            web::scope("/stats").route("/review-assignments", web::get().to(review_assignments)),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on revbot!" }))
            }),
        )
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            // Display Bad Request response on invalid JSON data
            error::InternalError::from_response(
                "",
                HttpResponse::BadRequest().json(serde_json::json!({
                    "error": {
                        "code": "INVALID_JSON",
                        "message": err.to_string(),
                    }
                })),
            )
            .into()
        }))
}

/// Run server.
pub async fn run_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting server",
    );

    run_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();

    let mut server = HttpServer::new(move || build_actix_app(context.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}
