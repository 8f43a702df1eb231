//! Application assembly shared by the server binary and the integration
//! tests.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::health::HealthState;
use super::routes::{RouteConfig, configure};
use super::state::HttpState;
use crate::doc::ApiDoc;
use crate::middleware::{CatchPanic, Trace};

/// Per-worker inputs for [`build_app`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub routes: RouteConfig,
}

/// Build the full application: routes, Swagger UI and the middleware stack.
///
/// `Trace` is the outermost layer so panics recovered by `CatchPanic` are
/// still logged with a trace identifier.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        routes,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .configure(|cfg| configure(cfg, &routes))
        .service(
            SwaggerUi::new("/swagger/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .wrap(CatchPanic)
        .wrap(Trace)
}
