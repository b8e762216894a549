use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/seasonings", seasoning_routes())
        .nest("/seasoning-types", seasoning_type_routes())
        .nest("/templates", template_routes())
}

fn seasoning_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::seasoning::list_seasonings,
            handlers::seasoning::create_seasoning
        ))
        .routes(routes!(
            handlers::seasoning::get_seasoning,
            handlers::seasoning::update_seasoning,
            handlers::seasoning::delete_seasoning
        ))
}

fn seasoning_type_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::seasoning_type::list_seasoning_types,
        handlers::seasoning_type::create_seasoning_type
    ))
}

fn template_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::template::list_templates,
            handlers::template::create_template
        ))
        .routes(routes!(
            handlers::template::get_template,
            handlers::template::delete_template
        ))
}
