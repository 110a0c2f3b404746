pub mod health;
pub mod tomato;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tomatoes, /tomatoes/                            list, create
/// /tomatoes/{id}                                   get, update, delete
/// /tomatoes/search/name/{name}                     exact name lookup
/// /tomatoes/search/variety/{variety}               variety index lookup
/// /tomatoes/search/price/{price}                   price index lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tomatoes", tomato::router())
        // Nesting maps the inner `/` to `/tomatoes` only.
        .route(
            "/tomatoes/",
            get(handlers::tomato::list).post(handlers::tomato::create),
        )
}
