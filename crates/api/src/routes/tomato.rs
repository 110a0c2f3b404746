//! Route definitions for the `/tomatoes` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tomato;
use crate::state::AppState;

/// Routes mounted at `/tomatoes`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /search/name/{name}        -> search_by_name
/// GET    /search/variety/{variety}  -> search_by_variety
/// GET    /search/price/{price}      -> search_by_price
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// ```
///
/// The static `/search/...` segments take priority over `/{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tomato::list).post(tomato::create))
        .route("/search/name/{name}", get(tomato::search_by_name))
        .route("/search/variety/{variety}", get(tomato::search_by_variety))
        .route("/search/price/{price}", get(tomato::search_by_price))
        .route(
            "/{id}",
            get(tomato::get_by_id)
                .put(tomato::update)
                .delete(tomato::delete),
        )
}
