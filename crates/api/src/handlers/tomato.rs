//! Handlers for the `/tomatoes` resource.
//!
//! Request bodies are checked here before the service is called: required
//! fields for creation, price type and sign, and which fields an update
//! actually supplies. The service repeats the invariant checks, so nothing
//! invalid is stored even if a caller bypasses these handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tomato_core::error::CoreError;
use tomato_core::field::Field;
use tomato_core::tomato::{
    validate_price, NewTomato, Tomato, UpdateTomato, EMPTY_TEXT_MESSAGE, ENTITY,
    IN_STOCK_MESSAGE, PRICE_MESSAGE, REQUIRED_FIELDS_MESSAGE,
};
use tomato_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

/// JSON body for `POST /tomatoes` and `PUT /tomatoes/{id}`.
///
/// `price` is kept as raw JSON so a non-numeric value becomes a validation
/// error with the usual message instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TomatoBody {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub variety: Field<String>,
    #[serde(default)]
    pub price: Field<serde_json::Value>,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub in_stock: Field<bool>,
}

impl TomatoBody {
    /// Convert a creation body. `null` optional fields count as omitted.
    pub fn into_new(self) -> Result<NewTomato, CoreError> {
        let name = required_text(self.name);
        let variety = required_text(self.variety);
        let (Some(name), Some(variety), false) = (name, variety, self.price.is_missing()) else {
            return Err(CoreError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        };
        let price = parse_price(self.price.into_option())?;

        Ok(NewTomato {
            name,
            variety,
            price,
            description: self.description.into_option(),
            in_stock: self.in_stock.into_option(),
        })
    }

    /// Convert an update body. Missing fields stay unchanged; `null`
    /// clears `description` and is rejected for every other field.
    pub fn into_update(self) -> Result<UpdateTomato, CoreError> {
        let price = match self.price {
            Field::Missing => None,
            Field::Null => return Err(CoreError::Validation(PRICE_MESSAGE.to_string())),
            Field::Value(value) => Some(parse_price(Some(value))?),
        };

        let description = match self.description {
            Field::Missing => None,
            Field::Null => Some(None),
            Field::Value(text) => Some(Some(text)),
        };

        let in_stock = match self.in_stock {
            Field::Missing => None,
            Field::Null => return Err(CoreError::Validation(IN_STOCK_MESSAGE.to_string())),
            Field::Value(flag) => Some(flag),
        };

        Ok(UpdateTomato {
            name: optional_text(self.name)?,
            variety: optional_text(self.variety)?,
            price,
            description,
            in_stock,
        })
    }
}

/// A present, non-empty string.
fn required_text(field: Field<String>) -> Option<String> {
    field.into_option().filter(|text| !text.is_empty())
}

fn optional_text(field: Field<String>) -> Result<Option<String>, CoreError> {
    match field {
        Field::Missing => Ok(None),
        Field::Value(text) if !text.is_empty() => Ok(Some(text)),
        Field::Null | Field::Value(_) => {
            Err(CoreError::Validation(EMPTY_TEXT_MESSAGE.to_string()))
        }
    }
}

/// A JSON number that is finite and non-negative.
fn parse_price(value: Option<serde_json::Value>) -> Result<f64, CoreError> {
    let price = value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| CoreError::Validation(PRICE_MESSAGE.to_string()))?;
    validate_price(price)?;
    Ok(price)
}

/// Identifiers that do not parse cannot exist, so they resolve to not-found.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .map_err(|_| AppError::Core(CoreError::not_found(ENTITY, raw)))
}

fn body_or_bad_request(body: Result<Json<TomatoBody>, JsonRejection>) -> AppResult<TomatoBody> {
    body.map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `data` payload of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeletedTomato {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /tomatoes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Tomato>>>> {
    let tomatoes = state
        .tomatoes
        .list_all()
        .await
        .map_err(AppError::failed("Failed to fetch tomatoes"))?;
    Ok(Json(ApiResponse::list(tomatoes)))
}

/// GET /tomatoes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Tomato>>> {
    let id = parse_id(&raw_id)?;
    let tomato = state
        .tomatoes
        .find_by_id(id)
        .await
        .map_err(AppError::failed("Failed to fetch tomato"))?
        .ok_or_else(|| CoreError::not_found(ENTITY, id))?;
    Ok(Json(ApiResponse::data(tomato)))
}

/// GET /tomatoes/search/name/{name}
pub async fn search_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Tomato>>>> {
    let tomatoes = state
        .tomatoes
        .find_by_name(&name)
        .await
        .map_err(AppError::failed("Failed to search tomatoes"))?;
    Ok(Json(ApiResponse::list(tomatoes)))
}

/// GET /tomatoes/search/variety/{variety}
pub async fn search_by_variety(
    State(state): State<AppState>,
    Path(variety): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Tomato>>>> {
    let tomatoes = state
        .tomatoes
        .find_by_variety(&variety)
        .await
        .map_err(AppError::failed("Failed to search tomatoes"))?;
    Ok(Json(ApiResponse::list(tomatoes)))
}

/// GET /tomatoes/search/price/{price}
pub async fn search_by_price(
    State(state): State<AppState>,
    Path(raw_price): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Tomato>>>> {
    let price: f64 = raw_price
        .parse()
        .map_err(|_| CoreError::Validation(PRICE_MESSAGE.to_string()))?;
    let tomatoes = state
        .tomatoes
        .find_by_price(price)
        .await
        .map_err(AppError::failed("Failed to search tomatoes"))?;
    Ok(Json(ApiResponse::list(tomatoes)))
}

/// POST /tomatoes
///
/// Responds with the stored record, re-read after insertion.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TomatoBody>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Tomato>>)> {
    let input = body_or_bad_request(body)?.into_new()?;

    let id = state
        .tomatoes
        .create(input)
        .await
        .map_err(AppError::failed("Failed to create tomato"))?;
    let tomato = state
        .tomatoes
        .find_by_id(id)
        .await
        .map_err(AppError::failed("Failed to create tomato"))?
        .ok_or_else(|| AppError::InternalError(format!("created tomato {id} vanished")))?;

    tracing::info!(id, "Tomato created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(tomato).with_message("Tomato created successfully")),
    ))
}

/// PUT /tomatoes/{id}
///
/// A missing record is reported before any body validation error.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TomatoBody>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Tomato>>> {
    let id = parse_id(&raw_id)?;
    state
        .tomatoes
        .find_by_id(id)
        .await
        .map_err(AppError::failed("Failed to update tomato"))?
        .ok_or_else(|| CoreError::not_found(ENTITY, id))?;

    let input = body_or_bad_request(body)?.into_update()?;
    let tomato = state
        .tomatoes
        .update(id, input)
        .await
        .map_err(AppError::failed("Failed to update tomato"))?;

    tracing::info!(id, "Tomato updated");
    Ok(Json(
        ApiResponse::data(tomato).with_message("Tomato updated successfully"),
    ))
}

/// DELETE /tomatoes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedTomato>>> {
    let id = parse_id(&raw_id)?;
    state
        .tomatoes
        .delete(id)
        .await
        .map_err(AppError::failed("Failed to delete tomato"))?;

    tracing::info!(id, "Tomato deleted");
    Ok(Json(
        ApiResponse::data(DeletedTomato { id }).with_message("Tomato deleted successfully"),
    ))
}
