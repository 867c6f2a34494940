//! HTTP API handlers for hospitalinfo.
//!
//! Every request goes through [`dispatch`], which parses the path into a
//! [`Route`] and answers it:
//!
//! - **GET /** returns the HTML description of the API from the static host.
//! - **GET /{resource}** returns the resource's records, filtered by the query string.
//! - **GET /{resource}/{id}** returns the record with that `id`, or `404 Not Found`.
//!
//! Resources are `bloodbank`, `donor`, `camps` and `events`. Datasets are fetched
//! from the static host on every request; no state is kept between requests.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, Uri},
    response::{Html, IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::config::AvailabilityPolicy;
use crate::error::ApiError;
use crate::filter::{RecordFilter, find_by_id};
use crate::model::{BloodbankQuery, DonorQuery, LocationQuery, Record, Resource};
use crate::route::Route;
use crate::source::DatasetClient;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: DatasetClient,
    pub donor_availability: AvailabilityPolicy,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route a request by its path.
#[instrument(skip(state))]
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::MethodNotAllowed);
    }

    match Route::parse(uri.path()) {
        Route::Index => {
            let html = state.client.fetch_index().await?;
            Ok(Html(html).into_response())
        }
        Route::Record(resource, id) => {
            let record = get_record(&state, resource, &id).await?;
            Ok(Json(record).into_response())
        }
        Route::Collection(resource) => {
            let records = list_records(&state, resource, &uri).await?;
            Ok(Json(records).into_response())
        }
        Route::Unknown => {
            info!(path = uri.path(), "Unknown resource");
            Err(ApiError::NotFound)
        }
    }
}

/// GET /{resource}/{id} - The first record whose `id` equals `id`.
async fn get_record(state: &AppState, resource: Resource, id: &str) -> Result<Record, ApiError> {
    let records = state.client.fetch_records(resource).await?;

    match find_by_id(records, id) {
        Some(record) => {
            info!(resource = resource.segment(), id, "Record found");
            Ok(record)
        }
        None => {
            info!(resource = resource.segment(), id, "Record not found");
            Err(ApiError::NotFound)
        }
    }
}

/// GET /{resource} - The records matching the query string.
///
/// # Query Parameters
///
/// - `bloodbank`: `name`, `loc`, `add` (substring, case and punctuation insensitive)
/// - `donor`: `id` (exact), `location` (substring), `bloodgroup` (exact, e.g. `O+`)
/// - `camps`, `events`: `location` (substring)
///
/// A repeated parameter uses its first value. Donor listings also drop donors
/// not marked `available: true`, according to the configured [`AvailabilityPolicy`].
async fn list_records(
    state: &AppState,
    resource: Resource,
    uri: &Uri,
) -> Result<Vec<Record>, ApiError> {
    let filter = match resource {
        Resource::Bloodbank => RecordFilter::for_bloodbanks(&parse_query::<BloodbankQuery>(uri)),
        Resource::Donor => RecordFilter::for_donors(
            &parse_query::<DonorQuery>(uri),
            state.donor_availability,
        ),
        Resource::Camps | Resource::Events => {
            RecordFilter::for_locations(&parse_query::<LocationQuery>(uri))
        }
    };

    let records = state.client.fetch_records(resource).await?;
    let total = records.len();
    let matched = filter.apply(records);

    info!(
        resource = resource.segment(),
        total,
        matched = matched.len(),
        "Collection queried"
    );
    Ok(matched)
}

/// Deserialise the query string, keeping the first value of a repeated key.
fn parse_query<T: DeserializeOwned + Default>(uri: &Uri) -> T {
    let pairs = match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Ignoring undecodable query string");
            return T::default();
        }
    };

    let mut first = Map::new();
    for (key, value) in pairs {
        first.entry(key).or_insert(Value::String(value));
    }

    serde_json::from_value(Value::Object(first)).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring query parameters");
        T::default()
    })
}
