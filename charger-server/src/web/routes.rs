//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::blacklist::{Blacklist, BlacklistError};
use crate::directory::ChargerDirectory;
use crate::domain::{ChargerId, Coordinate, RemainingRange, TravelDirection};
use crate::finder::{FindError, FindRequest};
use crate::location::LocationProvider;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<D, L, B>(state: AppState<D, L, B>) -> Router
where
    D: ChargerDirectory + 'static,
    L: LocationProvider + 'static,
    B: Blacklist + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/chargers", get(find_chargers::<D, L, B>))
        .route(
            "/api/blacklist",
            get(list_blacklist::<D, L, B>).delete(clear_blacklist::<D, L, B>),
        )
        .route(
            "/api/blacklist/:id",
            put(add_to_blacklist::<D, L, B>).delete(remove_from_blacklist::<D, L, B>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Rank chargers ahead of the driver.
async fn find_chargers<D, L, B>(
    State(state): State<AppState<D, L, B>>,
    Query(query): Query<ChargerQuery>,
) -> Result<Json<FindChargersResponse>, AppError>
where
    D: ChargerDirectory,
    L: LocationProvider,
    B: Blacklist,
{
    let direction: TravelDirection = query.direction.parse().map_err(|e| AppError::BadRequest {
        message: format!("{e}"),
    })?;
    let range = RemainingRange::try_from(query.range).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let request = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => FindRequest::new(direction, range).at(Coordinate::new(lat, lon)),
        (None, None) => FindRequest::new(direction, range),
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lon must be given together".to_string(),
            });
        }
    };

    let mut outcome = state.finder.find(request).await?;
    outcome.results = query.narrow(&outcome.results);

    let mut response = FindChargersResponse::from_outcome(&outcome, direction, range.km());
    if query.by_segment {
        response = response.with_segments(&outcome.results);
    }
    Ok(Json(response))
}

async fn list_blacklist<D, L, B>(State(state): State<AppState<D, L, B>>) -> Json<BlacklistResponse>
where
    D: ChargerDirectory,
    L: LocationProvider,
    B: Blacklist,
{
    let ids = state.finder.blacklist().ids().await;
    Json(BlacklistResponse::from_ids(&ids))
}

/// Hide a charger from future results. Idempotent.
async fn add_to_blacklist<D, L, B>(
    State(state): State<AppState<D, L, B>>,
    Path(id): Path<String>,
) -> Result<Json<BlacklistResponse>, AppError>
where
    D: ChargerDirectory,
    L: LocationProvider,
    B: Blacklist,
{
    let id = parse_id(&id)?;
    let blacklist = state.finder.blacklist();
    if blacklist.add(id.clone()).await? {
        tracing::info!(%id, "charger blacklisted");
    }
    Ok(Json(BlacklistResponse::from_ids(&blacklist.ids().await)))
}

async fn remove_from_blacklist<D, L, B>(
    State(state): State<AppState<D, L, B>>,
    Path(id): Path<String>,
) -> Result<Json<BlacklistResponse>, AppError>
where
    D: ChargerDirectory,
    L: LocationProvider,
    B: Blacklist,
{
    let id = parse_id(&id)?;
    let blacklist = state.finder.blacklist();
    if !blacklist.remove(&id).await? {
        return Err(AppError::NotFound {
            message: format!("charger {id} is not blacklisted"),
        });
    }
    tracing::info!(%id, "charger removed from blacklist");
    Ok(Json(BlacklistResponse::from_ids(&blacklist.ids().await)))
}

async fn clear_blacklist<D, L, B>(
    State(state): State<AppState<D, L, B>>,
) -> Result<StatusCode, AppError>
where
    D: ChargerDirectory,
    L: LocationProvider,
    B: Blacklist,
{
    state.finder.blacklist().clear().await?;
    tracing::info!("blacklist cleared");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<ChargerId, AppError> {
    ChargerId::parse(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// A position the finder refused to rank from.
    InvalidLocation { message: String },
    Internal { message: String },
}

impl From<FindError> for AppError {
    fn from(e: FindError) -> Self {
        match e {
            FindError::InvalidLocation { .. } => AppError::InvalidLocation {
                message: e.to_string(),
            },
        }
    }
}

impl From<BlacklistError> for AppError {
    fn from(e: BlacklistError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::InvalidLocation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blacklist::MemoryBlacklist;
    use crate::directory::{AddressInfo, PoiRecord, StaticDirectory};
    use crate::finder::{ChargerFinder, FinderConfig};
    use crate::location::NoLocation;
    use crate::planner::test_support::south_of;
    use crate::synthetic::SyntheticGenerator;

    type TestState = AppState<StaticDirectory, NoLocation, MemoryBlacklist>;

    fn lyon() -> Coordinate {
        Coordinate::new(45.76, 4.83)
    }

    fn poi(uuid: &str, at: Coordinate) -> PoiRecord {
        PoiRecord {
            uuid: Some(uuid.to_string()),
            address_info: Some(AddressInfo {
                latitude: Some(at.latitude),
                longitude: Some(at.longitude),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn state() -> TestState {
        let directory = StaticDirectory::from_records(vec![poi("valence", south_of(lyon(), 30.0))]);
        let finder = ChargerFinder::new(
            directory,
            NoLocation,
            MemoryBlacklist::new(),
            FinderConfig::default(),
        )
        .with_synthetic(SyntheticGenerator::seeded(3));
        AppState::new(finder)
    }

    fn query(direction: &str, range: u32, at: Option<Coordinate>) -> Query<ChargerQuery> {
        Query(ChargerQuery {
            direction: direction.to_string(),
            range,
            lat: at.map(|c| c.latitude),
            lon: at.map(|c| c.longitude),
            include_unknown: None,
            min_power_kw: None,
            fast_food: false,
            by_segment: false,
        })
    }

    #[tokio::test]
    async fn finds_live_charger() {
        let Json(response) = find_chargers(State(state()), query("forward", 40, Some(lyon())))
            .await
            .unwrap();

        assert_eq!(response.data_source, "live");
        assert_eq!(response.position_source, "supplied");
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, "valence");
        assert_eq!(response.advisory, None);
    }

    #[tokio::test]
    async fn list_filters_and_segments_apply() {
        let mut q = query("forward", 40, Some(lyon()));
        q.0.by_segment = true;
        let Json(response) = find_chargers(State(state()), q).await.unwrap();
        let segments = response.segments.unwrap();
        assert_eq!(segments.values().flatten().collect::<Vec<_>>(), vec!["valence"]);

        // The stored charger is a 50 kW site.
        let mut q = query("forward", 40, Some(lyon()));
        q.0.min_power_kw = Some(150);
        let Json(response) = find_chargers(State(state()), q).await.unwrap();
        assert_eq!(response.data_source, "live");
        assert!(response.results.is_empty());
        assert_eq!(response.segments, None);
    }

    #[tokio::test]
    async fn bad_direction_is_400() {
        let err = find_chargers(State(state()), query("sideways", 40, Some(lyon())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_range_is_400() {
        let err = find_chargers(State(state()), query("forward", 30, Some(lyon())))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn half_a_position_is_400() {
        let mut q = query("forward", 40, Some(lyon()));
        q.0.lon = None;
        let err = find_chargers(State(state()), q).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn off_corridor_is_422() {
        let madrid = Coordinate::new(40.4168, -3.7038);
        let err = find_chargers(State(state()), query("forward", 40, Some(madrid)))
            .await
            .unwrap_err();
        let AppError::InvalidLocation { message } = &err else {
            panic!("expected InvalidLocation, got {err:?}");
        };
        assert!(message.contains("Rotterdam-Santa Pola"));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn no_position_uses_fallback_with_advisory() {
        let Json(response) = find_chargers(State(state()), query("forward", 20, None))
            .await
            .unwrap();

        assert_eq!(response.position_source, "fallback");
        assert!(response.advisory.is_some());
        assert!(!response.results.is_empty());
    }

    #[tokio::test]
    async fn blacklist_round_trip() {
        let state = state();

        let Json(added) = add_to_blacklist(State(state.clone()), Path("valence".to_string()))
            .await
            .unwrap();
        assert_eq!(added.ids, vec!["valence"]);

        let Json(listed) = list_blacklist(State(state.clone())).await;
        assert_eq!(listed.ids, vec!["valence"]);

        let Json(removed) = remove_from_blacklist(State(state.clone()), Path("valence".to_string()))
            .await
            .unwrap();
        assert!(removed.ids.is_empty());

        let err = remove_from_blacklist(State(state.clone()), Path("valence".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_id_is_400() {
        let err = add_to_blacklist(State(state()), Path("  ".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clear_empties_blacklist() {
        let state = state();
        add_to_blacklist(State(state.clone()), Path("a".to_string())).await.unwrap();
        add_to_blacklist(State(state.clone()), Path("b".to_string())).await.unwrap();

        let status = clear_blacklist(State(state.clone())).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let Json(listed) = list_blacklist(State(state)).await;
        assert!(listed.ids.is_empty());
    }

    #[tokio::test]
    async fn blacklisted_charger_leaves_results() {
        let state = state();
        add_to_blacklist(State(state.clone()), Path("valence".to_string())).await.unwrap();

        let Json(response) = find_chargers(State(state), query("forward", 40, Some(lyon())))
            .await
            .unwrap();
        assert!(response.results.iter().all(|r| r.id != "valence"));
        assert_eq!(response.data_source, "synthetic");
    }

    #[tokio::test]
    async fn router_serves_json() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = create_router(state());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        let health = client.get(format!("http://{addr}/health")).send().await.unwrap();
        assert_eq!(health.text().await.unwrap(), "ok");

        let response = client
            .get(format!(
                "http://{addr}/api/chargers?direction=forward&range=40&lat=45.76&lon=4.83"
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["results"][0]["id"], "valence");

        let filtered = client
            .get(format!(
                "http://{addr}/api/chargers?direction=forward&range=40&lat=45.76&lon=4.83\
                 &include_unknown=true&fast_food=true&by_segment=true"
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(filtered.status(), reqwest::StatusCode::OK);

        let missing_range = client
            .get(format!("http://{addr}/api/chargers?direction=forward"))
            .send()
            .await
            .unwrap();
        assert_eq!(missing_range.status(), reqwest::StatusCode::BAD_REQUEST);

        let put = client
            .put(format!("http://{addr}/api/blacklist/valence"))
            .send()
            .await
            .unwrap();
        assert_eq!(put.status(), reqwest::StatusCode::OK);
    }
}
