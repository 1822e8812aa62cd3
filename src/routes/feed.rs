use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{apply_filter, FeedRanker};
use crate::models::{ErrorResponse, FeedQuery, HealthResponse, RankFeedRequest, RankFeedResponse};
use crate::services::FeedSupplier;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub ranker: FeedRanker,
    pub supplier: Arc<FeedSupplier>,
}

/// Configure all feed-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/feed", web::get().to(get_feed))
        .route("/feed/rank", web::post().to(rank_feed));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Rank caller-supplied items
///
/// POST /api/v1/feed/rank
///
/// Request body:
/// ```json
/// {
///   "items": [{"id": 1, "type": "live", "location": {"distance": "200m"}}],
///   "filter": {"kinds": ["live"], "categories": [], "maxDistanceM": 1000},
///   "limit": 10
/// }
/// ```
async fn rank_feed(
    state: web::Data<AppState>,
    req: web::Json<RankFeedRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_feed request: {:?}", errors);
        return validation_error(errors);
    }

    let RankFeedRequest { items, filter, limit } = req.into_inner();
    let received = items.len();

    let candidates = apply_filter(items, &filter);
    let total_candidates = candidates.len();

    let limit = limit.map(usize::from).unwrap_or(usize::MAX);
    let feed = state.ranker.rank_with_limit(candidates, limit);

    tracing::info!(
        "Returning {} ranked items (from {} received, {} after filter)",
        feed.len(),
        received,
        total_candidates
    );

    HttpResponse::Ok().json(RankFeedResponse::new(feed, total_candidates))
}

/// Rank the configured supplier's items
///
/// GET /api/v1/feed?type=live,moop&category=food&maxDistanceM=500&limit=5
async fn get_feed(
    state: web::Data<AppState>,
    query: web::Query<FeedQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_error(errors);
    }

    let items = match state.supplier.items().await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Failed to load feed from {}: {}", state.supplier.source().name(), e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to load feed".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let filter = query.to_filter();
    let candidates = apply_filter(items.as_ref().clone(), &filter);
    let total_candidates = candidates.len();

    let limit = query.limit.map(usize::from).unwrap_or(usize::MAX);
    let feed = state.ranker.rank_with_limit(candidates, limit);

    tracing::debug!(
        "Ranked supplier feed: {} items from {} candidates",
        feed.len(),
        total_candidates
    );

    HttpResponse::Ok().json(RankFeedResponse::new(feed, total_candidates))
}
