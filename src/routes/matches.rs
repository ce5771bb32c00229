use actix_web::{web, HttpResponse, Responder};
use crate::core::{ConfirmationEngine, MatchError, MatchResolver};
use crate::models::{
    ConfirmMatchRequest, HealthResponse, MatchLookupQuery, MatchView, ResolveMatchesQuery,
    ResolveMatchesResponse, Role, User,
};
use crate::routes::{bad_request, error_response};
use crate::services::{ContactStore, MatchNotifier, MatchStore, RequestStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub requests: Arc<dyn RequestStore>,
    pub matches: Arc<dyn MatchStore>,
    pub contacts: Arc<dyn ContactStore>,
    pub resolver: MatchResolver,
    pub engine: ConfirmationEngine,
    pub notifier: Option<MatchNotifier>,
}

impl AppState {
    pub fn new(
        requests: Arc<dyn RequestStore>,
        matches: Arc<dyn MatchStore>,
        contacts: Arc<dyn ContactStore>,
        notifier: Option<MatchNotifier>,
    ) -> Self {
        Self {
            resolver: MatchResolver::new(requests.clone(), matches.clone()),
            engine: ConfirmationEngine::new(requests.clone(), matches.clone()),
            requests,
            matches,
            contacts,
            notifier,
        }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/resolve", web::get().to(resolve_matches))
        .route("/matches", web::get().to(lookup_matches))
        .route("/matches/{match_id}", web::get().to(get_match))
        .route("/matches/{match_id}/confirm/{role}", web::put().to(confirm_match));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = state.matches.health_check().await.unwrap_or(false);

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve the matches visible to a user
///
/// GET /api/v1/matches/resolve?userId={id}&role={student|host}
///
/// An unrecognised role yields an empty list.
async fn resolve_matches(
    state: web::Data<AppState>,
    query: web::Query<ResolveMatchesQuery>,
) -> impl Responder {
    let user = User::new(query.user_id, Role::parse(&query.role));

    tracing::info!("Resolving matches for {} {}", user.role, user.id);

    match state.resolver.resolve_matches_for_user(&user).await {
        Ok(match_ids) => HttpResponse::Ok().json(ResolveMatchesResponse {
            user_id: user.id,
            role: user.role,
            count: match_ids.len(),
            match_ids,
        }),
        Err(e) => {
            tracing::error!("Failed to resolve matches for user {}: {}", user.id, e);
            error_response(&e)
        }
    }
}

/// Raw match lookup
///
/// GET /api/v1/matches?studentRequestId={id}
/// GET /api/v1/matches?hostId={id}
///
/// Always answers with a list, whatever shape the store returned.
async fn lookup_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchLookupQuery>,
) -> impl Responder {
    let lookup = match (query.student_request_id, query.host_id) {
        (Some(request_id), None) => state.matches.find_matches_by_request(request_id).await,
        (None, Some(host_id)) => state.matches.find_matches_by_host(host_id).await,
        _ => {
            return bad_request("invalid_query", "Exactly one of studentRequestId or hostId is required");
        }
    };

    match lookup {
        Ok(found) => {
            let views: Vec<MatchView> = found.into_vec().into_iter().map(MatchView::from).collect();
            HttpResponse::Ok().json(views)
        }
        Err(e) => {
            tracing::error!("Match lookup failed: {}", e);
            error_response(&MatchError::from_store(e))
        }
    }
}

/// Get one match with its derived status
///
/// GET /api/v1/matches/{match_id}
async fn get_match(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let match_id = path.into_inner();

    match state.matches.get_match(match_id).await {
        Ok(record) => HttpResponse::Ok().json(MatchView::from(record)),
        Err(e) => error_response(&MatchError::from_store(e)),
    }
}

/// Confirm a match as host or student
///
/// PUT /api/v1/matches/{match_id}/confirm/{role}
///
/// Optional body:
/// ```json
/// { "userId": 42 }
/// ```
/// With `userId` the caller must be the host of the match or the owner of
/// its request. An empty body confirms without that check; a body that is
/// not a valid confirmation object is rejected with 400 whatever its
/// content type.
async fn confirm_match(
    state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
    body: web::Bytes,
) -> impl Responder {
    let (match_id, role) = path.into_inner();
    let role = Role::parse(&role);
    let acting_user = match parse_confirm_body(&body) {
        Ok(request) => request.user_id,
        Err(e) => {
            tracing::info!("Rejected confirmation body for match {}: {}", match_id, e);
            return bad_request("invalid_json", format!("Invalid JSON: {}", e));
        }
    };

    let result = match acting_user {
        Some(user_id) => state.engine.confirm_match_as(match_id, &User::new(user_id, role)).await,
        None => state.engine.confirm(match_id, role).await,
    };

    match result {
        Ok(confirmation) => {
            if confirmation.newly_finalized() {
                if let Some(notifier) = state.notifier.clone() {
                    let record = confirmation.record.clone();
                    actix_web::rt::spawn(async move {
                        notifier.notify_finalized(&record).await;
                    });
                }
            }
            HttpResponse::Ok().json(MatchView::from(confirmation.record))
        }
        Err(e) => {
            tracing::info!("Confirmation of match {} as {} rejected: {}", match_id, role, e);
            error_response(&e)
        }
    }
}

fn parse_confirm_body(body: &[u8]) -> Result<ConfirmMatchRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ConfirmMatchRequest::default());
    }
    serde_json::from_slice(body)
}
