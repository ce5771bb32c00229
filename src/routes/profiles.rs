use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::MatchError;
use crate::models::{ProfileUpdate, UpdateProfileRequest};
use crate::routes::{bad_request, error_response};
use crate::routes::matches::AppState;

/// Configure user profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profile/{user_id}", web::get().to(get_profile))
        .route("/profile/{user_id}", web::put().to(update_profile));
}

/// GET /api/v1/profile/{user_id}
async fn get_profile(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let user_id = path.into_inner();

    match state.contacts.get_contact(user_id).await {
        Ok(Some(contact)) => HttpResponse::Ok().json(contact),
        Ok(None) => error_response(&MatchError::NotFound(format!("user {}", user_id))),
        Err(e) => {
            tracing::error!("Failed to load profile {}: {}", user_id, e);
            error_response(&MatchError::from_store(e))
        }
    }
}

/// Update a user's profile
///
/// PUT /api/v1/profile/{user_id}
///
/// Request body (every field optional):
/// ```json
/// {
///   "name": "Dana",
///   "aboutMe": "Family of five near the Old City",
///   "preferences": "Kosher, no pets",
///   "location": "Jerusalem"
/// }
/// ```
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    let user_id = path.into_inner();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for update_profile: {:?}", errors);
        return bad_request("validation_error", errors.to_string());
    }

    let update = ProfileUpdate::from(req.into_inner());
    if update.is_empty() {
        return bad_request("validation_error", "At least one profile field is required");
    }

    match state.contacts.update_contact(user_id, update).await {
        Ok(Some(contact)) => {
            tracing::info!("Profile {} updated", user_id);
            HttpResponse::Ok().json(contact)
        }
        Ok(None) => error_response(&MatchError::NotFound(format!("user {}", user_id))),
        Err(e) => {
            tracing::error!("Failed to update profile {}: {}", user_id, e);
            error_response(&MatchError::from_store(e))
        }
    }
}
