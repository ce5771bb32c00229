use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::MatchError;
use crate::models::{CreateStudentRequest, NewStudentRequest};
use crate::routes::{bad_request, error_response};
use crate::routes::matches::AppState;

/// Configure student request routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/requests", web::post().to(create_request))
        .route("/requests/student/{student_id}", web::get().to(list_student_requests))
        .route("/requests/{request_id}", web::get().to(get_request));
}

/// Create a student request
///
/// POST /api/v1/requests
///
/// Request body:
/// ```json
/// {
///   "studentId": 1,
///   "location": "Jerusalem",
///   "numGuests": 2
/// }
/// ```
async fn create_request(
    state: web::Data<AppState>,
    req: web::Json<CreateStudentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_request: {:?}", errors);
        return bad_request("validation_error", errors.to_string());
    }

    let req = req.into_inner();
    let new_request = NewStudentRequest {
        student_id: req.student_id,
        location: req.location.trim().to_string(),
        num_guests: req.num_guests,
    };

    match state.requests.create_request(new_request).await {
        Ok(created) => {
            tracing::info!(
                "Student {} requested hosting for {} guests in {}",
                created.student_id,
                created.num_guests,
                created.location
            );
            HttpResponse::Created().json(created)
        }
        Err(e) => {
            tracing::error!("Failed to create request for student {}: {}", req.student_id, e);
            error_response(&MatchError::from_store(e))
        }
    }
}

/// GET /api/v1/requests/{request_id}
async fn get_request(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.requests.get_request(path.into_inner()).await {
        Ok(request) => HttpResponse::Ok().json(request),
        Err(e) => error_response(&MatchError::from_store(e)),
    }
}

/// GET /api/v1/requests/student/{student_id}
async fn list_student_requests(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let student_id = path.into_inner();

    match state.requests.list_requests_for_student(student_id).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => {
            tracing::error!("Failed to list requests for student {}: {}", student_id, e);
            error_response(&MatchError::from_store(e))
        }
    }
}
