use crate::models::domain::ProfileUpdate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a student hospitality request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: i64,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = 1))]
    #[serde(alias = "num_guests", rename = "numGuests")]
    pub num_guests: i32,
}

/// Query for resolving the matches visible to a user
///
/// `role` stays a plain string so unrecognised roles resolve to an empty list
/// instead of failing extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveMatchesQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    pub role: String,
}

/// Query for a raw match lookup, by request or by host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchLookupQuery {
    #[serde(default, alias = "student_request_id", rename = "studentRequestId")]
    pub student_request_id: Option<i64>,
    #[serde(default, alias = "host_id", rename = "hostId")]
    pub host_id: Option<i64>,
}

/// Optional body for a confirmation call
///
/// When `userId` is present the engine checks the caller is the party that
/// owns the confirming role on the match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmMatchRequest {
    #[serde(default, alias = "user_id", rename = "userId")]
    pub user_id: Option<i64>,
}

/// Partial profile update; omitted fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "about_me", rename = "aboutMe")]
    pub about_me: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub location: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            name: req.name,
            about_me: req.about_me,
            preferences: req.preferences,
            location: req.location,
        }
    }
}
