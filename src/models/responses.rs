use serde::{Deserialize, Serialize};
use crate::models::domain::{Match, MatchId, MatchStatus, Role, UserId};

/// Match record together with its derived status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub record: Match,
    pub status: MatchStatus,
    pub finalized: bool,
}

impl From<Match> for MatchView {
    fn from(record: Match) -> Self {
        let status = record.status();
        Self {
            record,
            status,
            finalized: status == MatchStatus::Finalized,
        }
    }
}

/// Response for the resolve endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveMatchesResponse {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub role: Role,
    #[serde(rename = "matchIds")]
    pub match_ids: Vec<MatchId>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_match_view_flattens_record() {
        let view = MatchView::from(Match {
            id: 5,
            student_request_id: 2,
            host_id: 9,
            host_confirmed: true,
            student_confirmed: false,
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["host_confirmed"], true);
        assert_eq!(json["status"], "pending_student");
        assert_eq!(json["finalized"], false);
    }
}
