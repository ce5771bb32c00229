// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Contact, Match, MatchId, MatchLookup, MatchStatus, NewStudentRequest, OneOrMany, ProfileUpdate,
    RequestId, RequestStatus, Role, StudentRequest, User, UserId,
};
pub use requests::{
    ConfirmMatchRequest, CreateStudentRequest, MatchLookupQuery, ResolveMatchesQuery,
    UpdateProfileRequest,
};
pub use responses::{ErrorResponse, HealthResponse, MatchView, ResolveMatchesResponse};
