use serde::{Deserialize, Serialize};
use std::fmt;

pub type UserId = i64;
pub type RequestId = i64;
pub type MatchId = i64;

/// Role a user acts under
///
/// Anything other than `student` or `host` deserializes to `Unknown`; the
/// resolver treats it as a user with no matches and the confirmation engine
/// rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Host,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Parse a role name, case-insensitively
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "student" => Role::Student,
            "host" => Role::Host,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Host => "host",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity supplied by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub role: Role,
}

impl User {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn student(id: UserId) -> Self {
        Self::new(id, Role::Student)
    }

    pub fn host(id: UserId) -> Self {
        Self::new(id, Role::Host)
    }
}

/// Stored user record: the profile shown to the other party and the phone
/// number used to reach them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: UserId,
    pub name: String,
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub about_me: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Profile fields a user may change; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub about_me: Option<String>,
    pub preferences: Option<String>,
    pub location: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.about_me.is_none()
            && self.preferences.is_none()
            && self.location.is_none()
    }

    /// Overwrite the fields this update carries
    pub fn apply_to(self, contact: &mut Contact) {
        if let Some(name) = self.name {
            contact.name = name;
        }
        if let Some(about_me) = self.about_me {
            contact.about_me = Some(about_me);
        }
        if let Some(preferences) = self.preferences {
            contact.preferences = Some(preferences);
        }
        if let Some(location) = self.location {
            contact.location = Some(location);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Matched,
    Confirmed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Matched => "matched",
            RequestStatus::Confirmed => "confirmed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Unrecognised values fall back to `Pending`
    pub fn parse(value: &str) -> Self {
        match value {
            "matched" => RequestStatus::Matched,
            "confirmed" => RequestStatus::Confirmed,
            "cancelled" => RequestStatus::Cancelled,
            _ => RequestStatus::Pending,
        }
    }
}

/// A student's hospitality request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRequest {
    pub id: RequestId,
    pub student_id: UserId,
    pub location: String,
    pub num_guests: i32,
    pub status: RequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fields needed to record a new student request
#[derive(Debug, Clone)]
pub struct NewStudentRequest {
    pub student_id: UserId,
    pub location: String,
    pub num_guests: i32,
}

/// Association between one student request and one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub student_request_id: RequestId,
    pub host_id: UserId,
    #[serde(default)]
    pub host_confirmed: bool,
    #[serde(default)]
    pub student_confirmed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    pub fn status(&self) -> MatchStatus {
        MatchStatus::derive(self.host_confirmed, self.student_confirmed)
    }

    pub fn is_finalized(&self) -> bool {
        self.status() == MatchStatus::Finalized
    }

    /// Whether the flag owned by `role` is already set
    pub fn is_confirmed_by(&self, role: Role) -> bool {
        match role {
            Role::Host => self.host_confirmed,
            Role::Student => self.student_confirmed,
            Role::Unknown => false,
        }
    }
}

/// Confirmation state of a match, derived from its two flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    PendingBoth,
    PendingHost,
    PendingStudent,
    Finalized,
}

impl MatchStatus {
    pub fn derive(host_confirmed: bool, student_confirmed: bool) -> Self {
        match (host_confirmed, student_confirmed) {
            (true, true) => MatchStatus::Finalized,
            (false, true) => MatchStatus::PendingHost,
            (true, false) => MatchStatus::PendingStudent,
            (false, false) => MatchStatus::PendingBoth,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finalized)
    }
}

/// Result shape of an upstream lookup that may hold nothing, one item, or a list
///
/// Deserializes from `null`, a single object, or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Empty,
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Coerce any shape into a flat sequence
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Empty => Vec::new(),
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }

    /// Pick the narrowest shape for a list of results
    pub fn from_vec(mut items: Vec<T>) -> Self {
        match items.len() {
            0 => OneOrMany::Empty,
            1 => OneOrMany::One(items.remove(0)),
            _ => OneOrMany::Many(items),
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Empty
    }
}

pub type MatchLookup = OneOrMany<Match>;
