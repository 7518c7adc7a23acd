//! Event reaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;

/// A stored reaction of a user to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionStatus {
    Interested,
    Attending,
}

impl ReactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionStatus::Interested => "interested",
            ReactionStatus::Attending => "attending",
        }
    }
}

impl fmt::Display for ReactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a caller asks for: a stored status, or `none` to withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionChoice {
    Interested,
    Attending,
    None,
}

impl ReactionChoice {
    /// The status that should be stored after the request, if any.
    pub fn target(&self) -> Option<ReactionStatus> {
        match self {
            ReactionChoice::Interested => Some(ReactionStatus::Interested),
            ReactionChoice::Attending => Some(ReactionStatus::Attending),
            ReactionChoice::None => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionChoice::Interested => "interested",
            ReactionChoice::Attending => "attending",
            ReactionChoice::None => "none",
        }
    }
}

impl FromStr for ReactionChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interested" => Ok(ReactionChoice::Interested),
            "attending" => Ok(ReactionChoice::Attending),
            "none" => Ok(ReactionChoice::None),
            other => Err(DomainError::invalid("reaction status", other)),
        }
    }
}

/// A user's reaction row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Reaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: ReactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Live reaction counts for a single event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub attending: i64,
    pub interested: i64,
}

/// Request payload for reacting to an event.
///
/// The status stays a string so unknown values surface as a validation
/// error rather than a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactRequest {
    pub status: String,
}

impl ReactRequest {
    pub fn choice(&self) -> Result<ReactionChoice, DomainError> {
        self.status.trim().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parsing() {
        assert_eq!(
            "attending".parse::<ReactionChoice>().unwrap(),
            ReactionChoice::Attending
        );
        assert_eq!(
            "interested".parse::<ReactionChoice>().unwrap(),
            ReactionChoice::Interested
        );
        assert_eq!("none".parse::<ReactionChoice>().unwrap(), ReactionChoice::None);
    }

    #[test]
    fn test_choice_rejects_unknown_status() {
        let err = "going".parse::<ReactionChoice>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue { .. }));
    }

    #[test]
    fn test_choice_target() {
        assert_eq!(ReactionChoice::None.target(), None);
        assert_eq!(
            ReactionChoice::Attending.target(),
            Some(ReactionStatus::Attending)
        );
    }

    #[test]
    fn test_react_request_trims_status() {
        let req: ReactRequest = serde_json::from_str(r#"{"status": " interested "}"#).unwrap();
        assert_eq!(req.choice().unwrap(), ReactionChoice::Interested);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ReactionStatus::Attending).unwrap();
        assert_eq!(json, "\"attending\"");
    }
}
