//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::reaction::{ReactionCounts, ReactionStatus};
use super::user::Actor;
use crate::error::DomainError;

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(EventStatus::Draft),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(DomainError::invalid("event status", other)),
        }
    }
}

/// Who can see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventVisibility {
    Public,
    Private,
}

impl EventVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventVisibility::Public => "public",
            EventVisibility::Private => "private",
        }
    }
}

/// Event category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// An event as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub venue: String,
    pub location_map_url: String,
    pub visibility: EventVisibility,
    pub status: EventStatus,
    pub capacity: i32,
    pub allow_waitlist: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Owner or admin may mutate the event and its schedules.
    pub fn is_managed_by(&self, actor: &Actor) -> bool {
        actor.is_admin() || actor.user_id == self.organizer_id
    }

    pub fn is_visible_to(&self, actor: Option<&Actor>) -> bool {
        visible_to(self.organizer_id, self.visibility, self.status, actor)
    }
}

/// Public, non-draft events are visible to everyone; anything else only to
/// the organizer and admins.
pub fn visible_to(
    organizer_id: Uuid,
    visibility: EventVisibility,
    status: EventStatus,
    actor: Option<&Actor>,
) -> bool {
    if visibility == EventVisibility::Public && status != EventStatus::Draft {
        return true;
    }
    match actor {
        Some(actor) => actor.is_admin() || actor.user_id == organizer_id,
        None => false,
    }
}

/// An event annotated with live reaction counts and the viewer's own status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventView {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub title: String,
    pub description: String,
    pub category: Option<EventCategory>,
    pub tags: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub venue: String,
    pub location_map_url: String,
    pub visibility: EventVisibility,
    pub status: EventStatus,
    pub capacity: i32,
    pub allow_waitlist: bool,
    pub attending_count: i64,
    pub interested_count: i64,
    pub reaction_status: Option<ReactionStatus>,
    pub is_full: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventView {
    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts {
            attending: self.attending_count,
            interested: self.interested_count,
        }
    }

    pub fn is_visible_to(&self, actor: Option<&Actor>) -> bool {
        visible_to(self.organizer_id, self.visibility, self.status, actor)
    }
}

/// Date bucket filter for event listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    Archived,
    Today,
    Upcoming,
    Ongoing,
}

impl DateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFilter::Archived => "archived",
            DateFilter::Today => "today",
            DateFilter::Upcoming => "upcoming",
            DateFilter::Ongoing => "ongoing",
        }
    }
}

impl FromStr for DateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "archived" => Ok(DateFilter::Archived),
            "today" => Ok(DateFilter::Today),
            "upcoming" => Ok(DateFilter::Upcoming),
            "ongoing" => Ok(DateFilter::Ongoing),
            other => Err(DomainError::invalid("date_filter", other)),
        }
    }
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListEventsQuery {
    /// One of archived, today, upcoming, ongoing
    #[serde(default)]
    pub date_filter: Option<String>,

    /// One of draft, published, cancelled
    #[serde(default)]
    pub status: Option<String>,

    /// Matches title, venue or an exact tag
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Search must be between 1 and 100 characters"))]
    pub search: Option<String>,

    #[serde(default)]
    pub cursor: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl ListEventsQuery {
    pub fn parsed_date_filter(&self) -> Result<Option<DateFilter>, DomainError> {
        self.date_filter.as_deref().map(str::parse).transpose()
    }

    pub fn parsed_status(&self) -> Result<Option<EventStatus>, DomainError> {
        self.status.as_deref().map(str::parse).transpose()
    }
}
