use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::events::repo::{EventRecord, EventWithCreatorRow};

/// Fields are optional at the parse layer so missing-field errors surface
/// as the contract's 400 message, not a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<Date>,
    pub time: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<Date>,
    pub time: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub remove_image: bool,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatorInfo {
    pub id: i32,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: Date,
    pub time: String,
    pub image_url: Option<String>,
    pub completed: bool,
    pub participant_count: i32,
    pub created_by: i32,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<CreatorInfo>,
}

impl From<EventRecord> for EventView {
    fn from(e: EventRecord) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            location: e.location,
            date: e.date,
            time: e.time,
            image_url: e.image_url,
            completed: e.completed,
            participant_count: e.participant_count,
            created_by: e.created_by,
            created_at: e.created_at,
            creator: None,
        }
    }
}

impl From<EventWithCreatorRow> for EventView {
    fn from(e: EventWithCreatorRow) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            location: e.location,
            date: e.date,
            time: e.time,
            image_url: e.image_url,
            completed: e.completed,
            participant_count: e.participant_count,
            created_by: e.created_by,
            created_at: e.created_at,
            creator: Some(CreatorInfo {
                id: e.created_by,
                name: e.creator_name,
                username: e.creator_username,
            }),
        }
    }
}

/// The three derived buckets of the public event listing.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEvents {
    pub upcoming: Vec<EventView>,
    pub completed: Vec<EventView>,
    pub past_uncompleted: Vec<EventView>,
}

/// Trimmed projection used for a student's joined-events view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedEventView {
    pub id: i32,
    pub title: String,
    pub date: Date,
    pub time: String,
    pub image_url: Option<String>,
    pub completed: bool,
    pub location: String,
}

impl From<EventRecord> for JoinedEventView {
    fn from(e: EventRecord) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            time: e.time,
            image_url: e.image_url,
            completed: e.completed,
            location: e.location,
        }
    }
}
