use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::feedback::repo::FeedbackRow;

pub const FEEDBACK_STATUSES: &[&str] = &["new", "reviewed", "in_progress", "resolved", "archived"];

pub fn validate_status(status: &str) -> Result<(), ApiError> {
    if FEEDBACK_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid feedback status.".into()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub feedback_text: Option<String>,
    pub rating: Option<i32>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackStatusRequest {
    pub status: Option<String>,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackFilter {
    pub status: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserRef {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub id: i32,
    pub feedback_text: String,
    pub rating: Option<i32>,
    pub category: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<UserRef>,
}

impl From<FeedbackRow> for FeedbackView {
    fn from(r: FeedbackRow) -> Self {
        let submitter = r.submitter_name.map(|name| UserRef {
            id: r.submitted_by_user_id,
            name,
            username: r.submitter_username,
        });
        let resolver = match (r.resolved_by_admin_id, r.resolver_name) {
            (Some(id), Some(name)) => Some(UserRef {
                id,
                name,
                username: r.resolver_username,
            }),
            _ => None,
        };
        Self {
            id: r.id,
            feedback_text: r.feedback_text,
            rating: r.rating,
            category: r.category,
            status: r.status,
            admin_notes: r.admin_notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
            submitter,
            resolver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_set_is_closed() {
        assert!(validate_status("new").is_ok());
        assert!(validate_status("in_progress").is_ok());
        assert!(validate_status("done").is_err());
        assert!(validate_status("").is_err());
    }
}
