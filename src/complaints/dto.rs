use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use crate::complaints::repo::ComplaintRow;
use crate::error::ApiError;

pub const COMPLAINT_STATUSES: &[&str] = &[
    "new",
    "pending_review",
    "under_investigation",
    "resolved",
    "closed",
    "rejected",
];

pub const PRIORITIES: &[&str] = &["low", "medium", "high"];

pub fn validate_status(status: &str) -> Result<(), ApiError> {
    if COMPLAINT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid complaint status.".into()))
    }
}

pub fn validate_priority(priority: &str) -> Result<(), ApiError> {
    if PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid priority.".into()))
    }
}

/// Distinguishes an absent field from an explicit null, so an admin can
/// unassign a complaint by sending `"assignedToUserId": null`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitComplaintRequest {
    pub complaint_text: Option<String>,
    pub category: Option<String>,
    pub location_description: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageComplaintRequest {
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to_user_id: Option<Option<i32>>,
    pub resolution_details: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComplaintFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
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
pub struct ComplaintView {
    pub id: i32,
    pub complaint_text: String,
    pub category: Option<String>,
    pub location_description: Option<String>,
    pub status: String,
    pub priority: String,
    pub resolution_details: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complainant: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
}

impl From<ComplaintRow> for ComplaintView {
    fn from(r: ComplaintRow) -> Self {
        let complainant = r.complainant_name.map(|name| UserRef {
            id: r.submitted_by_user_id,
            name,
            username: r.complainant_username,
        });
        let assignee = match (r.assigned_to_user_id, r.assignee_name) {
            (Some(id), Some(name)) => Some(UserRef {
                id,
                name,
                username: r.assignee_username,
            }),
            _ => None,
        };
        Self {
            id: r.id,
            complaint_text: r.complaint_text,
            category: r.category,
            location_description: r.location_description,
            status: r.status,
            priority: r.priority,
            resolution_details: r.resolution_details,
            created_at: r.created_at,
            updated_at: r.updated_at,
            complainant,
            assignee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_sets_reject_strays() {
        assert!(validate_status("under_investigation").is_ok());
        assert!(validate_status("escalated").is_err());
        assert!(validate_priority("high").is_ok());
        assert!(validate_priority("urgent").is_err());
    }

    #[test]
    fn assignment_field_distinguishes_null_from_absent() {
        let absent: ManageComplaintRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.assigned_to_user_id, None);

        let null: ManageComplaintRequest =
            serde_json::from_str(r#"{"assignedToUserId": null}"#).unwrap();
        assert_eq!(null.assigned_to_user_id, Some(None));

        let set: ManageComplaintRequest =
            serde_json::from_str(r#"{"assignedToUserId": 12}"#).unwrap();
        assert_eq!(set.assigned_to_user_id, Some(Some(12)));
    }
}
