use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::equipment::repo::EquipmentRow;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEquipmentRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdderRef {
    pub id: i32,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentView {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub description: Option<String>,
    pub added_by_user_id: i32,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adder: Option<AdderRef>,
}

impl From<EquipmentRow> for EquipmentView {
    fn from(r: EquipmentRow) -> Self {
        let adder = match (r.adder_name, r.adder_username) {
            (Some(name), Some(username)) => Some(AdderRef {
                id: r.added_by_user_id,
                name,
                username,
            }),
            _ => None,
        };
        Self {
            id: r.id,
            name: r.name,
            image_url: r.image_url,
            description: r.description,
            added_by_user_id: r.added_by_user_id,
            created_at: r.created_at,
            adder,
        }
    }
}
