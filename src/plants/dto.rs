use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::plants::repo::{GalleryRow, PlantRecord};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlantRequest {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub area: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlantRequest {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub area: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantView {
    pub id: i32,
    pub name: String,
    pub scientific_name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub area: Option<String>,
    pub quantity: i32,
    pub added_by: i32,
    pub created_at: OffsetDateTime,
}

impl From<PlantRecord> for PlantView {
    fn from(p: PlantRecord) -> Self {
        Self {
            id: p.id,
            name: p.name,
            scientific_name: p.scientific_name,
            description: p.description,
            image_url: p.image_url,
            area: p.area,
            quantity: p.quantity,
            added_by: p.added_by,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: i32,
    pub name: String,
    pub scientific_name: String,
    pub image_url: Option<String>,
}

impl From<GalleryRow> for GalleryItem {
    fn from(r: GalleryRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            scientific_name: r.scientific_name,
            image_url: r.image_url,
        }
    }
}
