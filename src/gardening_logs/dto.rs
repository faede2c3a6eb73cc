use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::ApiError;
use crate::gardening_logs::repo::LogRow;

/// Closed set of loggable gardening tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Watered,
    GazedGrass,
    CutPlant,
    ReportedDead,
    Other,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Watered => "watered",
            TaskType::GazedGrass => "gazed_grass",
            TaskType::CutPlant => "cut_plant",
            TaskType::ReportedDead => "reported_dead",
            TaskType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s {
            "watered" => Ok(TaskType::Watered),
            "gazed_grass" => Ok(TaskType::GazedGrass),
            "cut_plant" => Ok(TaskType::CutPlant),
            "reported_dead" => Ok(TaskType::ReportedDead),
            "other" => Ok(TaskType::Other),
            _ => Err(ApiError::BadRequest("Invalid task type.".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTaskRequest {
    pub task_type: Option<String>,
    pub date_of_task: Option<Date>,
    pub area_description: Option<String>,
    pub plant_id: Option<i32>,
    pub notes: Option<String>,
}

/// Task-specific field requirements, checked before anything is stored.
pub fn validate_task_fields(
    task: TaskType,
    area_description: Option<&str>,
    plant_id: Option<i32>,
    notes: Option<&str>,
) -> Result<(), ApiError> {
    let has_area = area_description.map(|s| !s.trim().is_empty()).unwrap_or(false);
    let has_notes = notes.map(|s| !s.trim().is_empty()).unwrap_or(false);

    match task {
        TaskType::ReportedDead if !has_notes => Err(ApiError::BadRequest(
            "Notes are required when reporting a dead/expired plant.".into(),
        )),
        TaskType::Watered | TaskType::CutPlant if !has_area && plant_id.is_none() => {
            Err(ApiError::BadRequest(
                "Area description or Plant ID is required for watering/cutting tasks.".into(),
            ))
        }
        TaskType::GazedGrass if !has_area => Err(ApiError::BadRequest(
            "Area description is required for grass gazing task.".into(),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize)]
pub struct PlantRef {
    pub id: i32,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GardenerRef {
    pub id: i32,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
    pub id: i32,
    pub task_type: String,
    pub date_of_task: Date,
    pub area_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant: Option<PlantRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gardener: Option<GardenerRef>,
}

impl From<LogRow> for LogView {
    fn from(r: LogRow) -> Self {
        let plant = match (r.plant_id, r.plant_name) {
            (Some(id), Some(name)) => Some(PlantRef {
                id,
                name,
                image_url: r.plant_image_url,
            }),
            _ => None,
        };
        let gardener = r.gardener_name.map(|name| GardenerRef {
            id: r.gardener_user_id,
            name,
            username: r.gardener_username.unwrap_or_default(),
        });
        Self {
            id: r.id,
            task_type: r.task_type,
            date_of_task: r.date_of_task,
            area_description: r.area_description,
            notes: r.notes,
            created_at: r.created_at,
            plant,
            gardener,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_dead_requires_notes() {
        let err = validate_task_fields(TaskType::ReportedDead, Some("rose bed"), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("Notes are required"));
        assert!(validate_task_fields(
            TaskType::ReportedDead,
            None,
            None,
            Some("wilted beyond recovery")
        )
        .is_ok());
    }

    #[test]
    fn watering_needs_an_area_or_a_plant() {
        assert!(validate_task_fields(TaskType::Watered, None, None, None).is_err());
        assert!(validate_task_fields(TaskType::Watered, Some("lawn sector A"), None, None).is_ok());
        assert!(validate_task_fields(TaskType::Watered, None, Some(3), None).is_ok());
        assert!(validate_task_fields(TaskType::CutPlant, Some(""), None, None).is_err());
    }

    #[test]
    fn grass_gazing_needs_an_area() {
        assert!(validate_task_fields(TaskType::GazedGrass, None, Some(3), None).is_err());
        assert!(
            validate_task_fields(TaskType::GazedGrass, Some("admin block lawn"), None, None)
                .is_ok()
        );
    }

    #[test]
    fn other_tasks_have_no_extra_requirements() {
        assert!(validate_task_fields(TaskType::Other, None, None, None).is_ok());
    }

    #[test]
    fn task_type_parses_the_closed_set_only() {
        assert_eq!(TaskType::parse("watered").unwrap(), TaskType::Watered);
        assert_eq!(TaskType::parse("gazed_grass").unwrap(), TaskType::GazedGrass);
        assert!(TaskType::parse("mowed").is_err());
        assert!(TaskType::parse("").is_err());
    }
}
