use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::profiles::repo::{GardenerListRow, GardenerProfileRecord, StudentProfileRecord};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileSetupRequest {
    pub contact_number: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub year_of_joining: Option<i32>,
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub remove_profile_image: bool,
    pub bio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenerProfileSetupRequest {
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub date_of_joining: Option<Date>,
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub remove_profile_image: bool,
    pub specialization: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileView {
    pub user_id: i32,
    pub contact_number: Option<String>,
    pub department: Option<String>,
    pub semester: Option<String>,
    pub year_of_joining: Option<i32>,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<StudentProfileRecord> for StudentProfileView {
    fn from(p: StudentProfileRecord) -> Self {
        Self {
            user_id: p.user_id,
            contact_number: p.contact_number,
            department: p.department,
            semester: p.semester,
            year_of_joining: p.year_of_joining,
            profile_image_url: p.profile_image_url,
            bio: p.bio,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenerProfileView {
    pub user_id: i32,
    pub contact_number: String,
    pub address: Option<String>,
    pub date_of_joining: Option<Date>,
    pub profile_image_url: Option<String>,
    pub specialization: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<GardenerProfileRecord> for GardenerProfileView {
    fn from(p: GardenerProfileRecord) -> Self {
        Self {
            user_id: p.user_id,
            contact_number: p.contact_number,
            address: p.address,
            date_of_joining: p.date_of_joining,
            profile_image_url: p.profile_image_url,
            specialization: p.specialization,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenerProfileSummary {
    pub contact_number: Option<String>,
    pub specialization: Option<String>,
    pub profile_image_url: Option<String>,
    pub date_of_joining: Option<Date>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenerListItem {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub gardener_profile: Option<GardenerProfileSummary>,
}

impl From<GardenerListRow> for GardenerListItem {
    fn from(r: GardenerListRow) -> Self {
        // A roster row with no profile at all leaves the summary out.
        let has_profile = r.contact_number.is_some()
            || r.specialization.is_some()
            || r.profile_image_url.is_some()
            || r.date_of_joining.is_some();
        let gardener_profile = has_profile.then(|| GardenerProfileSummary {
            contact_number: r.contact_number,
            specialization: r.specialization,
            profile_image_url: r.profile_image_url,
            date_of_joining: r.date_of_joining,
        });
        Self {
            id: r.id,
            name: r.name,
            username: r.username,
            email: r.email,
            created_at: r.created_at,
            gardener_profile,
        }
    }
}
