use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::buildings::models::Building;
use crate::shared::validation::UNIT_NUMBER_REGEX;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingDto {
    #[validate(
        length(min = 1, max = 50, message = "Building number must be 1-50 characters"),
        regex(path = *UNIT_NUMBER_REGEX, message = "Building number may only contain letters, digits, '-', '/' and spaces")
    )]
    pub building_number: String,

    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
}

/// Omitted fields stay as they are; an empty `name` clears it.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuildingDto {
    #[validate(
        length(min = 1, max = 50, message = "Building number must be 1-50 characters"),
        regex(path = *UNIT_NUMBER_REGEX, message = "Building number may only contain letters, digits, '-', '/' and spaces")
    )]
    pub building_number: Option<String>,

    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingResponseDto {
    pub id: Uuid,
    pub building_number: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Building> for BuildingResponseDto {
    fn from(building: Building) -> Self {
        Self {
            id: building.id,
            building_number: building.building_number,
            name: building.name,
            created_at: building.created_at,
            updated_at: building.updated_at,
        }
    }
}
