use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::flats::models::Flat;
use crate::shared::validation::{
    email_or_empty, phone_digits, phone_or_empty, required_phone, PHONE_REGEX, UNIT_NUMBER_REGEX,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlatDto {
    #[serde(alias = "building")]
    pub building_id: Uuid,

    #[validate(
        length(min = 1, max = 50, message = "Flat number must be 1-50 characters"),
        regex(path = *UNIT_NUMBER_REGEX, message = "Flat number may only contain letters, digits, '-', '/' and spaces")
    )]
    pub flat_number: String,

    #[validate(length(max = 255, message = "Owner name must be at most 255 characters"))]
    pub owner_name: Option<String>,

    #[validate(
        regex(path = *PHONE_REGEX, message = "Invalid owner phone number"),
        custom(function = "phone_digits")
    )]
    pub owner_phone: String,

    #[validate(custom(function = "email_or_empty"))]
    pub owner_email: Option<String>,

    #[validate(length(max = 255, message = "Renter name must be at most 255 characters"))]
    pub renter_name: Option<String>,

    #[validate(custom(function = "phone_or_empty"))]
    pub renter_phone: Option<String>,

    #[validate(custom(function = "email_or_empty"))]
    pub renter_email: Option<String>,

    /// Occupied (default: false)
    #[serde(default)]
    pub status: bool,
}

/// Partial update: omitted fields stay as they are, an empty string clears
/// an optional contact field. Building and flat number cannot change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlatDto {
    #[validate(length(max = 255, message = "Owner name must be at most 255 characters"))]
    pub owner_name: Option<String>,

    #[validate(custom(function = "required_phone"))]
    pub owner_phone: Option<String>,

    #[validate(custom(function = "email_or_empty"))]
    pub owner_email: Option<String>,

    #[validate(length(max = 255, message = "Renter name must be at most 255 characters"))]
    pub renter_name: Option<String>,

    #[validate(custom(function = "phone_or_empty"))]
    pub renter_phone: Option<String>,

    #[validate(custom(function = "email_or_empty"))]
    pub renter_email: Option<String>,

    pub status: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlatResponseDto {
    pub id: Uuid,
    pub building_id: Uuid,
    pub building_number: String,
    pub flat_number: String,
    pub owner_name: Option<String>,
    pub owner_phone: String,
    pub owner_email: Option<String>,
    pub renter_name: Option<String>,
    pub renter_phone: Option<String>,
    pub renter_email: Option<String>,
    /// Occupied
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Flat> for FlatResponseDto {
    fn from(flat: Flat) -> Self {
        Self {
            id: flat.id,
            building_id: flat.building_id,
            building_number: flat.building_number,
            flat_number: flat.flat_number,
            owner_name: flat.owner_name,
            owner_phone: flat.owner_phone,
            owner_email: flat.owner_email,
            renter_name: flat.renter_name,
            renter_phone: flat.renter_phone,
            renter_email: flat.renter_email,
            status: flat.status,
            created_at: flat.created_at,
            updated_at: flat.updated_at,
        }
    }
}

/// Stored form of a flat number: trimmed and upper-cased
pub fn normalize_flat_number(value: &str) -> String {
    value.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_accepts_legacy_building_key() {
        let building = Uuid::new_v4();
        let dto: CreateFlatDto = serde_json::from_value(json!({
            "building": building,
            "flatNumber": "a-1",
            "ownerPhone": "01711223344"
        }))
        .unwrap();

        assert_eq!(dto.building_id, building);
        assert!(!dto.status);
        assert!(dto.validate().is_ok());
        assert_eq!(normalize_flat_number(" a-1 "), "A-1");
    }

    #[test]
    fn test_create_rejects_bad_contacts() {
        let dto: CreateFlatDto = serde_json::from_value(json!({
            "buildingId": Uuid::new_v4(),
            "flatNumber": "A1",
            "ownerPhone": "not a phone",
            "renterEmail": "nope"
        }))
        .unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("owner_phone"));
        assert!(fields.contains_key("renter_email"));
    }

    #[test]
    fn test_update_allows_clearing_renter() {
        let dto: UpdateFlatDto = serde_json::from_value(json!({
            "renterName": "",
            "renterPhone": "",
            "renterEmail": "",
            "status": false
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        let dto: UpdateFlatDto = serde_json::from_value(json!({ "ownerPhone": "  " })).unwrap();
        assert!(dto.validate().is_err());
    }
}
