use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Flat row joined with its building number
#[derive(Debug, Clone, FromRow)]
pub struct Flat {
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
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flat {
    /// Resident sign-in accepts either the owner's or the renter's phone.
    pub fn has_phone(&self, phone: &str) -> bool {
        let phone = phone.trim();
        self.owner_phone == phone || self.renter_phone.as_deref() == Some(phone)
    }
}
