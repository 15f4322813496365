use chrono::NaiveDateTime;
use serde::Serialize;
use crate::config::{validate, ValueValidator};

/// Reserved `kobo_id` of the singleton administrative user.
pub const ADMIN_KOBO_ID: &str = "KOBO-ADMIN";

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// One column of a table, as reported by the database's own metadata.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

/// The user fields shown when listing users.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UserSummary {
    pub kobo_id: Option<String>,
    pub pin: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// A user row to insert.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewUser {
    /// Row key; `users.id` is text with no default.
    pub id: String,
    pub kobo_id: String,
    pub pin: String,
    pub first_name: String,
    pub surname: String,
    pub business_name: String,
    pub country: String,
    pub business_type: String,
    pub role: Role,
}

/// Placeholder values for the administrative user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminSeed {
    pin: String,
}

impl Default for AdminSeed {
    fn default() -> AdminSeed {
        AdminSeed { pin: "1234".to_owned() }
    }
}

impl AdminSeed {
    pub fn new(pin: &str) -> Result<AdminSeed, String> {
        let pin = pin.to_owned();
        validate::PIN.validate(&pin)?;
        Ok(AdminSeed { pin })
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Build the row to insert, under a freshly generated row key.
    pub fn new_user(&self) -> NewUser {
        NewUser {
            id: uuid::Uuid::new_v4().to_string(),
            kobo_id: ADMIN_KOBO_ID.to_owned(),
            pin: self.pin.clone(),
            first_name: "Super".to_owned(),
            surname: "Admin".to_owned(),
            business_name: "Kobo HQ".to_owned(),
            country: "Nigeria".to_owned(),
            business_type: "Tech".to_owned(),
            role: Role::Admin,
        }
    }
}
