use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single user entry in the dashboard's in-memory collection.
///
/// Only `id`, `name`, `email`, `phone` and `address` are entity attributes.
/// The optional [`ActivityProfile`] is fixture data attached by the data source
/// for display and status filtering; it takes no part in equality.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Record {
    /// Unique, positive and immutable identifier
    pub id: u32,

    /// Display name (never empty)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityProfile>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zipcode: String,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    /// Strict parse used by the loaders; query parameters go through `StatusFilter`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }
}

/// Per-user activity figures shown on the user cards and detail page.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProfile {
    pub status: Status,
    pub total_orders: u32,
    pub total_spent: u32,
    pub join_date: NaiveDate,
    pub last_active: NaiveDate,
}

impl Record {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Record {
            id,
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            activity: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_activity(mut self, activity: ActivityProfile) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Status carried by the activity profile, if the source supplied one.
    pub fn status(&self) -> Option<Status> {
        self.activity.as_ref().map(|a| a.status)
    }

    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

// Activity figures are display decorations, so equality stops at the entity attributes.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.email == other.email
            && self.phone == other.phone
            && self.address == other.address
    }
}

impl Eq for Record {}
