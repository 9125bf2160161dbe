//! User accounts

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::client::Resource;
use crate::listing::{FieldValue, Record, RecordId, ResourceDescriptor};
use crate::session::UserProfile;

wire_enum! {
    pub enum UserRole {
        Admin => "ADMIN",
        Ranger => "RANGER",
        Hiker => "HIKER",
    }
}

wire_enum! {
    pub enum UserStatus {
        Active => "ACTIVE",
        Pending => "PENDING",
        Locked => "LOCKED",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Body of a user create/update
///
/// `password` is only sent when set; the backend keeps the current one on
/// update otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        let mut profile = UserProfile::new(user.id, user.email.clone())
            .with_full_name(user.full_name.clone())
            .with_role(user.role.as_str());
        profile.avatar_url = user.avatar_url.clone();
        profile
    }
}

impl Record for User {
    fn id(&self) -> RecordId {
        self.id.into()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(self.id.into()),
            "fullName" => Some((&self.full_name).into()),
            "email" => Some((&self.email).into()),
            "phone" => Some(self.phone.as_ref().into()),
            "role" => Some(self.role.into()),
            "status" => Some(self.status.into()),
            _ => None,
        }
    }
}

static DESCRIPTOR: LazyLock<ResourceDescriptor> = LazyLock::new(|| {
    ResourceDescriptor::builder(Users::PATH)
        .name("User")
        .searchable(["fullName", "email", "phone"])
        .filterable(["role", "status"])
        .sortable(["fullName", "email", "role", "status"])
        .build()
});

/// `/users`
#[derive(Debug, Clone, Copy)]
pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "users";
    type Record = User;
    type Payload = UserPayload;

    fn descriptor() -> &'static ResourceDescriptor {
        &DESCRIPTOR
    }
}
