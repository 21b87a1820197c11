//! Account entities
//!
//! Account types carry a fixed set of resource flags; every user belongs to
//! exactly one type and a session token identifies a logged-in user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for an account type
    TypeAccountId
);
entity_id!(
    /// Unique identifier for a user
    UserId
);

/// Resource flags granted by an account type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resources {
    pub add_company: bool,
    pub add_part: bool,
    pub add_analyze: bool,
    pub add_equip: bool,
    pub add_entry: bool,
    pub add_equip_type: bool,
    pub tecnico: bool,
    pub add_accessories: bool,
    pub add_user: bool,
    pub add_type_account: bool,
}

impl Resources {
    /// Every flag set; used for the bootstrap administrator
    pub fn all() -> Self {
        Self {
            add_company: true,
            add_part: true,
            add_analyze: true,
            add_equip: true,
            add_entry: true,
            add_equip_type: true,
            tecnico: true,
            add_accessories: true,
            add_user: true,
            add_type_account: true,
        }
    }

    pub fn allows(&self, resource: Resource) -> bool {
        match resource {
            Resource::AddCompany => self.add_company,
            Resource::AddPart => self.add_part,
            Resource::AddAnalyze => self.add_analyze,
            Resource::AddEquip => self.add_equip,
            Resource::AddEntry => self.add_entry,
            Resource::AddEquipType => self.add_equip_type,
            Resource::Tecnico => self.tecnico,
            Resource::AddAccessories => self.add_accessories,
            Resource::AddUser => self.add_user,
            Resource::AddTypeAccount => self.add_type_account,
        }
    }
}

/// A single permission checked by a write route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    AddCompany,
    AddPart,
    AddAnalyze,
    AddEquip,
    AddEntry,
    AddEquipType,
    Tecnico,
    AddAccessories,
    AddUser,
    AddTypeAccount,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::AddCompany => "addCompany",
            Resource::AddPart => "addPart",
            Resource::AddAnalyze => "addAnalyze",
            Resource::AddEquip => "addEquip",
            Resource::AddEntry => "addEntry",
            Resource::AddEquipType => "addEquipType",
            Resource::Tecnico => "tecnico",
            Resource::AddAccessories => "addAccessories",
            Resource::AddUser => "addUser",
            Resource::AddTypeAccount => "addTypeAccount",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAccount {
    #[serde(skip)]
    pub id: TypeAccountId,
    pub type_name: String,
    #[serde(rename = "resource")]
    pub resources: Resources,
    #[serde(skip)]
    pub responsible_user: String,
}

#[derive(Debug, Clone)]
pub struct NewTypeAccount {
    pub type_name: String,
    pub resources: Resources,
    pub responsible_user: String,
}

/// Request body for an account type; resource flags sit next to `typeName`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAccountInput {
    pub type_name: Option<String>,
    #[serde(flatten)]
    pub resources: Resources,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub type_account_id: TypeAccountId,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub type_account_id: TypeAccountId,
    pub responsible_user: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub type_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A stored login; only the token hash is kept
#[derive(Debug, Clone)]
pub struct Session {
    pub token_hash: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// The caller resolved from a bearer token, inserted into request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub type_account: TypeAccount,
}

impl AuthenticatedUser {
    pub fn can(&self, resource: Resource) -> bool {
        self.type_account.resources.allows(resource)
    }
}
