use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub app_metadata: Option<serde_json::Value>,
    pub user_metadata: Option<serde_json::Value>,
    pub aud: Option<String>,
    pub iat: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Patient,
    Doctor,
    Admin,
}

impl UserRole {
    /// Doctors and admins may read and act on any patient's data.
    pub fn is_clinical_staff(&self) -> bool {
        match self {
            UserRole::Doctor | UserRole::Admin => true,
            UserRole::Patient => false,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Patient => write!(f, "patient"),
            UserRole::Doctor => write!(f, "doctor"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" => Ok(UserRole::Patient),
            "doctor" => Ok(UserRole::Doctor),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Role claim resolved against the known roles. Unknown or missing roles yield `None`.
    pub fn user_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|role| role.parse().ok())
    }

    pub fn is_clinical_staff(&self) -> bool {
        self.user_role().map_or(false, |role| role.is_clinical_staff())
    }

    /// Patients may only access their own records; staff may access any.
    pub fn can_access_patient(&self, patient_id: &str) -> bool {
        match self.user_role() {
            Some(UserRole::Patient) => self.id == patient_id,
            Some(UserRole::Doctor) | Some(UserRole::Admin) => true,
            None => false,
        }
    }
}
