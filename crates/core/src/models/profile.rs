use serde::{Deserialize, Serialize};

/// The signed-in user's profile row, including the audit totals the
/// platform maintains on the user record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,

    pub login: String,

    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,

    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,

    /// Total audit points given
    #[serde(rename = "totalUp", default)]
    pub total_up: i64,

    /// Total audit points received
    #[serde(rename = "totalDown", default)]
    pub total_down: i64,

    /// Platform-computed audit ratio, if present
    #[serde(rename = "auditRatio", default)]
    pub audit_ratio: Option<f64>,
}

impl UserProfile {
    /// Display name: "First Last" when both are present, else the login.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => self.login.clone(),
        }
    }
}
