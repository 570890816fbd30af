//! Account sign-up payload

use serde::{Deserialize, Serialize};

/// Sign-up form payload from the landing site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}
