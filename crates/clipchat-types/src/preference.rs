use serde::{Deserialize, Serialize};

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

const GUEST_ID: &str = "guest";
const GUEST_NAME: &str = "演示用户";
const GUEST_EMAIL: &str = "demo@example.com";
const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// The single local user. There is no authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn guest() -> Self {
        Self {
            id: GUEST_ID.to_string(),
            username: GUEST_NAME.to_string(),
            email: GUEST_EMAIL.to_string(),
            avatar: Some(avatar_url(GUEST_ID)),
        }
    }

    /// Demo account for `username`; any name is accepted.
    pub fn demo(id: String, username: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            avatar: Some(avatar_url(username)),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.id == GUEST_ID
    }

    /// Overwrite fields that are set in `patch`
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username.filter(|s| !s.trim().is_empty()) {
            self.username = username;
        }
        if let Some(email) = patch.email.filter(|s| !s.trim().is_empty()) {
            self.email = email;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
    }
}

/// Partial update of a `User`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

fn avatar_url(seed: &str) -> String {
    format!("{}{}", AVATAR_BASE, seed)
}
