use serde::Deserialize;

/// Identity established by the authentication guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
    pub is_admin: bool,
}

impl Caller {
    pub fn is_self(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Privilege a route requires from its caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    /// Any authenticated caller.
    #[default]
    Any,
    Admin,
}

impl Privilege {
    pub fn permits(&self, caller: &Caller) -> bool {
        match self {
            Privilege::Any => true,
            Privilege::Admin => caller.is_admin,
        }
    }
}
