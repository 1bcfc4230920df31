use uuid::Uuid;

/// Authenticated identity for a request.
///
/// Present on every protected route; the display name is what gets stamped
/// onto movements recorded during the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    token: Uuid,
    username: String,
    display_name: String,
}

impl CurrentUser {
    pub fn new(token: Uuid, username: String, display_name: String) -> Self {
        Self {
            token,
            username,
            display_name,
        }
    }

    pub fn token(&self) -> Uuid {
        self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
