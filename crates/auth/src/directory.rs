use serde::Deserialize;

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One account in the directory.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    /// Name stamped onto movements recorded by this account.
    pub display_name: String,
}

/// In-process account directory. The deployment seeds it from
/// configuration at startup; there is no self-registration.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    accounts: Vec<UserAccount>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        self.accounts.push(UserAccount {
            username: username.into(),
            password: password.into(),
            display_name: display_name.into(),
        });
        self
    }

    /// Constant account lookup; both fields must match exactly.
    pub fn verify(&self, credentials: &Credentials) -> Option<&UserAccount> {
        self.accounts.iter().find(|account| {
            account.username == credentials.username && account.password == credentials.password
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_requires_exact_match() {
        let directory = UserDirectory::new().with_account("admin", "secret", "Administrador");

        assert!(directory
            .verify(&Credentials {
                username: "admin".to_string(),
                password: "secret".to_string(),
            })
            .is_some());
        assert!(directory
            .verify(&Credentials {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            })
            .is_none());
        assert!(directory
            .verify(&Credentials {
                username: "ADMIN".to_string(),
                password: "secret".to_string(),
            })
            .is_none());
    }
}
