//! Login credentials and the outcomes of checking them.
//!
//! The blog has a single author whose username and password come from
//! configuration. Submitted credentials are compared exactly (case-sensitive,
//! no trimming) so the configured pair is the only accepted input.

use zeroize::Zeroizing;

/// Username/password pair, either submitted by a client or configured at
/// startup.
///
/// # Examples
/// ```
/// use flaskr::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin", "admin");
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "admin");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username exactly as provided.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as provided.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Check `submitted` against these (configured) credentials.
    ///
    /// The username is checked first so a wrong username is reported as such
    /// even when the password also differs.
    pub fn verify(&self, submitted: &LoginCredentials) -> Result<(), LoginFailure> {
        if submitted.username() != self.username() {
            return Err(LoginFailure::InvalidUsername);
        }
        if submitted.password() != self.password() {
            return Err(LoginFailure::InvalidPassword);
        }
        Ok(())
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reasons a login attempt is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginFailure {
    /// The submitted username does not match the configured one.
    #[error("Invalid username")]
    InvalidUsername,
    /// The username matched but the password did not.
    #[error("Invalid password")]
    InvalidPassword,
}
