use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::PASSWORD_AUTH_SCHEME;

#[derive(Clone)]
pub struct PasswordAuth {
    password: String,
}

impl PasswordAuth {
    /// `None` when the prompt was cancelled or left empty.
    pub fn from_prompt(input: Option<String>) -> Option<Self> {
        input
            .filter(|password| !password.is_empty())
            .map(|password| Self { password })
    }

    pub fn header_value(&self) -> String {
        format!(
            "{} {}",
            PASSWORD_AUTH_SCHEME,
            STANDARD.encode(self.password.as_bytes())
        )
    }
}

impl fmt::Debug for PasswordAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordAuth")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_or_empty_prompt_is_rejected() {
        assert!(PasswordAuth::from_prompt(None).is_none());
        assert!(PasswordAuth::from_prompt(Some(String::new())).is_none());
    }

    #[test]
    fn header_is_base64_of_password() {
        let auth = PasswordAuth::from_prompt(Some("hunter2".to_string())).unwrap();
        assert_eq!(auth.header_value(), "Password aHVudGVyMg==");
    }

    #[test]
    fn debug_output_hides_password() {
        let auth = PasswordAuth::from_prompt(Some("hunter2".to_string())).unwrap();
        assert!(!format!("{:?}", auth).contains("hunter2"));
    }
}
