#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginFormState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Inline error: validation hint or "Invalid email or password".
    pub error: Option<String>,
}

impl LoginFormState {
    /// Required fields plus a minimal email shape check. Invalid input never
    /// reaches the network.
    pub fn is_valid(&self) -> bool {
        is_plausible_email(&self.email) && !self.password.is_empty()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: form validity gate.
    #[test]
    fn test_form_validation() {
        let mut form = LoginFormState::default();
        assert!(!form.is_valid());

        form.email = "ash@example.com".to_string();
        assert!(!form.is_valid());

        form.password = "pikachu".to_string();
        assert!(form.is_valid());

        form.email = "not-an-email".to_string();
        assert!(!form.is_valid());

        form.email = "ash@nodot".to_string();
        assert!(!form.is_valid());
    }
}
