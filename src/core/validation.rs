#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    Blank,
    Charset,
    Range,
}

impl PasswordError {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordError::Blank => "password is required",
            PasswordError::Charset => "password must contain only ASCII letters and digits",
            PasswordError::Range => "password must be 8 to 16 characters long",
        }
    }
}

/// Password rules applied when registering a new employee.
/// Charset is checked before length.
pub fn check_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Blank);
    }
    if !password.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(PasswordError::Charset);
    }
    if password.len() < 8 || password.len() > 16 {
        return Err(PasswordError::Range);
    }
    Ok(())
}

/// On update an empty password means "keep the stored one" and is not an error.
pub fn check_password_for_update(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Ok(());
    }
    check_password(password)
}
