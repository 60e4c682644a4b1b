//! Simulated authentication
//!
//! A single hardcoded demo login and a registration that mints a fresh
//! profile with a welcome balance. No lockout, no rate limiting.

use crate::error::AuthError;
use crate::models::UserProfile;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password";

const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn authenticate(email: &str, password: &str) -> Result<UserProfile, AuthError> {
    if email != DEMO_EMAIL || password != DEMO_PASSWORD {
        warn!(email, "Login rejected");
        return Err(AuthError::InvalidCredentials);
    }

    info!(email, "Login accepted");

    Ok(UserProfile {
        uid: "u1".to_string(),
        email: DEMO_EMAIL.to_string(),
        display_name: "Alex Thompson".to_string(),
        account_number: "NB-202501002".to_string(),
        balance: Decimal::new(1542050, 2),
        currency: DEFAULT_CURRENCY.to_string(),
        created_at: Utc::now(),
    })
}

pub fn register(form: &RegistrationForm) -> Result<UserProfile, AuthError> {
    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() {
        return Err(AuthError::MissingField("Full name"));
    }
    if email.is_empty() {
        return Err(AuthError::MissingField("Email"));
    }
    if form.password.is_empty() {
        return Err(AuthError::MissingField("Password"));
    }
    if form.password != form.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }

    let created_at = Utc::now();
    let profile = UserProfile {
        uid: Uuid::new_v4().simple().to_string(),
        email: email.to_string(),
        display_name: name.to_string(),
        account_number: account_number_for(created_at.timestamp_millis()),
        // welcome bonus
        balance: Decimal::new(10000, 2),
        currency: DEFAULT_CURRENCY.to_string(),
        created_at,
    };

    info!(uid = %profile.uid, account = %profile.account_number, "Account registered");

    Ok(profile)
}

/// `NB-` followed by the last eight digits of the epoch-millis clock.
fn account_number_for(millis: i64) -> String {
    let digits = millis.to_string();
    let tail = &digits[digits.len().saturating_sub(8)..];
    format!("NB-{}", tail)
}
