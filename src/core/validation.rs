use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

pub const MAX_PHONE_DIGITS: usize = 10;

pub const DISPOSABLE_DOMAINS: [&str; 5] = [
    "yopmail.com",
    "tempmail.com",
    "mailinator.com",
    "temp-mail.org",
    "guerrillamail.com",
];

pub const NAME_REQUIRED: &str = "Name is required";
pub const CONTACT_REQUIRED: &str = "Either mobile number or email is required";
pub const PHONE_LENGTH: &str = "Mobile number must be exactly 10 digits";
pub const PHONE_FORMAT: &str = "Must be a valid Indian mobile number (without +91/0)";
pub const EMAIL_FORMAT: &str = "Please enter a valid email address";
pub const EMAIL_DISPOSABLE: &str = "Please use a non-disposable email address";

// 印度手機號碼：6-9 開頭，共 10 碼
static INDIAN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("static regex"));
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    PhoneNumber,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::PhoneNumber => "phoneNumber",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

/// Keeps ASCII digits only and truncates to ten characters.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Lowercased substring after the last `@`, if any.
pub fn email_domain(email: &str) -> Option<String> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
}

pub fn is_disposable_domain(domain: &str) -> bool {
    DISPOSABLE_DOMAINS.contains(&domain)
}

pub fn validate_phone(phone: &str) -> Option<&'static str> {
    if phone.chars().count() != MAX_PHONE_DIGITS {
        Some(PHONE_LENGTH)
    } else if !INDIAN_MOBILE.is_match(phone) {
        Some(PHONE_FORMAT)
    } else {
        None
    }
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    // 拋棄式信箱的錯誤優先於格式錯誤
    if email_domain(email).is_some_and(|domain| is_disposable_domain(&domain)) {
        return Some(EMAIL_DISPOSABLE);
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Some(EMAIL_FORMAT);
    }
    None
}

/// Runs the submit-time rule set. The form is valid iff the returned map is
/// empty; several fields may fail at once.
pub fn validate_subscription(full_name: &str, phone: &str, email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if full_name.trim().is_empty() {
        errors.insert(Field::FullName, NAME_REQUIRED.to_string());
    }

    if phone.is_empty() && email.is_empty() {
        errors.insert(Field::PhoneNumber, CONTACT_REQUIRED.to_string());
        errors.insert(Field::Email, CONTACT_REQUIRED.to_string());
    }

    if !phone.is_empty() {
        if let Some(message) = validate_phone(phone) {
            errors.insert(Field::PhoneNumber, message.to_string());
        }
    }

    if !email.is_empty() {
        if let Some(message) = validate_email(email) {
            errors.insert(Field::Email, message.to_string());
        }
    }

    errors
}
