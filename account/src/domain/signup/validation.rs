//! Signup payload validation.
//!
//! Rules are a static table evaluated against every field. Each field reports
//! at most one violation, the first of its constraints that fails, and every
//! failing field is reported in declaration order.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{ConstraintTag, Error, FieldViolation, NewUser};

/// Minimum password length in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;
/// Maximum password length in characters.
pub const PASSWORD_MAX_CHARS: usize = 30;

const EMAIL_MAX_BYTES: usize = 254;
const EMAIL_LOCAL_MAX_BYTES: usize = 64;

/// Raw signup request body for `POST /signUp`.
///
/// Only a JSON object is accepted. Missing fields deserialise as empty
/// strings so they surface as `required` violations; unknown fields are
/// ignored.
///
/// Example JSON:
/// `{"email":"bob@bob.com","password":"avalidpassword"}`
#[derive(Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SignupRequest {
    /// Email address for the new account.
    #[schema(example = "bob@bob.com")]
    pub email: String,
    /// Password, between 6 and 30 characters.
    #[schema(example = "avalidpassword")]
    pub password: String,
}

impl SignupRequest {
    /// Convenience constructor.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

struct SignupRequestVisitor;

impl<'de> Visitor<'de> for SignupRequestVisitor {
    type Value = SignupRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a signup object with `email` and `password` strings")
    }

    // Sequences fall through to the default `visit_seq`, which rejects them.
    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut email: Option<String> = None;
        let mut password: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "email" => {
                    if email.is_some() {
                        return Err(de::Error::duplicate_field("email"));
                    }
                    email = Some(map.next_value()?);
                }
                "password" => {
                    if password.is_some() {
                        return Err(de::Error::duplicate_field("password"));
                    }
                    password = Some(map.next_value()?);
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(SignupRequest {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

impl<'de> Deserialize<'de> for SignupRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SignupRequestVisitor)
    }
}

/// Signup request that failed one or more field constraints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("signup request violates {} constraint(s)", .violations.len())]
pub struct SignupValidationError {
    violations: Vec<FieldViolation>,
}

impl SignupValidationError {
    /// Violations in field declaration order.
    pub fn violations(&self) -> &[FieldViolation] {
        self.violations.as_slice()
    }
}

impl From<SignupValidationError> for Error {
    fn from(value: SignupValidationError) -> Self {
        Error::invalid_arguments(value.violations)
    }
}

#[derive(Debug, Clone, Copy)]
enum Constraint {
    Required,
    Email,
    MinChars(usize),
    MaxChars(usize),
}

impl Constraint {
    fn tag(self) -> ConstraintTag {
        match self {
            Self::Required => ConstraintTag::Required,
            Self::Email => ConstraintTag::Email,
            Self::MinChars(_) => ConstraintTag::Gte,
            Self::MaxChars(_) => ConstraintTag::Lte,
        }
    }

    fn param(self) -> String {
        match self {
            Self::Required | Self::Email => String::new(),
            Self::MinChars(limit) | Self::MaxChars(limit) => limit.to_string(),
        }
    }

    fn holds(self, value: &str) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::Email => is_plausible_email(value),
            Self::MinChars(limit) => value.chars().count() >= limit,
            Self::MaxChars(limit) => value.chars().count() <= limit,
        }
    }
}

struct FieldRule {
    field: &'static str,
    value: fn(&SignupRequest) -> &str,
    constraints: &'static [Constraint],
}

impl FieldRule {
    fn check(&self, request: &SignupRequest) -> Option<FieldViolation> {
        let value = (self.value)(request);
        self.constraints
            .iter()
            .copied()
            .find(|constraint| !constraint.holds(value))
            .map(|constraint| {
                FieldViolation::new(self.field, value, constraint.tag(), constraint.param())
            })
    }
}

fn email_of(request: &SignupRequest) -> &str {
    request.email.as_str()
}

fn password_of(request: &SignupRequest) -> &str {
    request.password.as_str()
}

const SIGNUP_RULES: &[FieldRule] = &[
    FieldRule {
        field: "Email",
        value: email_of,
        constraints: &[Constraint::Required, Constraint::Email],
    },
    FieldRule {
        field: "Password",
        value: password_of,
        constraints: &[
            Constraint::Required,
            Constraint::MinChars(PASSWORD_MIN_CHARS),
            Constraint::MaxChars(PASSWORD_MAX_CHARS),
        ],
    },
];

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dotted domain required: `bob@bob` is rejected.
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, _)) = value.rsplit_once('@') else {
        return false;
    };
    value.len() <= EMAIL_MAX_BYTES
        && local.len() <= EMAIL_LOCAL_MAX_BYTES
        && email_regex().is_match(value)
}

/// Collect every field violation in `request`, in declaration order.
///
/// # Examples
/// ```
/// use account::domain::{ConstraintTag, SignupRequest, signup_violations};
///
/// let violations = signup_violations(&SignupRequest::new("", ""));
/// let tags: Vec<_> = violations.iter().map(|v| (v.field(), v.tag())).collect();
/// assert_eq!(
///     tags,
///     vec![("Email", ConstraintTag::Required), ("Password", ConstraintTag::Required)]
/// );
/// ```
pub fn signup_violations(request: &SignupRequest) -> Vec<FieldViolation> {
    SIGNUP_RULES
        .iter()
        .filter_map(|rule| rule.check(request))
        .collect()
}

/// Validate `request` and turn it into a [`NewUser`].
pub fn validate_signup(request: SignupRequest) -> Result<NewUser, SignupValidationError> {
    let violations = signup_violations(&request);
    if !violations.is_empty() {
        return Err(SignupValidationError { violations });
    }
    let SignupRequest { email, password } = request;
    Ok(NewUser::new(email, password))
}
