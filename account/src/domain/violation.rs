//! Field-level constraint failures reported back to clients.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintTag {
    /// The field must be present and non-empty.
    Required,
    /// The field must be a plausible email address.
    Email,
    /// The field length must be greater than or equal to `param`.
    Gte,
    /// The field length must be less than or equal to `param`.
    Lte,
}

impl ConstraintTag {
    /// Wire spelling of the tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Gte => "gte",
            Self::Lte => "lte",
        }
    }
}

impl std::fmt::Display for ConstraintTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field that failed one constraint.
///
/// `value` echoes the submitted string verbatim, passwords included, so
/// clients can correlate the failure with their input.
///
/// # Examples
/// ```
/// use account::domain::{ConstraintTag, FieldViolation};
///
/// let violation = FieldViolation::new("Password", "supe", ConstraintTag::Gte, "6");
/// assert_eq!(violation.tag(), ConstraintTag::Gte);
/// assert_eq!(violation.param(), "6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[schema(example = "Password")]
    field: String,
    #[schema(example = "supe")]
    value: String,
    #[schema(example = "gte")]
    tag: ConstraintTag,
    #[schema(example = "6")]
    param: String,
}

impl FieldViolation {
    /// Build a violation record.
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        tag: ConstraintTag,
        param: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            tag,
            param: param.into(),
        }
    }

    /// Public name of the offending field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Submitted value.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Constraint that failed.
    pub fn tag(&self) -> ConstraintTag {
        self.tag
    }

    /// Constraint threshold, or empty when the constraint takes none.
    pub fn param(&self) -> &str {
        self.param.as_str()
    }
}
