use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Declarative specification of which fields an operation may touch.
///
/// A field's eligibility is a pure function of `(filter, field name)` — there
/// is no ordering dependency between fields. The two-phase user lifecycle
/// relies on this: `exclude({avatar})` at insert and `include({avatar})` at
/// presave together cover every field exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilter {
    /// All fields are eligible.
    Unrestricted,
    /// Only the named fields are eligible.
    Include(BTreeSet<String>),
    /// All fields except the named ones are eligible.
    Exclude(BTreeSet<String>),
}

impl FieldFilter {
    /// Builds an include-list filter from field names.
    pub fn include<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Include(fields.into_iter().map(Into::into).collect())
    }

    /// Builds an exclude-list filter from field names.
    pub fn exclude<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exclude(fields.into_iter().map(Into::into).collect())
    }

    /// Whether an operation under this filter may touch `field`.
    pub fn is_eligible(&self, field: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Include(set) => set.contains(field),
            Self::Exclude(set) => !set.contains(field),
        }
    }
}

impl Default for FieldFilter {
    fn default() -> Self {
        Self::Unrestricted
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrestricted => write!(f, "unrestricted"),
            Self::Include(set) => {
                write!(f, "include(")?;
                for (i, name) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}")?;
                }
                write!(f, ")")
            }
            Self::Exclude(set) => {
                write!(f, "exclude(")?;
                for (i, name) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}")?;
                }
                write!(f, ")")
            }
        }
    }
}
