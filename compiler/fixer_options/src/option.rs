//! The option descriptor and its resolution rules.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::OptionError;
use crate::value::OptionValue;

/// Predicate accepting or rejecting a candidate value.
pub type Validator = Arc<dyn Fn(&OptionValue) -> bool + Send + Sync>;

/// Rewrites an accepted value into the form the rule consumes.
pub type Normalizer = Arc<dyn Fn(OptionValue) -> OptionValue + Send + Sync>;

/// One entry of an option's allowed values.
#[derive(Clone)]
pub enum AllowedValue {
    Literal(OptionValue),
    Validator(Validator),
}

impl AllowedValue {
    pub fn validator(f: impl Fn(&OptionValue) -> bool + Send + Sync + 'static) -> Self {
        AllowedValue::Validator(Arc::new(f))
    }

    pub fn accepts(&self, value: &OptionValue) -> bool {
        match self {
            AllowedValue::Literal(literal) => literal == value,
            AllowedValue::Validator(validator) => validator(value),
        }
    }
}

impl From<OptionValue> for AllowedValue {
    fn from(value: OptionValue) -> Self {
        AllowedValue::Literal(value)
    }
}

impl From<&str> for AllowedValue {
    fn from(value: &str) -> Self {
        AllowedValue::Literal(value.into())
    }
}

impl From<bool> for AllowedValue {
    fn from(value: bool) -> Self {
        AllowedValue::Literal(value.into())
    }
}

impl From<i64> for AllowedValue {
    fn from(value: i64) -> Self {
        AllowedValue::Literal(value.into())
    }
}

impl fmt::Debug for AllowedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowedValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            AllowedValue::Validator(_) => f.write_str("Validator(..)"),
        }
    }
}

/// Declaration of one rule option.
#[derive(Clone)]
pub struct FixerOption {
    name: String,
    description: String,
    required: bool,
    default: Option<OptionValue>,
    allowed_types: Option<Vec<String>>,
    allowed_values: Option<Vec<AllowedValue>>,
    normalizer: Option<Normalizer>,
}

impl FixerOption {
    /// Declares an option. A required option cannot carry a default.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
        default: Option<OptionValue>,
    ) -> Result<Self, OptionError> {
        if required && default.is_some() {
            return Err(OptionError::RequiredWithDefault);
        }
        Ok(FixerOption {
            name: name.into(),
            description: description.into(),
            required,
            default,
            allowed_types: None,
            allowed_values: None,
            normalizer: None,
        })
    }

    /// Restricts accepted values to the given type names (see
    /// [`OptionValue::is_of_type`]).
    #[must_use]
    pub fn with_allowed_types<S: Into<String>>(
        mut self,
        types: impl IntoIterator<Item = S>,
    ) -> Self {
        self.allowed_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_allowed_values(mut self, values: impl IntoIterator<Item = AllowedValue>) -> Self {
        self.allowed_values = Some(values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_normalizer(
        mut self,
        normalizer: impl Fn(OptionValue) -> OptionValue + Send + Sync + 'static,
    ) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default(&self) -> Result<&OptionValue, OptionError> {
        self.default.as_ref().ok_or(OptionError::NoDefault)
    }

    pub fn allowed_types(&self) -> Option<&[String]> {
        self.allowed_types.as_deref()
    }

    pub fn allowed_values(&self) -> Option<&[AllowedValue]> {
        self.allowed_values.as_deref()
    }

    pub fn normalizer(&self) -> Option<&Normalizer> {
        self.normalizer.as_ref()
    }

    /// The value a rule runs with, given what the user supplied.
    ///
    /// An absent value falls back to the default. The result must then
    /// match an allowed type and an allowed value before the normalizer
    /// sees it.
    pub fn resolve(&self, value: Option<OptionValue>) -> Result<OptionValue, OptionError> {
        let value = match value {
            Some(value) => value,
            None if self.required => {
                return Err(OptionError::Missing {
                    option: self.name.clone(),
                })
            }
            None => self.default()?.clone(),
        };

        if let Some(types) = &self.allowed_types {
            if !types.iter().any(|ty| value.is_of_type(ty)) {
                return Err(OptionError::InvalidType {
                    option: self.name.clone(),
                    value: value.to_string(),
                    expected: types.join("\", \""),
                    actual: value.type_name(),
                });
            }
        }

        if let Some(allowed) = &self.allowed_values {
            if !allowed.iter().any(|entry| entry.accepts(&value)) {
                return Err(OptionError::InvalidValue {
                    option: self.name.clone(),
                    value: value.to_string(),
                });
            }
        }

        match &self.normalizer {
            Some(normalize) => {
                trace!(option = %self.name, %value, "normalizing option value");
                Ok(normalize(value))
            }
            None => Ok(value),
        }
    }
}

impl fmt::Debug for FixerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixerOption")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("allowed_types", &self.allowed_types)
            .field("allowed_values", &self.allowed_values)
            .field("normalizer", &self.normalizer.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
