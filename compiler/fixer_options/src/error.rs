use thiserror::Error;

/// Error returned while declaring or resolving a [`FixerOption`](crate::FixerOption).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Required options cannot have a default value.")]
    RequiredWithDefault,

    #[error("No default value defined.")]
    NoDefault,

    #[error("Missing required option \"{option}\".")]
    Missing { option: String },

    #[error(
        "The option \"{option}\" with value {value} is expected to be of type \"{expected}\", but is of type \"{actual}\"."
    )]
    InvalidType {
        option: String,
        value: String,
        expected: String,
        actual: &'static str,
    },

    #[error("The option \"{option}\" with value {value} is invalid.")]
    InvalidValue { option: String, value: String },
}
