//! Option descriptors for rewrite rules.
//!
//! A rule declares each of its options as a [`FixerOption`]: a name, a
//! description, whether the user must supply it, a default, and the types
//! and values it accepts. [`FixerOption::resolve`] turns a user-supplied
//! value (or its absence) into the value the rule runs with.
//!
//! ```
//! use fixer_options::{AllowedValue, FixerOption, OptionValue};
//!
//! let option = FixerOption::new("spacing", "Spacing to apply.", false, Some("one".into()))
//!     .unwrap()
//!     .with_allowed_types(["string"])
//!     .with_allowed_values([AllowedValue::from("one"), AllowedValue::from("none")]);
//!
//! assert_eq!(option.resolve(None), Ok(OptionValue::from("one")));
//! assert!(option.resolve(Some("two".into())).is_err());
//! ```

mod error;
mod option;
mod value;

pub use error::OptionError;
pub use option::{AllowedValue, FixerOption, Normalizer, Validator};
pub use value::OptionValue;
