use super::*;
use pretty_assertions::assert_eq;

fn plain() -> FixerOption {
    FixerOption::new("foo", "Bar.", true, None).unwrap()
}

fn optional(default: impl Into<OptionValue>) -> FixerOption {
    FixerOption::new("foo", "Bar.", false, Some(default.into())).unwrap()
}

// ─── Declaration ───

#[test]
fn name_and_description() {
    let option = plain();
    assert_eq!(option.name(), "foo");
    assert_eq!(option.description(), "Bar.");
    assert!(option.is_required());
}

#[test]
fn default_value() {
    assert!(!plain().has_default());
    assert_eq!(plain().default(), Err(OptionError::NoDefault));
    assert_eq!(
        plain().default().unwrap_err().to_string(),
        "No default value defined."
    );

    let option = optional("baz");
    assert!(option.has_default());
    assert_eq!(option.default(), Ok(&OptionValue::from("baz")));
}

#[test]
fn required_with_default_is_rejected() {
    let err = FixerOption::new("foo", "Bar.", true, Some(false.into())).unwrap_err();
    assert_eq!(err, OptionError::RequiredWithDefault);
    assert_eq!(err.to_string(), "Required options cannot have a default value.");
}

#[test]
fn allowed_types() {
    assert_eq!(plain().allowed_types(), None);
    let option = plain().with_allowed_types(["bool"]);
    assert_eq!(option.allowed_types(), Some(&["bool".to_owned()][..]));
    let option = plain().with_allowed_types(["bool", "string"]);
    assert_eq!(
        option.allowed_types(),
        Some(&["bool".to_owned(), "string".to_owned()][..])
    );
}

#[test]
fn allowed_values() {
    assert!(plain().allowed_values().is_none());

    let option =
        plain().with_allowed_values([AllowedValue::from("baz"), AllowedValue::from("qux")]);
    let values = option.allowed_values().unwrap();
    assert_eq!(values.len(), 2);
    assert!(matches!(&values[0], AllowedValue::Literal(OptionValue::String(s)) if s == "baz"));

    let option = plain().with_allowed_values([AllowedValue::validator(|_| true)]);
    let values = option.allowed_values().unwrap();
    assert_eq!(values.len(), 1);
    assert!(matches!(values[0], AllowedValue::Validator(_)));
}

#[test]
fn normalizer() {
    assert!(plain().normalizer().is_none());
    assert!(plain().with_normalizer(|value| value).normalizer().is_some());
}

// ─── Resolution ───

#[test]
fn missing_value_uses_default() {
    assert_eq!(optional(true).resolve(None), Ok(OptionValue::Bool(true)));
}

#[test]
fn missing_required_value() {
    assert_eq!(
        plain().resolve(None),
        Err(OptionError::Missing {
            option: "foo".to_owned()
        })
    );
}

#[test]
fn optional_without_default_cannot_resolve_nothing() {
    let option = FixerOption::new("foo", "Bar.", false, None).unwrap();
    assert_eq!(option.resolve(None), Err(OptionError::NoDefault));
}

#[test]
fn type_mismatch() {
    let option = plain().with_allowed_types(["bool", "string[]"]);
    assert_eq!(option.resolve(Some(true.into())), Ok(OptionValue::Bool(true)));
    assert!(option.resolve(Some(vec!["a"].into())).is_ok());

    let err = option.resolve(Some(1_i64.into())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The option \"foo\" with value 1 is expected to be of type \"bool\", \"string[]\", but is of type \"int\"."
    );
}

#[test]
fn value_checks_accept_literals_or_validators() {
    let option = plain().with_allowed_values([
        "one".into(),
        AllowedValue::validator(|value| value.as_str().is_some_and(|s| s.starts_with('x'))),
    ]);
    assert!(option.resolve(Some("one".into())).is_ok());
    assert!(option.resolve(Some("xyz".into())).is_ok());
    assert_eq!(
        option.resolve(Some("two".into())).unwrap_err().to_string(),
        "The option \"foo\" with value \"two\" is invalid."
    );
}

#[test]
fn type_check_runs_before_value_check() {
    let option = plain()
        .with_allowed_types(["string"])
        .with_allowed_values([AllowedValue::validator(|_| false)]);
    assert!(matches!(
        option.resolve(Some(1_i64.into())),
        Err(OptionError::InvalidType { .. })
    ));
}

#[test]
fn normalizer_sees_accepted_value() {
    let option = optional("Same")
        .with_allowed_types(["string"])
        .with_normalizer(|value| match value {
            OptionValue::String(s) => OptionValue::String(s.to_lowercase()),
            other => other,
        });
    assert_eq!(option.resolve(None), Ok(OptionValue::from("same")));
    assert_eq!(option.resolve(Some("LOUD".into())), Ok(OptionValue::from("loud")));
}

#[test]
fn debug_hides_closures() {
    let option = plain().with_normalizer(|value| value);
    let rendered = format!("{option:?}");
    assert!(rendered.contains("name: \"foo\""));
    assert!(rendered.contains("normalizer: Some(\"..\")"));
}
