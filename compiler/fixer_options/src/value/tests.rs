use super::*;
use pretty_assertions::assert_eq;

#[test]
fn type_names() {
    assert_eq!(OptionValue::Null.type_name(), "null");
    assert_eq!(OptionValue::from(true).type_name(), "bool");
    assert_eq!(OptionValue::from(1_i64).type_name(), "int");
    assert_eq!(OptionValue::from(1.5_f64).type_name(), "float");
    assert_eq!(OptionValue::from("a").type_name(), "string");
    assert_eq!(OptionValue::from(vec!["a"]).type_name(), "array");
}

#[test]
fn typed_lists() {
    let names = OptionValue::from(vec!["a", "b"]);
    assert!(names.is_of_type("array"));
    assert!(names.is_of_type("string[]"));
    assert!(!names.is_of_type("bool[]"));
    assert!(OptionValue::List(Vec::new()).is_of_type("bool[]"));
    assert!(!OptionValue::from("a").is_of_type("string[]"));
    assert!(OptionValue::Null.is_of_type("mixed"));
}

#[test]
fn display() {
    let value = OptionValue::List(vec![
        OptionValue::Null,
        true.into(),
        3_i64.into(),
        2.0_f64.into(),
        "x".into(),
    ]);
    assert_eq!(value.to_string(), "[null, true, 3, 2.0, \"x\"]");
}

#[test]
fn accessors() {
    assert_eq!(OptionValue::from(false).as_bool(), Some(false));
    assert_eq!(OptionValue::from("a").as_str(), Some("a"));
    assert_eq!(OptionValue::from(1_i64).as_str(), None);
    assert_eq!(
        OptionValue::from(vec![1_i64]).as_list(),
        Some(&[OptionValue::Int(1)][..])
    );
}
