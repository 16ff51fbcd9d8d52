//! Integration tests for formgen
//!
//! Cover the public validation entry points end to end:
//! - Required / present values
//! - Type-gated comparisons
//! - Message ordering across rules
//! - Repeatable attributes
//! - Message templating (numbers and dates)
//! - Unknown rules
//! - Repeated validation of the same input
//! - Custom rules, configuration, sessions and submission payloads

use chrono::NaiveDate;
use formgen::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn person_schema() -> FormSchema {
    FormSchema::from_json_value(&json!({
        "code": "Person",
        "attributes": [
            {"title": "First name", "code": "firstName", "validation": {"required": true}},
            {"title": "Last name", "code": "lastName", "validation": {"required": true}},
            {"title": "Age", "code": "age", "type": "int"},
            {"title": "Email", "code": "email", "validation": {"email": true}},
            {"title": "Importance", "code": "importance", "type": "enum", "enumType": "ImportanceValue"},
            {"title": "Start date", "code": "startJobAt", "type": "date"},
            {
                "title": "Phone",
                "code": "phone",
                "multiple": true,
                "validation": {"pattern": "^\\+38 \\(\\d{3}\\) \\d{3}-\\d{2}-\\d{2}$"}
            }
        ]
    }))
    .unwrap()
}

fn single(code: &str, rules: serde_json::Value) -> FormSchema {
    FormSchema::from_json_value(&json!({
        "code": "Form",
        "attributes": [{"code": code, "validation": rules}]
    }))
    .unwrap()
}

#[test]
fn test_required_empty_fails() {
    let schema = single("name", json!({"required": true}));
    let data: FormData = [("name", "")].into_iter().collect();

    let result = FormValidator::new().validate(&schema, &data);

    assert!(!result.is_valid);
    assert_eq!(result.message("name"), Some("This field is required"));
}

#[test]
fn test_required_present_passes() {
    let schema = single("name", json!({"required": true}));
    let data: FormData = [("name", "Ann")].into_iter().collect();

    let result = FormValidator::new().validate(&schema, &data);

    assert!(result.is_valid);
    assert_eq!(result.message("name"), Some(""));
}

#[rstest]
#[case("int", 10, false)]
#[case("int", 25, true)]
#[case("float", 17, false)]
#[case("string", 10, true)]
#[case("string", 25, true)]
fn test_min_is_type_gated(#[case] ty: &str, #[case] age: i32, #[case] valid: bool) {
    let schema = FormSchema::from_json_value(&json!({
        "code": "Form",
        "attributes": [{"code": "age", "type": ty, "validation": {"min": 18}}]
    }))
    .unwrap();
    let data: FormData = [("age", age)].into_iter().collect();

    let result = FormValidator::new().validate(&schema, &data);

    assert_eq!(result.is_valid, valid);
}

#[test]
fn test_last_failing_rule_wins() {
    let validator = FormValidator::new();

    // required fails, pattern passes on empty: the required message stays
    let schema = single("code", json!({"required": true, "pattern": "^\\d+$"}));
    let data: FormData = [("code", "")].into_iter().collect();
    let result = validator.validate(&schema, &data);
    assert_eq!(result.message("code"), Some("This field is required"));

    // pattern fails, required passes: the pattern message stays
    let schema = single("code", json!({"pattern": "^\\d+$", "required": true}));
    let data: FormData = [("code", "ab")].into_iter().collect();
    let result = validator.validate(&schema, &data);
    assert_eq!(result.message("code"), Some("Invalid format"));
    assert!(!result.is_valid);
}

#[test]
fn test_both_failing_rules_report_the_later_one() {
    let schema = single("nick", json!({"minlength": 3, "pattern": "^[a-z]+$"}));
    let data: FormData = [("nick", "A")].into_iter().collect();

    let result = FormValidator::new().validate(&schema, &data);
    assert_eq!(result.message("nick"), Some("Invalid format"));

    let config = ValidatorConfig {
        policy: EvaluationPolicy {
            message_order: MessageOrder::First,
            ..EvaluationPolicy::default()
        },
        ..ValidatorConfig::default()
    };
    let result = FormValidator::with_config(&config).validate(&schema, &data);
    assert_eq!(result.message("nick"), Some("Minimum number of characters: 3"));
}

#[test]
fn test_repeatable_attribute() {
    let schema = FormSchema::new("Form").attribute(
        AttributeDescriptor::new("phone")
            .multiple()
            .rule("pattern", r"^\+\d+$"),
    );
    let mut data = FormData::new();
    data.insert("phone", vec!["+123", "bad"]);

    let result = FormValidator::new().validate(&schema, &data);

    assert!(!result.is_valid);
    assert_eq!(
        result.error("phone"),
        Some(&FieldError::Multiple(vec![String::new(), "Invalid format".to_string()]))
    );
}

#[test]
fn test_repeatable_error_length_matches_values() {
    let schema = FormSchema::new("Form").attribute(
        AttributeDescriptor::new("phone")
            .multiple()
            .rule("required", true),
    );

    for len in [0, 1, 4] {
        let mut data = FormData::new();
        data.insert("phone", vec!["x"; len]);
        let result = FormValidator::new().validate(&schema, &data);
        assert_eq!(result.messages("phone").map(<[String]>::len), Some(len));
        assert!(result.is_valid);
    }
}

#[test]
fn test_max_message_renders_parameter() {
    let schema = FormSchema::new("Form").attribute(
        AttributeDescriptor::new("qty")
            .of_type(AttributeType::Int)
            .rule("max", 100),
    );
    let data: FormData = [("qty", 250)].into_iter().collect();

    let result = FormValidator::new().validate(&schema, &data);
    assert_eq!(result.message("qty"), Some("Maximum allowed value: 100"));
}

#[test]
fn test_min_date_message_renders_humanized_date() {
    let schema = FormSchema::from_json_value(&json!({
        "code": "Form",
        "attributes": [{"code": "startJobAt", "type": "date", "validation": {"min": "2020-01-15"}}]
    }))
    .unwrap();
    let data = FormData::from_json_value(&schema, &json!({"startJobAt": "2019-06-01"})).unwrap();

    let result = FormValidator::new().validate(&schema, &data);

    assert!(!result.is_valid);
    assert_eq!(result.message("startJobAt"), Some("Minimum allowed value: 15/01/2020"));

    let data: FormData = [("startJobAt", NaiveDate::from_ymd_opt(2020, 1, 15).unwrap())]
        .into_iter()
        .collect();
    assert!(FormValidator::new().validate(&schema, &data).is_valid);
}

fn early_start() -> FormData {
    [("startJobAt", NaiveDate::from_ymd_opt(2019, 6, 1).unwrap())]
        .into_iter()
        .collect()
}

#[test]
fn test_builder_text_date_bound_renders_humanized_date() {
    let schema = FormSchema::new("Form").attribute(
        AttributeDescriptor::new("startJobAt")
            .of_type(AttributeType::Date)
            .rule("min", "2020-01-15"),
    );

    let result = FormValidator::new().validate(&schema, &early_start());

    assert!(!result.is_valid);
    assert_eq!(result.message("startJobAt"), Some("Minimum allowed value: 15/01/2020"));
}

#[test]
fn test_deserialized_text_date_bound_renders_humanized_date() {
    let schema: FormSchema = serde_json::from_str(
        r#"{"code": "Form", "attributes": [
            {"code": "startJobAt", "type": "date", "validation": {"max": "2019-01-31"}}
        ]}"#,
    )
    .unwrap();

    let result = FormValidator::new().validate(&schema, &early_start());

    assert!(!result.is_valid);
    assert_eq!(result.message("startJobAt"), Some("Maximum allowed value: 31/01/2019"));
}

#[rstest]
#[case(json!(""))]
#[case(json!("anything"))]
#[case(json!(0))]
#[case(json!(null))]
#[case(json!(true))]
fn test_unknown_rule_never_fails(#[case] value: serde_json::Value) {
    let validator = FormValidator::new();
    let result = validator
        .validate_json(
            &json!({"code": "Form", "attributes": [{"code": "x", "validation": {"nonexistent": true}}]}),
            &json!({"x": value}),
        )
        .unwrap();

    assert!(result.is_valid);
    assert_eq!(result.message("x"), Some(""));
    assert_eq!(
        result.unrecognized,
        vec![UnrecognizedRule {
            attribute: "x".to_string(),
            rule: "nonexistent".to_string(),
        }]
    );
}

#[test]
fn test_unknown_rule_can_be_surfaced() {
    let config = ValidatorConfig::from_toml_str("[policy]\nunknown_rules = \"fail\"\n").unwrap();
    let schema = single("x", json!({"requird": true}));
    let data: FormData = [("x", "value")].into_iter().collect();

    let result = FormValidator::with_config(&config).validate(&schema, &data);

    assert!(!result.is_valid);
    assert_eq!(result.message("x"), Some("Unknown validation rule: requird"));
}

#[test]
fn test_validation_is_repeatable() {
    let validator = FormValidator::new();
    let schema = person_schema();
    let state = json!({
        "firstName": "",
        "lastName": "Shevchenko",
        "email": "not-an-email",
        "phone": ["+38 (050) 123-45-67", "050"]
    });
    let data = FormData::from_json_value(&schema, &state).unwrap();

    let first = validator.validate(&schema, &data);
    let second = validator.validate(&schema, &data);

    assert_eq!(first, second);
    assert!(!first.is_valid);
}

#[test]
fn test_errors_from_a_previous_call_do_not_leak() {
    let validator = FormValidator::new();
    let schema = single("name", json!({"required": true}));

    let failed = validator.validate(&schema, &[("name", "")].into_iter().collect());
    assert!(!failed.is_valid);

    let passed = validator.validate(&schema, &[("name", "Ann")].into_iter().collect());
    assert!(passed.is_valid);
    assert_eq!(passed.message("name"), Some(""));
}

#[test]
fn test_person_form() {
    let schema = person_schema();
    let state = json!({
        "firstName": "Taras",
        "lastName": "",
        "age": "",
        "email": "TARAS@Example.com",
        "importance": 2,
        "startJobAt": "",
        "phone": ["+38 (050) 123-45-67", "+38 050 1234567"]
    });

    let result = FormValidator::new()
        .validate_json(&serde_json::to_value(&schema).unwrap(), &state)
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "isValid": false,
            "firstName": "",
            "lastName": "This field is required",
            "email": "",
            "phone": ["", "Invalid format"]
        })
    );
    assert_eq!(result.failed_attributes(), vec!["lastName", "phone"]);
}

#[test]
fn test_custom_validator() {
    let mut validator = FormValidator::new();
    validator.add_validator(
        "startsWith",
        |value: &Value, prefix: &RuleParam, _: AttributeType| {
            !value.is_truthy() || value.to_string().starts_with(&prefix.to_string())
        },
        "Must start with $$startsWith$$",
    );

    let schema = single("sku", json!({"required": true, "startsWith": "SKU-"}));

    let result = validator.validate(&schema, &[("sku", "ABC-1")].into_iter().collect());
    assert_eq!(result.message("sku"), Some("Must start with SKU-"));
    assert!(result.unrecognized.is_empty());

    let result = validator.validate(&schema, &[("sku", "SKU-1")].into_iter().collect());
    assert!(result.is_valid);
}

#[test]
fn test_localized_messages() {
    let config = ValidatorConfig::from_toml_str(
        r#"
        [messages]
        required = "Обов'язкове поле"
        maxlength = "Максимальна кількість символів: $$maxlength$$"
        "#,
    )
    .unwrap();
    let validator = FormValidator::with_config(&config);
    let schema = FormSchema::new("Form")
        .attribute(AttributeDescriptor::new("firstName").rule("required", true))
        .attribute(AttributeDescriptor::new("city").rule("maxlength", 5));

    let mut data = FormData::new();
    data.insert("firstName", "");
    data.insert("city", "Запоріжжя");

    let result = validator.validate(&schema, &data);
    assert_eq!(result.message("firstName"), Some("Обов'язкове поле"));
    assert_eq!(result.message("city"), Some("Максимальна кількість символів: 5"));
}

#[test]
fn test_session_submit_flow() {
    let schema = FormSchema::new("Person")
        .attribute(AttributeDescriptor::new("firstName").rule("required", true))
        .attribute(AttributeDescriptor::new("age").of_type(AttributeType::Int).rule("min", 18))
        .attribute(AttributeDescriptor::new("startJobAt").of_type(AttributeType::Date))
        .attribute(
            AttributeDescriptor::new("phone")
                .multiple()
                .rule("pattern", r"^\+\d+$"),
        );
    let validator = FormValidator::new();
    let mut session = FormSession::new(&schema);

    let typed = sanitize_numeric_input(AttributeType::Int, "2a", "2");
    session.update_field("age", typed);
    session.add_item("phone");
    session.update_field("phone[0]", "+380");
    session.update_field("phone[1]", "nope");

    let rejected = session.submit(&validator, &schema).unwrap_err();
    assert_eq!(rejected.message("firstName"), Some("This field is required"));
    assert_eq!(rejected.message("age"), Some("Minimum allowed value: 18"));
    assert_eq!(
        session.errors["phone"],
        FieldError::Multiple(vec![String::new(), "Invalid format".to_string()])
    );

    session.remove_item("phone", 1);
    session.update_field("firstName", "Ann");
    session.update_field("age", "30");
    session.update_field("startJobAt", NaiveDate::from_ymd_opt(2021, 9, 1).unwrap());

    let payload = session.submit(&validator, &schema).unwrap();
    assert_eq!(
        serde_json::Value::Object(payload),
        json!({
            "firstName": "Ann",
            "age": 30,
            "startJobAt": "2021-09-01T12:00:00.000Z",
            "phone": ["+380"]
        })
    );
    assert_eq!(session.errors["phone"], FieldError::Multiple(vec![String::new()]));
}
