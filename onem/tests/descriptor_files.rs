use std::fs;

use onem::{Content, Render, ValidationError, descriptor};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const POLL_TOML: &str = r#"
[content]
type = "form"
header = "Weekly poll"
url = "/poll/answers"

[content.meta]
status_show = false

[[content.items]]
type = "form-menu"
name = "choice"
label = "Choose your preferred option"
meta = { multi_select = true }
body = [
    { label = "First option", value = "first" },
    { label = "Some content here", is_option = false },
    { label = "Second option", value = "second", text_search = "two" },
]

[[content.items]]
type = "datetime"
name = "when"
required = false
"#;

#[test]
fn test_load_toml_file() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poll.toml");
    fs::write(&path, POLL_TOML).unwrap();

    let content = descriptor::load(&path).unwrap().into_content().unwrap();
    let Content::Form(form) = &content else {
        panic!("expected a form, got {content:?}");
    };
    assert_eq!(form.items().len(), 2);

    let data = content.as_data();
    assert_eq!(data["header"], "Weekly poll");
    assert_eq!(data["meta"]["completion_status_show"], false);

    let poll = &data["body"][0];
    assert_eq!(poll["type"], "form-menu");
    assert_eq!(poll["meta"]["multi_select"], true);
    assert_eq!(poll["body"][1]["value"], serde_json::Value::Null);
    assert_eq!(poll["body"][2]["text_search"], "two");

    assert_eq!(data["body"][1]["type"], "datetime");
    assert_eq!(data["body"][1]["required"], false);
}

#[test]
fn test_load_json_matches_toml() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("poll.toml");
    fs::write(&toml_path, POLL_TOML).unwrap();

    let value: toml::Value = toml::from_str(POLL_TOML).unwrap();
    let json_path = dir.path().join("poll.json");
    fs::write(&json_path, serde_json::to_string(&value).unwrap()).unwrap();

    let from_toml = descriptor::load(&toml_path).unwrap().into_content().unwrap();
    let from_json = descriptor::load(&json_path).unwrap().into_content().unwrap();
    assert_eq!(from_toml, from_json);
}

#[test]
fn test_selectable_option_without_value() {
    init_logger();
    let desc = descriptor::parse(
        r#"
[content]
type = "form"
url = "/x"

[[content.items]]
type = "form-menu"
name = "choice"
body = [{ label = "No value" }]
"#,
        "toml",
    )
    .unwrap();

    assert_eq!(
        desc.into_content(),
        Err(ValidationError::MissingOptionValue("No value".into()))
    );
}

#[test]
fn test_missing_file() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let err = descriptor::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
