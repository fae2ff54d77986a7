use std::{fs, path::Path};

use anyhow::Context;
use onem::{Content, Render, Response, descriptor};
use uuid::Uuid;

/// Renders the descriptor at `input`.
///
/// The correlation id is taken from `corr_id`, then from the descriptor, and
/// generated as a UUIDv4 when neither has one.
pub fn render(
    input: &Path,
    corr_id: Option<String>,
    pretty: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let desc = descriptor::load(input)?;
    let corr_id = corr_id
        .or_else(|| desc.corr_id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!("rendering {} with corr_id {corr_id}", input.display());

    let content = desc
        .into_content()
        .with_context(|| format!("Invalid screen in {}", input.display()))?;
    let response = Response::new(content, corr_id);

    let text = if pretty {
        serde_json::to_string_pretty(&response.as_data())?
    } else {
        response.as_json()
    };
    write_output(output, &text)
}

/// Validates the descriptor at `input` and describes what it holds.
pub fn check(input: &Path) -> anyhow::Result<String> {
    let content = descriptor::load(input)?
        .into_content()
        .with_context(|| format!("Invalid screen in {}", input.display()))?;

    let (kind, entries) = match &content {
        Content::Menu(menu) => ("menu", menu.body().len()),
        Content::Form(form) => ("form", form.items().len()),
    };
    Ok(format!("{}: {kind} with {entries} entries", input.display()))
}

/// Writes the descriptor JSON Schema.
pub fn schema(output: Option<&Path>) -> anyhow::Result<()> {
    let schema = descriptor::schema()?;
    write_output(output, &serde_json::to_string_pretty(&schema)?)
}

fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("written to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SIGNUP: &str = r#"
corr_id = "from-file"

[content]
type = "form"
url = "/signup"
method = "POST"

[[content.items]]
type = "string"
name = "full_name"
label = "Please send your full name"
min_length = 5

[[content.items]]
type = "date"
name = "birthday"
"#;

    fn write_descriptor(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn rendered(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_render_uses_descriptor_corr_id() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_descriptor(dir.path(), "signup.toml", SIGNUP);
        let output = dir.path().join("out.json");

        render(&input, None, false, Some(&output)).unwrap();

        let data = rendered(&output);
        assert_eq!(data["corr_id"], "from-file");
        assert_eq!(data["content_type"], "form");
        assert_eq!(data["content"]["body"][0]["validation"]["min_length"], 5);
    }

    #[test]
    fn test_render_flag_overrides_corr_id() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_descriptor(dir.path(), "signup.toml", SIGNUP);
        let output = dir.path().join("out.json");

        render(&input, Some("from-flag".into()), true, Some(&output)).unwrap();

        assert_eq!(rendered(&output)["corr_id"], "from-flag");
    }

    #[test]
    fn test_render_generates_corr_id() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_descriptor(
            dir.path(),
            "menu.json",
            r#"{"content": {"type": "menu", "body": [{"label": "Hi", "url": "/hi"}]}}"#,
        );
        let output = dir.path().join("out.json");

        render(&input, None, false, Some(&output)).unwrap();

        let corr_id = rendered(&output)["corr_id"].as_str().unwrap().to_string();
        assert!(Uuid::parse_str(&corr_id).is_ok());
    }

    #[test]
    fn test_check_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_descriptor(dir.path(), "signup.toml", SIGNUP);

        let summary = check(&input).unwrap();
        assert!(summary.ends_with("form with 2 entries"));
    }

    #[test]
    fn test_check_reports_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_descriptor(
            dir.path(),
            "bad.toml",
            "[content]\ntype = \"form\"\nurl = \"https://elsewhere.example/x\"\n\n[[content.items]]\ntype = \"date\"\nname = \"d\"\n",
        );

        let err = check(&input).unwrap_err();
        assert!(format!("{err:#}").contains("invalid callback url"));
    }

    #[test]
    fn test_schema_written() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("schema.json");

        schema(Some(&output)).unwrap();

        assert!(rendered(&output).is_object());
    }
}
