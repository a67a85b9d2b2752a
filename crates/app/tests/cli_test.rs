//! End-to-end tests of the subcommands against files on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::{Path, PathBuf};

use netconsole::{AppConfig, AppError, Command, run};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const NATIVE_COLLECTION: &str = r#"{
  "meta": {"networkConsoleCollectionVersion": "1.0"},
  "name": "Demo",
  "auth": {"type": "token", "token": {"token": "secret"}},
  "entries": [
    {
      "name": "Users",
      "auth": {"type": "inherit"},
      "entries": [
        {
          "auth": {"type": "inherit"},
          "request": {"name": "List users", "verb": "GET", "url": "{{base}}/users"}
        }
      ]
    },
    {
      "auth": {"type": "none"},
      "request": {"name": "Health", "verb": "HEAD", "url": "{{base}}/health"}
    }
  ]
}
"#;

const NATIVE_ENVIRONMENTS: &str = r#"{
  "meta": {"networkConsoleEnvironmentVersion": "1.0"},
  "name": "Team",
  "environments": [
    {"name": "dev", "variables": [{"key": "base", "value": "http://localhost"}]},
    {"name": "prod", "variables": [{"key": "base", "value": "https://api.example.com"}]}
  ]
}
"#;

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn run_to_string(command: &Command) -> Result<String, AppError> {
    let mut out = Vec::new();
    run(command, &AppConfig::default(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn detect(path: &Path) -> String {
    run_to_string(&Command::Detect {
        file: path.to_path_buf(),
    })
    .unwrap()
}

#[test]
fn test_formats_lists_every_format() {
    let listing = run_to_string(&Command::Formats).unwrap();
    let ids: Vec<&str> = listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["native", "postman-v2.1", "openapi-v2"]);
    assert!(listing.lines().last().unwrap().ends_with("read-only"));
}

#[test]
fn test_detect_collections_and_environments() {
    let dir = TempDir::new().unwrap();
    let collection = write(&dir, "demo.json", NATIVE_COLLECTION);
    let environments = write(&dir, "team.json", NATIVE_ENVIRONMENTS);

    assert_eq!(detect(&collection), "collection native\n");
    assert_eq!(detect(&environments), "environment native\n");
}

#[test]
fn test_detect_unrecognized_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "notes.txt", "[1, 2, 3]");
    let result = run_to_string(&Command::Detect { file: path });
    assert!(matches!(result, Err(AppError::Unrecognized(_))));
}

#[test]
fn test_tree_shows_inherited_authorization() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "demo.json", NATIVE_COLLECTION);

    let tree = run_to_string(&Command::Tree { file: path }).unwrap();

    assert_eq!(
        tree,
        "Demo/ auth=token\n\
         \x20 Users/ auth=inherit\n\
         \x20   List users [GET {{base}}/users] auth=token inherited from Demo\n\
         \x20 Health [HEAD {{base}}/health] auth=none\n\
         1 containers, 2 items, depth 2\n"
    );
}

#[test]
fn test_convert_to_postman_and_back() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "demo.json", NATIVE_COLLECTION);
    let postman = dir.path().join("demo.postman.json");

    run_to_string(&Command::Convert {
        file: source,
        to: Some("postman-v2.1".to_string()),
        output: Some(postman.clone()),
    })
    .unwrap();
    assert_eq!(detect(&postman), "collection postman-v2.1\n");

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&postman).unwrap()).unwrap();
    assert_eq!(written["info"]["name"], "Demo");
    assert_eq!(written["auth"]["type"], "bearer");
    assert_eq!(written["item"][1]["request"]["auth"]["type"], "noauth");

    let native = run_to_string(&Command::Convert {
        file: postman,
        to: None,
        output: None,
    })
    .unwrap();
    let native: Value = serde_json::from_str(&native).unwrap();
    let original: Value = serde_json::from_str(NATIVE_COLLECTION).unwrap();
    assert_eq!(native["entries"][0]["entries"][0]["request"]["url"], "{{base}}/users");
    assert_eq!(native["auth"], original["auth"]);
    assert_eq!(native["entries"][1]["auth"], original["entries"][1]["auth"]);
}

#[test]
fn test_convert_to_read_only_format_fails() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "demo.json", NATIVE_COLLECTION);
    let output = dir.path().join("out.json");

    let result = run_to_string(&Command::Convert {
        file: source,
        to: Some("openapi-v2".to_string()),
        output: Some(output.clone()),
    });

    assert!(matches!(result, Err(AppError::Adapter(_))));
    assert!(!output.exists());
}

#[test]
fn test_convert_to_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "demo.json", NATIVE_COLLECTION);
    let result = run_to_string(&Command::Convert {
        file: source,
        to: Some("har".to_string()),
        output: None,
    });
    assert!(matches!(result, Err(AppError::UnknownFormat(format)) if format == "har"));
}

#[test]
fn test_convert_env_selects_by_name() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "team.json", NATIVE_ENVIRONMENTS);

    let postman = run_to_string(&Command::ConvertEnv {
        file: source.clone(),
        to: "postman-v2.1".to_string(),
        select: vec!["prod".to_string()],
        output: None,
    })
    .unwrap();
    let postman: Value = serde_json::from_str(&postman).unwrap();
    assert_eq!(postman["name"], "prod");
    assert_eq!(postman["values"][0]["value"], "https://api.example.com");

    let too_many = run_to_string(&Command::ConvertEnv {
        file: source.clone(),
        to: "postman-v2.1".to_string(),
        select: Vec::new(),
        output: None,
    });
    assert!(matches!(too_many, Err(AppError::Adapter(_))));

    let unknown = run_to_string(&Command::ConvertEnv {
        file: source,
        to: "native".to_string(),
        select: vec!["qa".to_string()],
        output: None,
    });
    assert!(matches!(unknown, Err(AppError::UnknownEnvironment(name)) if name == "qa"));
}

#[test]
fn test_document_size_limit() {
    let dir = TempDir::new().unwrap();
    let source = write(&dir, "demo.json", NATIVE_COLLECTION);
    let config = AppConfig {
        max_document_size: 16,
        ..AppConfig::default()
    };

    let mut out = Vec::new();
    let result = run(&Command::Tree { file: source }, &config, &mut out);

    assert!(matches!(
        result,
        Err(AppError::TooLarge { size, max: 16, .. }) if size == NATIVE_COLLECTION.len()
    ));
    assert!(out.is_empty());
}
