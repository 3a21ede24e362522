use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use loom_cli::{Args, Command, run};

/// Collects all .loom files from a fixture directory
fn collect_loom_files(dir: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(dir);
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("loom")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_fixtures = collect_loom_files("valid");

    assert!(
        !valid_fixtures.is_empty(),
        "No valid fixtures found in tests/fixtures/valid/"
    );

    let mut failed_fixtures = Vec::new();

    for fixture_path in &valid_fixtures {
        let input = fixture_path.to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!(
            "{}.json",
            fixture_path.file_stem().unwrap().to_string_lossy()
        ));

        let check = args(Command::Check {
            input: input.clone(),
        });
        if let Err(e) = run(&check) {
            failed_fixtures.push((fixture_path.clone(), e));
            continue;
        }

        let graph = args(Command::Graph {
            input,
            output: Some(output_path.to_string_lossy().to_string()),
            active: None,
        });
        if let Err(e) = run(&graph) {
            failed_fixtures.push((fixture_path.clone(), e));
            continue;
        }

        let json = fs::read_to_string(&output_path).expect("Failed to read graph output");
        let value: serde_json::Value = serde_json::from_str(&json).expect("graph is valid JSON");
        assert!(value["nodes"].is_array(), "{}", fixture_path.display());
        assert!(value["edges"].is_array(), "{}", fixture_path.display());
    }

    if !failed_fixtures.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed_fixtures {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid fixture(s) failed unexpectedly",
            failed_fixtures.len()
        );
    }

    println!("✅ All {} valid fixtures passed", valid_fixtures.len());
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let error_fixtures = collect_loom_files("errors");

    assert!(
        !error_fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture_path in &error_fixtures {
        let check = args(Command::Check {
            input: fixture_path.to_string_lossy().to_string(),
        });

        if run(&check).is_ok() {
            unexpectedly_succeeded.push(fixture_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError fixtures that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error fixture(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error fixtures failed as expected",
        error_fixtures.len()
    );
}

#[test]
fn e2e_graph_marks_active_module() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/valid/arrows.loom");
    let output_path = temp_dir.path().join("arrows.json");

    let graph = args(Command::Graph {
        input: input.to_string_lossy().to_string(),
        output: Some(output_path.to_string_lossy().to_string()),
        active: Some("scan".to_string()),
    });
    run(&graph).expect("graph export succeeds");

    let json = fs::read_to_string(&output_path).expect("Failed to read graph output");
    let value: serde_json::Value = serde_json::from_str(&json).expect("graph is valid JSON");
    let active: Vec<_> = value["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .filter(|node| node["active"] == true)
        .map(|node| node["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(active, ["scan"]);
}

#[test]
fn e2e_missing_input_file() {
    let check = args(Command::Check {
        input: "tests/fixtures/does_not_exist.loom".to_string(),
    });

    assert!(run(&check).is_err());
}
