//! End-to-end tests for the `rulegen` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const EXAMPLES_MIGRATION: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    public function up(): void
    {
        Schema::create('examples', function (Blueprint $table) {
            $table->id();
            $table->string('name')->length(50);
            $table->integer('category_id')->foreign('categories')->references('id');
            $table->timestamps();
        });
    }
};
"#;

const FAILED_JOBS_MIGRATION: &str = r#"<?php
Schema::create('failed_jobs', function (Blueprint $table) {
    $table->id();
    $table->text('payload');
});
"#;

/// A project root with `database/migrations` populated.
fn project() -> TempDir {
    let root = TempDir::new().unwrap();
    let migrations = root.path().join("database/migrations");
    std::fs::create_dir_all(&migrations).unwrap();
    std::fs::write(
        migrations.join("2024_01_01_000000_create_examples_table.php"),
        EXAMPLES_MIGRATION,
    )
    .unwrap();
    std::fs::write(
        migrations.join("2019_08_19_000000_create_failed_jobs_table.php"),
        FAILED_JOBS_MIGRATION,
    )
    .unwrap();
    root
}

fn rulegen(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rulegen").unwrap();
    cmd.current_dir(cwd)
        .env_remove("RULEGEN_CONFIG")
        .env_remove("RULEGEN_OUTPUT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn generate_with_defaults_writes_form_request() {
    let root = project();

    rulegen(root.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Request validation files generated successfully!",
        ));

    let content =
        std::fs::read_to_string(root.path().join("app/Http/Requests/Example/ExampleRequest.php"))
            .unwrap();
    assert!(content.contains("namespace App\\Http\\Requests\\Example;"));
    assert!(content.contains("'name' => ['string', 'max:50', 'required'],"));
    assert!(content.contains("'category_id' => ['integer', 'required', 'exists:categories,id'],"));
    assert!(!root.path().join("app/Http/Requests/FailedJob").exists());
}

#[test]
fn generate_twice_is_byte_identical() {
    let root = project();
    let output = root.path().join("app/Http/Requests/Example/ExampleRequest.php");

    rulegen(root.path()).arg("generate").assert().success();
    let first = std::fs::read(&output).unwrap();
    rulegen(root.path()).arg("generate").assert().success();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_migrations_directory_fails() {
    let root = TempDir::new().unwrap();

    rulegen(root.path())
        .args(["generate", "--migrations", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Migrations directory not found"));
}

#[test]
fn dry_run_writes_nothing() {
    let root = project();

    rulegen(root.path())
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"))
        .stdout(predicate::str::contains("Dry run complete"));

    assert!(!root.path().join("app").exists());
}

#[test]
fn json_format_and_custom_output() {
    let root = project();

    rulegen(root.path())
        .args(["generate", "--format", "json", "--output", "out", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content =
        std::fs::read_to_string(root.path().join("out/Example/ExampleRequest.json")).unwrap();
    assert!(content.contains("\"exists:categories,id\""));
}

#[test]
fn config_file_is_picked_up_from_working_directory() {
    let root = project();
    std::fs::write(
        root.path().join("rulegen.toml"),
        "output_dir = \"generated\"\nnamespace = \"Domain\\\\Requests\"\n\n[skip]\ncolumns = [\"id\", \"name\"]\n",
    )
    .unwrap();

    rulegen(root.path()).arg("generate").assert().success();

    let content =
        std::fs::read_to_string(root.path().join("generated/Example/ExampleRequest.php")).unwrap();
    assert!(content.contains("namespace Domain\\Requests\\Example;"));
    assert!(!content.contains("'name'"));
}

#[test]
fn config_namespace_with_trailing_backslash_renders_valid_namespace() {
    let root = project();
    std::fs::write(
        root.path().join("rulegen.toml"),
        "namespace = \"Domain\\\\Requests\\\\\"\n",
    )
    .unwrap();

    rulegen(root.path()).arg("generate").assert().success();

    let content =
        std::fs::read_to_string(root.path().join("app/Http/Requests/Example/ExampleRequest.php"))
            .unwrap();
    assert!(content.contains("namespace Domain\\Requests\\Example;"));
}

#[test]
fn invalid_config_namespace_fails() {
    let root = project();
    std::fs::write(root.path().join("rulegen.toml"), "namespace = \"1Domain\"\n").unwrap();

    rulegen(root.path())
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn continue_on_error_still_exits_non_zero() {
    let root = project();
    std::fs::write(
        root.path().join("database/migrations/2020_01_01_broken.php"),
        [0xffu8, 0xfe, 0x00],
    )
    .unwrap();

    rulegen(root.path())
        .args(["generate", "--continue-on-error"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed:"))
        .stderr(predicate::str::contains("could not be processed"));

    assert!(
        root.path()
            .join("app/Http/Requests/Example/ExampleRequest.php")
            .exists()
    );
}

#[test]
fn generate_from_schema_document() {
    let root = TempDir::new().unwrap();
    std::fs::write(
        root.path().join("schema.json"),
        r#"{ "tables": [ { "name": "tags", "columns": [
            { "name": "label", "type": "string", "length": 40, "unique": true }
        ] } ] }"#,
    )
    .unwrap();

    rulegen(root.path())
        .args(["generate", "--schema", "schema.json"])
        .assert()
        .success();

    let content =
        std::fs::read_to_string(root.path().join("app/Http/Requests/Tag/TagRequest.php")).unwrap();
    assert!(content.contains("'label' => ['string', 'max:40', 'required', 'unique:tags,label'],"));
}

#[test]
fn inspect_prints_rules() {
    let root = project();

    rulegen(root.path())
        .args([
            "inspect",
            "database/migrations/2024_01_01_000000_create_examples_table.php",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Table examples"))
        .stdout(predicate::str::contains("name => string|max:50|required"))
        .stdout(predicate::str::contains(
            "category_id => integer|required|exists:categories,id",
        ));
}

#[test]
fn inspect_reports_skipped_table() {
    let root = project();

    rulegen(root.path())
        .args([
            "inspect",
            "database/migrations/2019_08_19_000000_create_failed_jobs_table.php",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("skip-listed"));
}
