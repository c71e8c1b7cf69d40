mod support;

use std::path::Path;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sql2crud"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("sql2crud binary should run")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn fixture_path(fixture: &str) -> String {
    support::fixture_dir(fixture)
        .join("input.sql")
        .to_string_lossy()
        .into_owned()
}

#[test]
fn missing_input_exits_with_code_2() {
    let output = run_cli(&["--api"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn nonexistent_input_exits_with_code_2() {
    let dir = support::unique_temp_dir("sql2crud_cli_missing");
    let path = dir.join("missing.sql");
    let output = run_cli(&[path.to_str().unwrap(), "--api"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn non_sql_input_exits_with_code_2() {
    let dir = support::unique_temp_dir("sql2crud_cli_txt");
    let path = dir.join("table.txt");
    std::fs::write(&path, support::read_fixture_sql("person")).unwrap();
    let output = run_cli(&[path.to_str().unwrap(), "--api"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn ddl_without_create_line_exits_with_code_2() {
    let dir = support::unique_temp_dir("sql2crud_cli_noschema");
    let path = dir.join("columns.sql");
    std::fs::write(&path, "  id int4 NOT NULL,\n);\n").unwrap();
    let out_dir = dir.join("dist");
    let output = run_cli(&[
        path.to_str().unwrap(),
        "--api",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!out_dir.exists(), "no output should be produced");
}

#[test]
fn no_emitter_selected_exits_with_code_2() {
    let output = run_cli(&[&fixture_path("person")]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn dump_schema_prints_json() {
    let output = run_cli(&[&fixture_path("person"), "--dump-schema"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
    assert_eq!(value["schema_name"], "public");
    assert_eq!(value["table_name"], "person");
    assert_eq!(value["fields"][1]["description"], "Full legal name");
    assert_eq!(value["fields"][2]["not_null"], false);
}

#[test]
fn all_emitters_write_into_output_dir() {
    let dir = support::unique_temp_dir("sql2crud_cli_all");
    let out_dir = dir.join("dist");
    std::fs::create_dir_all(out_dir.join("stale")).unwrap();
    std::fs::write(out_dir.join("stale/old.ts"), "old").unwrap();

    let output = run_cli(&[
        &fixture_path("person"),
        "--api",
        "--sql",
        "--web",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let printed = stdout(&output);
    for (label, subdir, count) in [("API", "api", 7), ("SQL", "sql", 4), ("Web", "www", 10)] {
        let line = format!(
            "{label} generated in {} ({count} files)",
            out_dir.join(subdir).display()
        );
        assert!(printed.contains(&line), "missing `{line}` in:\n{printed}");
    }

    assert!(!out_dir.join("stale").exists(), "previous output should be cleared");
    assert!(out_dir.join("api/person/person.controller.ts").is_file());
    assert!(out_dir.join("sql/public.person_save.sql").is_file());
    assert!(out_dir
        .join("www/person-list/person-list.component.html")
        .is_file());
}

#[test]
fn only_selected_emitters_run() {
    let dir = support::unique_temp_dir("sql2crud_cli_sql_only");
    let out_dir = dir.join("dist");
    let output = run_cli(&[
        &fixture_path("person"),
        "--sql",
        "--output-dir",
        out_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(Path::new(&out_dir).join("sql").is_dir());
    assert!(!out_dir.join("api").exists());
    assert!(!out_dir.join("www").exists());
}
