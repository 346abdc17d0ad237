use assert_cmd::Command;
use assert_cmd::cargo;
use tempfile::TempDir;

use stylecfg_testkit::sample_files;

fn stylecfg(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("stylecfg"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write(dir: &std::path::Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.output().expect("stylecfg should run");
    assert!(
        out.status.success(),
        "stylecfg failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

#[test]
fn export_writes_document_to_stdout() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::MAGIC_NUMBER_PROFILE_TOML);

    let xml = stdout_of(
        stylecfg(td.path())
            .arg("export")
            .arg("--profile")
            .arg("profile.toml"),
    );

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE module PUBLIC"));
    assert!(xml.contains(
        "<module name=\"MagicNumber\"><property name=\"severity\" value=\"info\"/>\
         <property name=\"ignoreNumbers\" value=\"0,1,2\"/></module>"
    ));
    // Default filters are spliced in; rules from other repositories are not.
    assert!(xml.contains("SuppressionCommentFilter"));
    assert!(!xml.contains("UnusedPrivateField"));
    assert!(!xml.contains("SuppressWarningsHolder"));
}

#[test]
fn export_uses_settings_file_from_working_directory() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::MAGIC_NUMBER_PROFILE_TOML);
    write(td.path(), "stylecfg.toml", sample_files::SUPPRESS_WARNINGS_SETTINGS_TOML);

    let xml = stdout_of(
        stylecfg(td.path())
            .arg("export")
            .arg("--profile")
            .arg("profile.toml"),
    );

    assert!(xml.contains(
        "<module name=\"Checker\"><module name=\"SuppressWarningsFilter\" />"
    ));
    assert!(xml.contains(
        "<module name=\"TreeWalker\"><module name=\"FileContentsHolder\"/>\
         <module name=\"SuppressWarningsHolder\"/><module name=\"MagicNumber\">"
    ));
}

#[test]
fn export_to_file_creates_parent_dirs() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.json", sample_files::JAVADOC_PROFILE_JSON);

    stylecfg(td.path())
        .arg("export")
        .arg("--profile")
        .arg("profile.json")
        .arg("--no-filters")
        .arg("--output")
        .arg("out/checkstyle.xml")
        .assert()
        .success();

    let xml = std::fs::read_to_string(td.path().join("out/checkstyle.xml")).unwrap();
    assert!(xml.ends_with(
        "<module name=\"Checker\"><module name=\"JavadocPackage\">\
         <property name=\"severity\" value=\"warning\"/></module>\
         <module name=\"TreeWalker\"><module name=\"FileContentsHolder\"/></module></module>"
    ));
}

#[test]
fn failed_export_leaves_no_file_behind() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.json", sample_files::JAVADOC_PROFILE_JSON);
    // The target is a directory, so moving the finished document into place fails.
    std::fs::create_dir(td.path().join("checkstyle.xml")).unwrap();

    stylecfg(td.path())
        .arg("export")
        .arg("--profile")
        .arg("profile.json")
        .arg("--output")
        .arg("checkstyle.xml")
        .assert()
        .code(1);

    let mut entries: Vec<_> = std::fs::read_dir(td.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    entries.sort();
    assert_eq!(entries, vec!["checkstyle.xml", "profile.json"]);
    assert!(td.path().join("checkstyle.xml").is_dir());
    assert_eq!(
        std::fs::read_dir(td.path().join("checkstyle.xml")).unwrap().count(),
        0
    );
}

#[test]
fn invalid_profile_does_not_touch_output() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::INVALID_PROFILE_TOML);
    write(td.path(), "checkstyle.xml", "previous");

    stylecfg(td.path())
        .arg("export")
        .arg("--profile")
        .arg("profile.toml")
        .arg("--output")
        .arg("checkstyle.xml")
        .assert()
        .code(1);

    let kept = std::fs::read_to_string(td.path().join("checkstyle.xml")).unwrap();
    assert_eq!(kept, "previous");
}

#[test]
fn export_accepts_mixed_case_severities() {
    let td = TempDir::new().unwrap();
    write(
        td.path(),
        "profile.toml",
        r#"name = "Casing"

[[rule]]
rule_key = "FileLengthCheck"
config_key = "Checker/FileLength"
severity = "Critical"
"#,
    );

    let xml = stdout_of(
        stylecfg(td.path())
            .arg("export")
            .arg("--profile")
            .arg("profile.toml")
            .arg("--no-filters"),
    );
    assert!(xml.contains(
        "<module name=\"FileLength\"><property name=\"severity\" value=\"error\"/></module>"
    ));
}

#[test]
fn export_reads_filters_file() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.json", sample_files::JAVADOC_PROFILE_JSON);
    write(
        td.path(),
        "filters.xml",
        "<module name=\"SuppressWarningsFilter\" />",
    );

    let xml = stdout_of(
        stylecfg(td.path())
            .arg("export")
            .arg("--profile")
            .arg("profile.json")
            .arg("--filters")
            .arg("filters.xml"),
    );

    assert!(xml.contains("<module name=\"SuppressWarningsHolder\"/>"));
    assert!(!xml.contains("SuppressionCommentFilter"));
}

#[test]
fn export_rejects_invalid_profile() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::INVALID_PROFILE_TOML);

    let out = stylecfg(td.path())
        .arg("export")
        .arg("--profile")
        .arg("profile.toml")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("rule 'broken' has an empty config key"));
}

#[test]
fn filters_and_no_filters_conflict() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.json", sample_files::JAVADOC_PROFILE_JSON);

    stylecfg(td.path())
        .arg("export")
        .arg("--profile")
        .arg("profile.json")
        .arg("--no-filters")
        .arg("--filters")
        .arg("filters.xml")
        .assert()
        .code(2);
}

#[test]
fn rules_lists_placement_in_document_order() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::MAGIC_NUMBER_PROFILE_TOML);

    let text = stdout_of(
        stylecfg(td.path())
            .arg("rules")
            .arg("--profile")
            .arg("profile.toml"),
    );

    assert_eq!(
        text,
        "tree-walker\tMagicNumber\tinfo\tcom.puppycrawl.tools.checkstyle.checks.coding.MagicNumberCheck\n"
    );
}

#[test]
fn rules_json_honours_repository_override() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::MAGIC_NUMBER_PROFILE_TOML);
    write(td.path(), "settings.toml", sample_files::CUSTOM_REPOSITORY_SETTINGS_TOML);

    let json = stdout_of(
        stylecfg(td.path())
            .arg("rules")
            .arg("--profile")
            .arg("profile.toml")
            .arg("--settings")
            .arg("settings.toml")
            .arg("--format")
            .arg("json"),
    );

    assert!(json.contains("\"module\": \"UnusedPrivateField\""));
    assert!(json.contains("\"placement\": \"checker\""));
    assert!(json.contains("\"severity\": \"warning\""));
    assert!(!json.contains("MagicNumber"));
}

#[test]
fn validate_reports_valid_profile() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::MAGIC_NUMBER_PROFILE_TOML);

    let text = stdout_of(
        stylecfg(td.path())
            .arg("validate")
            .arg("--profile")
            .arg("profile.toml"),
    );
    assert!(text.contains("Profile 'Magic' is valid"));
}

#[test]
fn validate_fails_on_invalid_profile() {
    let td = TempDir::new().unwrap();
    write(td.path(), "profile.toml", sample_files::INVALID_PROFILE_TOML);

    stylecfg(td.path())
        .arg("validate")
        .arg("--profile")
        .arg("profile.toml")
        .assert()
        .code(1);
}

#[test]
fn validate_strict_fails_on_undeclared_parameter() {
    let td = TempDir::new().unwrap();
    write(
        td.path(),
        "profile.toml",
        r#"name = "Typo"

[[rule]]
rule_key = "LineLengthCheck"
config_key = "Checker/TreeWalker/LineLength"
severity = "major"

[rule.definition]
params = ["max"]

[rule.parameters]
maxx = "120"
"#,
    );

    stylecfg(td.path())
        .arg("validate")
        .arg("--profile")
        .arg("profile.toml")
        .assert()
        .code(0);

    stylecfg(td.path())
        .arg("validate")
        .arg("--strict")
        .arg("--profile")
        .arg("profile.toml")
        .assert()
        .code(1);
}
