use assert_cmd::Command;
use predicates::str::contains;
use std::fs;

fn cmd() -> Command {
    Command::cargo_bin("zip-extremes").unwrap()
}

#[test]
fn writes_summary_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("summary.csv");

    cmd()
        .args(["-i", "test-inputs/zips.csv", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Summary written to"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "State, Easternmost, Westernmost, Northernmost, Southernmost\n\
         CA, 90001, 90001, 90001, 90001\n\
         NY, 10001, 10001, 10001, 10001\n"
    );
}

#[test]
fn skips_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("summary.csv");

    cmd()
        .args(["-i", "test-inputs/zips_malformed.csv", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("skipping row"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "State, Easternmost, Westernmost, Northernmost, Southernmost\n\
         TX, 73301, 75001, 75001, 73301\n"
    );
}

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["-i", "test-inputs/no_such_file.csv", "-o"])
        .arg(dir.path().join("summary.csv"))
        .assert()
        .code(1)
        .stderr(contains("could not open input file"));
}

#[test]
fn unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .args(["-i", "test-inputs/zips.csv", "-o"])
        .arg(dir.path().join("missing").join("summary.csv"))
        .assert()
        .code(1)
        .stderr(contains("could not open output file"));
}

#[test]
fn unrecognized_sort_still_writes_summary() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("summary.csv");

    cmd()
        .args(["-i", "test-inputs/zips.csv", "--sort", "zip", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("unrecognized sort field"));

    assert!(fs::read_to_string(&output).unwrap().contains("NY, 10001"));
}

#[test]
fn prompts_when_no_input_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("summary.csv");

    cmd()
        .write_stdin(format!("test-inputs/zips.csv\nstate\n{}\n", output.display()))
        .assert()
        .success()
        .stdout(contains("Enter a zipcode csv file: "))
        .stdout(contains("Summary written to"));

    assert!(fs::read_to_string(&output).unwrap().contains("CA, 90001"));
}
