use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::predicate;

#[test]
fn test_no_argument() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?.assert().failure();
    Ok(())
}

#[test]
fn test_too_many_arguments() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?
        .arg("foo")
        .arg("bar")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_unknown_option() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?
        .arg("foo")
        .arg("--frobnicate")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_unknown_encoding() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?
        .arg("foo")
        .arg("--encoding")
        .arg("bar")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_external_sat_solver_options_alone() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?
        .arg("foo")
        .arg("--external-sat-solver-opt")
        .arg("bar")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_missing_instance_file() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?
        .arg("/this/path/does/not/exist")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_help() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("haplopar")?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("haplotyping solver"));
    Ok(())
}

#[test]
fn test_logging_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.out")?;
    file.write_str("ms 2 1 -s 1\nsegsites: 1\npositions: 0.5\n0\n0\n")?;
    let mut cmd = Command::cargo_bin("haplopar")?;
    cmd.arg(file.path()).arg("--logging-level").arg("off");
    cmd.assert()
        .success()
        .stdout(predicate::str::is_match(r"^0\n######\n")?);
    file.close().unwrap();
    Ok(())
}
