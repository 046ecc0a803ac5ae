use crate::helpers::cli::with_cli_helper;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_generate_uuid_count() -> Result<()> {
    with_cli_helper(|helper| {
        let output = helper
            .command()
            .args(["generate", "uuid", "-c", "3"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let text = String::from_utf8(output)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let parsed = uuid::Uuid::parse_str(line)?;
            assert_eq!(parsed.get_version_num(), 4);
        }
        Ok(())
    })
}

#[test]
fn test_generate_uuid_v7() -> Result<()> {
    with_cli_helper(|helper| {
        let output = helper
            .command()
            .args(["generate", "uuid", "v7"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let parsed = uuid::Uuid::parse_str(String::from_utf8(output)?.trim())?;
        assert_eq!(parsed.get_version_num(), 7);
        Ok(())
    })
}

#[test]
fn test_generate_uuid_unknown_version() -> Result<()> {
    with_cli_helper(|helper| {
        helper
            .command()
            .args(["generate", "uuid", "v9"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"v9\" is not a valid uuid version"));
        Ok(())
    })
}

#[test]
fn test_generate_password_count_and_length() -> Result<()> {
    with_cli_helper(|helper| {
        let output = helper
            .command()
            .args(["generate", "password", "-c", "4", "-l", "16"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let text = String::from_utf8(output)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.chars().count() == 16));
        Ok(())
    })
}

#[test]
fn test_generate_password_only_numbers() -> Result<()> {
    with_cli_helper(|helper| {
        helper
            .command()
            .args(["generate", "password", "-l", "12", "!uppercase"])
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"^[0-9]{12}\n$")?);
        Ok(())
    })
}

#[test]
fn test_generate_password_unknown_flag() -> Result<()> {
    with_cli_helper(|helper| {
        helper
            .command()
            .args(["generate", "password", "emoji"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("emoji"));
        Ok(())
    })
}
