//! Shell escaping round trips through a real `sh`
//!
//! Dynamic values must come out of the shell exactly as they went in, and
//! must never be expanded or executed along the way.

#![cfg(unix)]

use crate::helpers::runner::RecordingRunner;
use anyhow::Result;
use devker::postgres::sql::{initialize_role_sql, recreate_database_sql};
use devker::postgres::{ConnectionDescriptor, PostgresRemote};
use devker::process::ExecOptions;
use devker::shell::{escape, escape_printf_format, quote_args};
use rstest::rstest;
use std::process::Command;

fn sh(command_line: &str) -> Result<String> {
    let output = Command::new("sh").arg("-c").arg(command_line).output()?;
    assert!(
        output.status.success(),
        "sh failed for {}: {}",
        command_line,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

/// What `printf` prints for text whose line breaks went through `escape`
fn normalized(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

#[rstest]
#[case::plain("plain")]
#[case::single_quote("it's")]
#[case::double_quote(r#"say "hi""#)]
#[case::variable("$HOME")]
#[case::command_substitution("$(echo pwned)")]
#[case::backticks("`echo pwned`")]
#[case::backslashes(r"C:\path\to\n")]
#[case::quote_after_backslash(r#"\""#)]
#[case::percent("100% %s %d")]
#[case::semicolon("x\"; echo pwned; \"")]
fn test_quoted_argument_round_trip(#[case] input: &str) -> Result<()> {
    let output = sh(&quote_args("printf", &["%s", input]))?;
    assert_eq!(output, input);
    Ok(())
}

#[rstest]
#[case::plain("SELECT 1;")]
#[case::dollar_quoting("DO $$ BEGIN NULL; END $$;")]
#[case::percent("SELECT '100%';")]
#[case::backslash(r"SELECT E'\\t';")]
#[case::newlines("SELECT 1;\nSELECT 2;\n")]
#[case::crlf("SELECT 1;\r\nSELECT 2;\r")]
#[case::backticks("SELECT '`rm -rf /`';")]
#[case::quotes(r#"SELECT "col" FROM "t" WHERE x = 'it''s';"#)]
fn test_printf_format_round_trip(#[case] sql: &str) -> Result<()> {
    let output = sh(&format!("printf \"{}\"", escape_printf_format(sql)))?;
    assert_eq!(output, normalized(sql));
    Ok(())
}

#[rstest]
#[case::dollar_quoting("DO $$ BEGIN NULL; END $$;")]
#[case::mixed("SELECT '$(whoami)', \"`id`\", '100%', E'\\n';\r\nSELECT 2;")]
fn test_nested_shell_round_trip(#[case] sql: &str) -> Result<()> {
    let inner = format!("printf \"{}\"", escape_printf_format(sql));
    let output = sh(&quote_args("sh", &["-c", inner.as_str()]))?;
    assert_eq!(output, normalized(sql));
    Ok(())
}

#[test]
fn test_escape_keeps_value_as_one_word() -> Result<()> {
    let value = "a b\tc";
    let output = sh(&format!("printf '%s|' \"{}\"", escape(value)))?;
    assert_eq!(output, "a b\tc|");
    Ok(())
}

/// Replay a recorded `docker-compose exec ... bash -c` call on the host,
/// with `psql` standing in as `cat`
fn replay_remote_sql(command_line: &str) -> Result<String> {
    let prefix = r#"docker-compose "exec" "-T" "postgres" "bash" "-c" ""#;
    assert!(command_line.starts_with(prefix), "{}", command_line);
    sh(&command_line.replacen(prefix, r#"bash "-c" "psql() { cat; }; "#, 1))
}

#[tokio::test]
async fn test_run_sql_delivers_statement_unchanged() -> Result<()> {
    let hostile = ConnectionDescriptor {
        dbname: r#"app"; DROP DATABASE postgres; --"#.to_string(),
        username: "o'brien$(id)".to_string(),
        password: r"p%s\w`id`".to_string(),
        host: "localhost".to_string(),
        port: String::new(),
    };
    let role_sql = initialize_role_sql(&hostile).unwrap_or_default();

    for sql in [recreate_database_sql(&hostile.dbname), role_sql] {
        let runner = RecordingRunner::new();
        let remote = PostgresRemote::new(&runner, "postgres", "postgres");
        remote
            .run_sql("postgres", "postgres", &sql, &ExecOptions::new("/"))
            .await?;

        let call = &runner.calls()[0];
        assert_eq!(replay_remote_sql(&call.command_line)?, sql);
    }
    Ok(())
}
