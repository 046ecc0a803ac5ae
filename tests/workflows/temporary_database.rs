use crate::helpers::runner::RecordingRunner;
use anyhow::{Result, anyhow};
use devker::postgres::PostgresRemote;
use devker::process::{ExecOptions, OutputSink};

fn options() -> ExecOptions {
    ExecOptions::new("/srv/project")
}

#[tokio::test]
async fn test_body_result_is_returned_and_database_dropped() -> Result<()> {
    let runner = RecordingRunner::new();
    let remote = PostgresRemote::new(&runner, "postgres", "admin");

    let name = remote
        .with_temporary_database(&options(), async |tmpdb| {
            tmpdb.run_sql("SELECT 1;", &options()).await?;
            Ok(tmpdb.name().to_string())
        })
        .await?;

    let words: Vec<Vec<String>> = runner.calls().iter().map(|c| c.remote_words()).collect();
    assert_eq!(words.len(), 3);
    assert_eq!(words[0], vec!["createdb", "-U", "admin", name.as_str()]);
    assert_eq!(
        words[1],
        vec![
            "printf",
            "SELECT 1;",
            "|",
            "psql",
            "-v",
            "ON_ERROR_STOP=1",
            "-U",
            "admin",
            "--dbname",
            name.as_str(),
        ]
    );
    assert_eq!(
        words[2],
        vec!["dropdb", "-U", "admin", "--if-exists", name.as_str()]
    );
    Ok(())
}

#[tokio::test]
async fn test_create_and_drop_are_quiet() -> Result<()> {
    let runner = RecordingRunner::new();
    let remote = PostgresRemote::new(&runner, "postgres", "postgres");

    remote
        .with_temporary_database(&options(), async |_tmpdb| Ok(()))
        .await?;

    for call in runner.calls() {
        assert_eq!(call.options.stdout, OutputSink::Discard);
        assert_eq!(call.options.stderr, OutputSink::Discard);
    }
    Ok(())
}

#[tokio::test]
async fn test_body_error_still_drops_once() {
    let runner = RecordingRunner::new();
    let remote = PostgresRemote::new(&runner, "postgres", "postgres");

    let err = remote
        .with_temporary_database(&options(), async |_tmpdb| -> Result<()> {
            Err(anyhow!("body failed"))
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "body failed");
    let drops = runner.calls_containing("dropdb");
    assert_eq!(drops.len(), 1);
    assert!(drops[0].remote_words().contains(&"--if-exists".to_string()));
}

#[tokio::test]
async fn test_create_failure_skips_body_but_drops() {
    let runner = RecordingRunner::new().fail_when("createdb", 1);
    let remote = PostgresRemote::new(&runner, "postgres", "postgres");
    let mut body_ran = false;

    let result = remote
        .with_temporary_database(&options(), async |_tmpdb| {
            body_ran = true;
            Ok(())
        })
        .await;

    assert!(result.is_err());
    assert!(!body_ran);
    assert_eq!(runner.calls_containing("dropdb").len(), 1);
}

#[tokio::test]
async fn test_drop_failure_fails_successful_body() {
    let runner = RecordingRunner::new().fail_when("dropdb", 1);
    let remote = PostgresRemote::new(&runner, "postgres", "postgres");

    let err = remote
        .with_temporary_database(&options(), async |_tmpdb| Ok(42))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to drop temporary database"));
}

#[tokio::test]
async fn test_body_error_wins_over_drop_error() {
    let runner = RecordingRunner::new().fail_when("dropdb", 1);
    let remote = PostgresRemote::new(&runner, "postgres", "postgres");

    let err = remote
        .with_temporary_database(&options(), async |_tmpdb| -> Result<()> {
            Err(anyhow!("body failed"))
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "body failed");
}

#[tokio::test]
async fn test_each_scope_gets_a_fresh_name() -> Result<()> {
    let runner = RecordingRunner::new();
    let remote = PostgresRemote::new(&runner, "postgres", "postgres");

    let first = remote
        .with_temporary_database(&options(), async |tmpdb| Ok(tmpdb.name().to_string()))
        .await?;
    let second = remote
        .with_temporary_database(&options(), async |tmpdb| Ok(tmpdb.name().to_string()))
        .await?;

    assert_ne!(first, second);
    Ok(())
}
