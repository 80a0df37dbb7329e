//! Runs the actual binary to check that an incomplete environment stops it before it serves anything.

use std::{process::Output, time::Duration};

use anyhow::Result;
use tokio::process::Command;

const RELAY_ENV: [&str; 4] = [
    "MAILCHIMP_API_KEY",
    "MAILCHIMP_AUDIENCE_ID",
    "MAILCHIMP_API_BASE_URL",
    "PORT",
];

async fn run_relay(envs: &[(&str, &str)]) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mailrelay"));
    for key in RELAY_ENV {
        cmd.env_remove(key);
    }
    cmd.env("RUST_LOG", "error")
        .envs(envs.iter().copied())
        .kill_on_drop(true);

    // A relay that starts serving never exits on its own.
    let out = tokio::time::timeout(Duration::from_secs(30), cmd.output()).await??;
    Ok(out)
}

#[tokio::test]
async fn startup_without_api_key_exits() -> Result<()> {
    let out = run_relay(&[("MAILCHIMP_AUDIENCE_ID", "list123")]).await?;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("MAILCHIMP_API_KEY"), "stderr: {stderr}");

    Ok(())
}

#[tokio::test]
async fn startup_without_list_id_exits() -> Result<()> {
    let out = run_relay(&[("MAILCHIMP_API_KEY", "0123456789abcdef-us21")]).await?;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("MAILCHIMP_AUDIENCE_ID"), "stderr: {stderr}");

    Ok(())
}

#[tokio::test]
async fn startup_with_api_key_missing_separator_exits() -> Result<()> {
    let out = run_relay(&[
        ("MAILCHIMP_API_KEY", "0123456789abcdef"),
        ("MAILCHIMP_AUDIENCE_ID", "list123"),
    ])
    .await?;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ApiKeyFormat"), "stderr: {stderr}");

    Ok(())
}
