use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

use tokio::process::Command;
use tracing::debug;

use courier_model::{PlatformProfile, compare_versions};

use crate::error::{ExecError, ExecResult};

const AGENT_SERVICE: &str = "courier-agent";

static SYSTEMD_MINIMUMS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Minimum platform version at which each family manages the agent
/// through systemd. Built once, never mutated.
fn systemd_minimums() -> &'static HashMap<&'static str, &'static str> {
    SYSTEMD_MINIMUMS
        .get_or_init(|| HashMap::from([("centos", "7"), ("red hat", "7"), ("ubuntu", "15")]))
}

/// True when the host manages the agent service through systemd.
///
/// A version that fails to parse propagates as an error; it is never
/// coerced into a non-systemd answer.
pub fn platform_uses_systemd(profile: &PlatformProfile) -> ExecResult<bool> {
    let Some(minimum) = systemd_minimums().get(profile.platform.as_str()) else {
        return Ok(false);
    };

    let decided = compare_versions(&profile.platform_version, minimum)?;
    Ok(decided != Ordering::Less)
}

/// Asks the init system whether the agent service is currently running.
///
/// A status command that cannot run (or exits non-zero) is an error, not
/// a "not running" answer.
pub async fn is_service_running(profile: &PlatformProfile) -> ExecResult<bool> {
    if platform_uses_systemd(profile)? {
        let service = format!("{AGENT_SERVICE}.service");
        let output = probe_output("systemctl", &["status", &service]).await?;
        return Ok(output.trim().contains("Active: active (running)"));
    }

    let (program, args, marker) = fallback_probe();
    let output = probe_output(program, &args).await?;
    Ok(output.trim().contains(marker))
}

#[cfg(unix)]
fn fallback_probe() -> (&'static str, Vec<&'static str>, &'static str) {
    ("status", vec![AGENT_SERVICE], "courier-agent start/running")
}

#[cfg(not(unix))]
fn fallback_probe() -> (&'static str, Vec<&'static str>, &'static str) {
    ("sc", vec!["query", AGENT_SERVICE], "RUNNING")
}

async fn probe_output(program: &str, args: &[&str]) -> ExecResult<String> {
    debug!(%program, ?args, "querying agent service status");

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| ExecError::ProbeFailed(format!("{program}: {e}")))?;

    if !output.status.success() {
        return Err(ExecError::ProbeFailed(format!(
            "{program} exited with {}",
            output.status
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
