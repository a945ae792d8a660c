use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use crate::error::{ExecError, ExecResult};
use crate::paths;

/// Hard deadline for supervised runs unless the spec overrides it.
pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Synthetic exit code reported when the supervisor killed an overrunning
/// child. Distinguishes "stopped preemptively" from a genuine non-zero
/// exit produced by the command itself.
pub const TERMINATED_EXIT_CODE: i32 = 137;

/// One process execution request.
///
/// `command_line` is split on whitespace; arguments containing spaces are
/// not representable. Supervised runs capture stdout/stderr into files
/// under `out_root/output/`.
#[derive(Debug, Clone)]
pub struct ExecSpec {
    pub command_line: String,
    pub working_dir: PathBuf,
    pub out_root: PathBuf,
    pub stdout_name: Option<String>,
    pub stderr_name: Option<String>,
    /// Fire-and-forget when true: spawn and return without supervision.
    pub detached: bool,
    pub timeout: Duration,
}

impl ExecSpec {
    pub fn new(
        command_line: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        out_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            command_line: command_line.into(),
            working_dir: working_dir.into(),
            out_root: out_root.into(),
            stdout_name: None,
            stderr_name: None,
            detached: false,
            timeout: DEFAULT_EXECUTION_TIMEOUT,
        }
    }
}

/// Runs one command, either detached or supervised per `spec.detached`.
pub async fn run_command(spec: &ExecSpec) -> ExecResult<()> {
    if spec.detached {
        spawn_detached(spec)
    } else {
        supervise(spec).await
    }
}

fn spawn_detached(spec: &ExecSpec) -> ExecResult<()> {
    let argv = split_command_line(&spec.command_line)?;

    trace!(command = %spec.command_line, "spawning detached process");

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..])
        .current_dir(&spec.working_dir)
        // The child is expected to outlive this process (self-update
        // replaces us), so the handle must not reap it on drop.
        .kill_on_drop(false);
    cmd.spawn()?;

    Ok(())
}

async fn supervise(spec: &ExecSpec) -> ExecResult<()> {
    let argv = shape_for_host(split_command_line(&spec.command_line)?);

    std::fs::create_dir_all(paths::update_output_dir(&spec.out_root))?;
    let stdout = open_capture(&paths::stdout_path(
        &spec.out_root,
        spec.stdout_name.as_deref(),
    ))?;
    let stderr = open_capture(&paths::stderr_path(
        &spec.out_root,
        spec.stderr_name.as_deref(),
    ))?;

    trace!(command = %spec.command_line, timeout = ?spec.timeout, "spawning supervised process");

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..])
        .current_dir(&spec.working_dir)
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr));

    let mut child = cmd.spawn()?;

    let mut timed_out = false;
    let status = tokio::select! {
        res = child.wait() => res?,
        _ = tokio::time::sleep(spec.timeout) => {
            timed_out = true;
            debug!(command = %spec.command_line, "execution timeout exceeded; killing process");
            if let Err(e) = child.start_kill() {
                debug!("failed to kill process: {e}");
            }
            child.wait().await?
        }
    };

    let mut exit_code = status.code().unwrap_or(-1);
    if exit_code == -1 && timed_out {
        // Signal-killed with the timer fired: this is our own kill, not
        // the command's doing.
        exit_code = TERMINATED_EXIT_CODE;
    }

    if exit_code == 0 {
        debug!(command = %spec.command_line, "process exited successfully");
        Ok(())
    } else {
        Err(ExecError::CommandFailed {
            exit_code,
            message: status.to_string(),
        })
    }
}

fn split_command_line(command_line: &str) -> ExecResult<Vec<String>> {
    let argv: Vec<String> = command_line
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if argv.is_empty() {
        return Err(ExecError::InvalidSpec("empty command line".to_string()));
    }
    Ok(argv)
}

/// Supervised commands go through the shell on windows; the unix argv is
/// passed through unchanged.
fn shape_for_host(argv: Vec<String>) -> Vec<String> {
    if cfg!(windows) {
        let mut shaped = Vec::with_capacity(argv.len() + 2);
        shaped.push("cmd".to_string());
        shaped.push("/C".to_string());
        shaped.extend(argv);
        shaped
    } else {
        argv
    }
}

fn open_capture(path: &Path) -> ExecResult<std::fs::File> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use super::{ExecSpec, TERMINATED_EXIT_CODE, run_command, split_command_line};
    use crate::error::ExecError;
    use crate::paths;

    #[tokio::test]
    async fn empty_command_line_is_rejected() {
        let root = tempdir().unwrap();
        let spec = ExecSpec::new("   ", root.path(), root.path());

        let err = run_command(&spec).await.unwrap_err();
        assert!(matches!(err, ExecError::InvalidSpec(_)));
    }

    #[test]
    fn command_line_splits_on_whitespace() {
        let argv = split_command_line("updater -update -source.version 2.0.0").unwrap();
        assert_eq!(argv[0], "updater");
        assert_eq!(argv.len(), 4);
    }

    #[cfg(unix)]
    fn write_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_carries_the_real_code() {
        let root = tempdir().unwrap();
        let script = write_script(root.path(), "fail.sh", "#!/bin/sh\nexit 3\n");

        let spec = ExecSpec::new(script.display().to_string(), root.path(), root.path());
        let err = run_command(&spec).await.unwrap_err();

        match err {
            ExecError::CommandFailed { exit_code, .. } => assert_eq!(exit_code, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn overrunning_process_is_killed_and_remapped() {
        let root = tempdir().unwrap();

        let mut spec = ExecSpec::new("sleep 5", root.path(), root.path());
        spec.timeout = Duration::from_millis(50);

        let err = run_command(&spec).await.unwrap_err();
        match err {
            ExecError::CommandFailed { exit_code, .. } => {
                assert_eq!(exit_code, TERMINATED_EXIT_CODE)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn output_is_captured_and_appended_across_runs() {
        let root = tempdir().unwrap();
        let script = write_script(root.path(), "say.sh", "#!/bin/sh\necho hello\n");

        let spec = ExecSpec::new(script.display().to_string(), root.path(), root.path());
        run_command(&spec).await.unwrap();
        run_command(&spec).await.unwrap();

        let captured =
            std::fs::read_to_string(paths::stdout_path(root.path(), None)).unwrap();
        assert_eq!(captured, "hello\nhello\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn custom_output_names_are_honored() {
        let root = tempdir().unwrap();
        let script = write_script(root.path(), "say.sh", "#!/bin/sh\necho out\n");

        let mut spec = ExecSpec::new(script.display().to_string(), root.path(), root.path());
        spec.stdout_name = Some("run.out".to_string());
        spec.stderr_name = Some("run.err".to_string());
        run_command(&spec).await.unwrap();

        assert!(paths::stdout_path(root.path(), Some("run.out")).exists());
        assert!(paths::stderr_path(root.path(), Some("run.err")).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn detached_spawn_returns_before_the_child_exits() {
        let root = tempdir().unwrap();

        let mut spec = ExecSpec::new("sleep 2", root.path(), root.path());
        spec.detached = true;

        let started = std::time::Instant::now();
        run_command(&spec).await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
