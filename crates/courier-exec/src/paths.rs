//! Path layout of the update tree shared by the executor and the update
//! workflow.
//!
//! Everything hangs off one update root:
//! `<root>/<package>/<version>/` holds downloaded artifacts,
//! `<root>/output/` holds captured process output, and the two json files
//! at the root record update context and result.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExecResult;

pub const DEFAULT_STDOUT_NAME: &str = "stdout";
pub const DEFAULT_STDERR_NAME: &str = "stderr";

const OUTPUT_DIR_NAME: &str = "output";
const UPDATER_FILE_NAME: &str = "updater";
const UPDATE_CONTEXT_FILE_NAME: &str = "updatecontext.json";
const UPDATE_RESULT_FILE_NAME: &str = "updateresult.json";
const DOWNLOAD_DIR_NAME: &str = "update";

#[cfg(unix)]
const INSTALLER_FILE_NAME: &str = "install.sh";
#[cfg(unix)]
const UNINSTALLER_FILE_NAME: &str = "uninstall.sh";

#[cfg(not(unix))]
const INSTALLER_FILE_NAME: &str = "install.bat";
#[cfg(not(unix))]
const UNINSTALLER_FILE_NAME: &str = "uninstall.bat";

/// Folder holding all artifacts of one package version.
pub fn update_artifact_dir(root: &Path, package: &str, version: &str) -> PathBuf {
    root.join(package).join(version)
}

pub fn update_output_dir(root: &Path) -> PathBuf {
    root.join(OUTPUT_DIR_NAME)
}

pub fn stdout_path(root: &Path, name: Option<&str>) -> PathBuf {
    update_output_dir(root).join(name.unwrap_or(DEFAULT_STDOUT_NAME))
}

pub fn stderr_path(root: &Path, name: Option<&str>) -> PathBuf {
    update_output_dir(root).join(name.unwrap_or(DEFAULT_STDERR_NAME))
}

pub fn update_context_path(root: &Path) -> PathBuf {
    root.join(UPDATE_CONTEXT_FILE_NAME)
}

pub fn update_result_path(root: &Path) -> PathBuf {
    root.join(UPDATE_RESULT_FILE_NAME)
}

pub fn updater_path(root: &Path, package: &str, version: &str) -> PathBuf {
    update_artifact_dir(root, package, version).join(UPDATER_FILE_NAME)
}

pub fn installer_path(root: &Path, package: &str, version: &str) -> PathBuf {
    update_artifact_dir(root, package, version).join(INSTALLER_FILE_NAME)
}

pub fn uninstaller_path(root: &Path, package: &str, version: &str) -> PathBuf {
    update_artifact_dir(root, package, version).join(UNINSTALLER_FILE_NAME)
}

/// Creates and returns the download staging folder under `download_root`.
pub fn create_download_dir(download_root: &Path) -> ExecResult<PathBuf> {
    let dir = download_root.join(DOWNLOAD_DIR_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Appends ` -{arg} {value}` to `cmd` when both parts are non-empty.
pub fn build_update_command(cmd: &str, arg: &str, value: &str) -> String {
    if arg.is_empty() || value.is_empty() {
        return cmd.to_string();
    }
    format!("{cmd} -{arg} {value}")
}

/// Terminal state of one self-update attempt, persisted for the restarted
/// agent to pick up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub status: String,
    pub message: String,
}

pub fn save_update_result(root: &Path, result: &UpdateResult) -> ExecResult<()> {
    let rendered = serde_json::to_string(result)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(update_result_path(root), rendered)?;
    Ok(())
}
