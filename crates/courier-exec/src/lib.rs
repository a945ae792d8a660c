mod command;
pub use command::{DEFAULT_EXECUTION_TIMEOUT, ExecSpec, TERMINATED_EXIT_CODE, run_command};

mod disk;
pub use disk::{MIN_UPDATE_DISK_BYTES, is_disk_space_sufficient};

mod error;
pub use error::{ExecError, ExecResult};

mod paths;
pub use paths::{
    DEFAULT_STDERR_NAME, DEFAULT_STDOUT_NAME, UpdateResult, build_update_command,
    create_download_dir, installer_path, save_update_result, stderr_path, stdout_path,
    uninstaller_path, update_artifact_dir, update_context_path, update_output_dir,
    update_result_path, updater_path,
};

mod service;
pub use service::{is_service_running, platform_uses_systemd};
