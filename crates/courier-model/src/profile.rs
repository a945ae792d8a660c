use serde::{Deserialize, Serialize};

/// Artifact name template rendered by [`PlatformProfile::file_name`].
const FILE_NAME_TEMPLATE: &str = "{PackageName}-{Platform}-{Arch}.{Compressed}";

/// Immutable snapshot of the host platform, taken once at startup and
/// carried through update and service-probe logic.
///
/// The raw platform name is an input (detection is out of scope here);
/// construction normalizes it into the platform / installer pair the
/// artifact repository understands.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    pub region: String,
    pub platform: String,
    pub platform_version: String,
    pub installer_name: String,
    pub arch: String,
    pub compress_format: String,
}

impl PlatformProfile {
    /// Builds a profile from the raw platform name reported by the host.
    ///
    /// Any name that matches no known linux family falls through to the
    /// windows pair.
    pub fn new(
        region: impl Into<String>,
        raw_platform_name: &str,
        platform_version: impl Into<String>,
    ) -> Self {
        let (platform, installer_name) = normalize_platform(raw_platform_name);

        Self {
            region: region.into(),
            platform: platform.to_string(),
            platform_version: platform_version.into(),
            installer_name: installer_name.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            compress_format: compress_format().to_string(),
        }
    }

    /// Renders the downloadable artifact file name for `package_name`.
    ///
    /// The installer name fills the platform slot of the template, so a
    /// centos host asks for the `linux` artifact.
    pub fn file_name(&self, package_name: &str) -> String {
        FILE_NAME_TEMPLATE
            .replace("{PackageName}", package_name)
            .replace("{Platform}", &self.installer_name)
            .replace("{Arch}", &self.arch)
            .replace("{Compressed}", &self.compress_format)
    }
}

fn normalize_platform(raw: &str) -> (&'static str, &'static str) {
    let name = raw.to_lowercase();

    if name.contains("amazon") {
        ("linux", "linux")
    } else if name.contains("red hat") {
        ("red hat", "linux")
    } else if name.contains("ubuntu") {
        ("ubuntu", "ubuntu")
    } else if name.contains("centos") {
        ("centos", "linux")
    } else {
        ("windows", "windows")
    }
}

fn compress_format() -> &'static str {
    if cfg!(windows) { "zip" } else { "tar.gz" }
}
