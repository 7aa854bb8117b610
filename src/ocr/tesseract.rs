//! Tesseract OCR engine, driven through its command-line executable.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::ImageFormat;

use super::{OcrEngine, PixelArray};
use crate::error::{Error, Result};

/// Environment variable naming the Tesseract executable.
pub const TESSERACT_CMD_ENV: &str = "TESSERACT_CMD";
/// Environment variable naming the recognition language.
pub const TESSERACT_LANG_ENV: &str = "TESSERACT_LANG";
/// Environment variable holding the page segmentation mode.
pub const TESSERACT_PSM_ENV: &str = "TESSERACT_PSM";

const DEFAULT_COMMAND: &str = "tesseract";
const DEFAULT_LANGUAGE: &str = "eng";

/// Configuration for [`TesseractEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesseractConfig {
    /// Executable to run: a bare name looked up on `PATH`, or a path
    pub command: PathBuf,

    /// Language passed with `-l` (e.g., "eng", "deu+eng")
    pub language: String,

    /// Page segmentation mode (`--psm`)
    pub psm: Option<u8>,

    /// OCR engine mode (`--oem`)
    pub oem: Option<u8>,

    /// Extra config variables passed as `-c key=value`
    pub variables: Vec<(String, String)>,
}

impl TesseractConfig {
    /// Create a config with defaults (`tesseract` on `PATH`, English).
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from `TESSERACT_CMD`, `TESSERACT_LANG` and
    /// `TESSERACT_PSM`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Same as [`TesseractConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();

        if let Some(command) = lookup(TESSERACT_CMD_ENV).filter(|v| !v.is_empty()) {
            config.command = PathBuf::from(command);
        }
        if let Some(language) = lookup(TESSERACT_LANG_ENV).filter(|v| !v.is_empty()) {
            config.language = language.to_string_lossy().into_owned();
        }
        if let Some(psm) = lookup(TESSERACT_PSM_ENV).filter(|v| !v.is_empty()) {
            let psm = psm.to_string_lossy();
            let value = psm.trim().parse::<u8>().map_err(|_| {
                Error::Config(format!("{} must be a number, got {:?}", TESSERACT_PSM_ENV, psm))
            })?;
            config.psm = Some(value);
        }

        Ok(config)
    }

    /// Set the executable.
    pub fn with_command(mut self, command: impl Into<PathBuf>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    /// Set the OCR engine mode.
    pub fn with_oem(mut self, oem: u8) -> Self {
        self.oem = Some(oem);
        self
    }

    /// Add a `-c key=value` config variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.push((key.into(), value.into()));
        self
    }

    /// Validate the config and return the command to run.
    ///
    /// A command given as a path must name an existing file, executable on
    /// Unix. A bare name is left for the OS to find on `PATH` at spawn time.
    pub fn resolve(&self) -> Result<PathBuf> {
        if self.command.as_os_str().is_empty() {
            return Err(Error::Config("tesseract command is empty".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(Error::Config("tesseract language is empty".to_string()));
        }
        if is_path_like(&self.command) && !is_executable_file(&self.command) {
            return Err(Error::EngineNotFound(self.command.clone()));
        }
        Ok(self.command.clone())
    }

    /// Arguments for one recognition run over `input`, writing to stdout.
    fn recognize_args(&self, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            input.as_os_str().to_os_string(),
            "stdout".into(),
            "-l".into(),
            self.language.clone().into(),
        ];
        if let Some(psm) = self.psm {
            args.push("--psm".into());
            args.push(psm.to_string().into());
        }
        if let Some(oem) = self.oem {
            args.push("--oem".into());
            args.push(oem.to_string().into());
        }
        for (key, value) in &self.variables {
            args.push("-c".into());
            args.push(format!("{}={}", key, value).into());
        }
        args
    }
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from(DEFAULT_COMMAND),
            language: DEFAULT_LANGUAGE.to_string(),
            psm: None,
            oem: None,
            variables: Vec::new(),
        }
    }
}

fn is_path_like(command: &Path) -> bool {
    command.is_absolute() || command.components().count() > 1
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

/// `ENOEXEC`: the file exists but is not in an executable format.
#[cfg(unix)]
const ENOEXEC: i32 = 8;

/// Map a spawn failure. A command that is missing, not permitted to run,
/// or not a program is reported as [`Error::EngineNotFound`].
fn spawn_error(command: &Path, err: io::Error) -> Error {
    #[cfg(unix)]
    let not_a_program = err.raw_os_error() == Some(ENOEXEC);
    #[cfg(not(unix))]
    let not_a_program = false;

    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            Error::EngineNotFound(command.to_path_buf())
        }
        _ if not_a_program => Error::EngineNotFound(command.to_path_buf()),
        _ => Error::Io(err),
    }
}

/// [`OcrEngine`] that shells out to the Tesseract executable.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    config: TesseractConfig,
    command: PathBuf,
}

impl TesseractEngine {
    /// Create an engine, failing early if the config does not resolve.
    pub fn new(config: TesseractConfig) -> Result<Self> {
        let command = config.resolve()?;
        Ok(Self { config, command })
    }

    /// The config this engine was built from.
    pub fn config(&self) -> &TesseractConfig {
        &self.config
    }

    /// Run `<command> --version` and return the first line it prints.
    ///
    /// Doubles as a startup check that the executable can be spawned.
    pub fn version(&self) -> Result<String> {
        let output = self.run(&[OsString::from("--version")])?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Older releases print the banner on stderr.
        let line = stdout
            .lines()
            .chain(stderr.lines())
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        Ok(line.to_string())
    }

    fn run(&self, args: &[OsString]) -> Result<Output> {
        log::debug!("Running {} {:?}", self.command.display(), args);

        let output = Command::new(&self.command)
            .args(args)
            .output()
            .map_err(|e| spawn_error(&self.command, e))?;

        if !output.status.success() {
            return Err(Error::Engine {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, pixels: &PixelArray) -> Result<String> {
        let image = pixels.to_image()?;

        // Removed from disk when `input` drops.
        let mut input = tempfile::Builder::new()
            .prefix("textgrab_")
            .suffix(".png")
            .tempfile()?;
        image
            .write_to(input.as_file_mut(), ImageFormat::Png)
            .map_err(|e| Error::ImageEncode(e.to_string()))?;
        input.as_file_mut().flush()?;

        let output = self.run(&self.config.recognize_args(input.path()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::debug!("tesseract: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
