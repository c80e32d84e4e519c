use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ExternalCommandError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("no background command configured")]
    Empty,
}

/// Which tool sets the desktop background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SetterKind {
    /// `feh --bg-<mode>` (X11)
    #[default]
    Feh,
    /// `swww img` (Wayland)
    Swww,
    /// A user supplied command; the wallpaper path is appended
    Command,
}

/// How feh fits the image to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FehMode {
    /// Stretch to fill (default)
    #[default]
    Scale,
    /// Fill the screen, cropping what doesn't fit
    Fill,
    /// Fit inside the screen, adding borders
    Max,
    Center,
    Tile,
}

impl FehMode {
    fn flag(&self) -> &'static str {
        match self {
            FehMode::Scale => "--bg-scale",
            FehMode::Fill => "--bg-fill",
            FehMode::Max => "--bg-max",
            FehMode::Center => "--bg-center",
            FehMode::Tile => "--bg-tile",
        }
    }
}

/// A fully resolved background command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setter {
    Feh { mode: FehMode },
    Swww { output: Option<String> },
    Command { argv: Vec<String> },
}

impl Setter {
    /// Build the argv that sets `path` as background.
    pub fn command_line(&self, path: &Path) -> Result<Vec<String>, ExternalCommandError> {
        let path = path.to_string_lossy().into_owned();
        let argv = match self {
            Setter::Feh { mode } => vec!["feh".to_string(), mode.flag().to_string(), path],
            Setter::Swww { output } => {
                let mut argv = vec!["swww".to_string(), "img".to_string()];
                if let Some(output) = output {
                    argv.push("-o".to_string());
                    argv.push(output.clone());
                }
                argv.push(path);
                argv
            }
            Setter::Command { argv } => {
                if argv.is_empty() {
                    return Err(ExternalCommandError::Empty);
                }
                let mut argv = argv.clone();
                argv.push(path);
                argv
            }
        };
        Ok(argv)
    }

    /// Run the command. Only success or failure is observed.
    pub fn apply(&self, path: &Path) -> Result<(), ExternalCommandError> {
        let argv = self.command_line(path)?;
        let (program, args) = argv.split_first().ok_or(ExternalCommandError::Empty)?;

        debug!(?argv, "setting background");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ExternalCommandError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExternalCommandError::Failed {
                program: program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
