//! Opening episode reference pages in the user's browser.

use crate::error::{AppError, Result};
use log::debug;
use std::process::{Command, Stdio};

/// A command line that opens a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Opener {
    program: String,
    args: Vec<String>,
}

impl Opener {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The configured opener, or the platform default when none is set.
    pub fn from_config(program: Option<&str>, args: &[String]) -> Result<Self> {
        match program {
            Some(p) => Ok(Self::new(p, args.to_vec())),
            None => {
                let (program, default_args) = platform_default()?;
                let mut all = default_args;
                all.extend_from_slice(args);
                Ok(Self::new(program, all))
            }
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the command for `url` without running it.
    pub fn command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(url);
        cmd
    }

    /// Spawn the opener detached from the terminal.
    pub fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {} with {}", url, self.program);

        self.command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|e| AppError::Opener(format!("{}: {}", self.program, e)))
    }
}

/// Get the URL opener for the current operating system.
fn platform_default() -> Result<(String, Vec<String>)> {
    match std::env::consts::OS {
        "linux" | "freebsd" | "openbsd" | "netbsd" => Ok(("xdg-open".to_string(), Vec::new())),
        "macos" => Ok(("open".to_string(), Vec::new())),
        "windows" => Ok((
            "cmd".to_string(),
            vec!["/C".to_string(), "start".to_string(), String::new()],
        )),
        other => Err(AppError::Opener(format!("OS '{}' is not supported", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_opener_wins() {
        let opener = Opener::from_config(Some("firefox"), &["--new-tab".to_string()]).unwrap();
        assert_eq!(opener.program(), "firefox");

        let cmd = opener.command("https://www.tvmaze.com/episodes/1");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, vec!["--new-tab", "https://www.tvmaze.com/episodes/1"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_platform_default_on_linux() {
        let opener = Opener::from_config(None, &[]).unwrap();
        assert_eq!(opener.program(), "xdg-open");
    }

    #[test]
    fn test_open_missing_program_fails() {
        let opener = Opener::new("tv-browser-no-such-opener", Vec::new());
        let err = opener.open("https://example.com").unwrap_err();
        assert!(matches!(err, AppError::Opener(_)));
    }
}
