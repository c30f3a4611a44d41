//! Opening external links outside the terminal.

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::info;

/// Hand `url` to the platform opener without waiting for it.
pub fn open_external(url: &str) -> Result<()> {
    let url = url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        bail!("refusing to open non-web link {url:?}");
    }

    opener_command(std::env::consts::OS, url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to launch browser for {url}"))?;
    info!(url, "Opened external link");
    Ok(())
}

/// Build the opener invocation for `os`. The URL is always a single argument
/// to a program that does no shell parsing of it.
fn opener_command(os: &str, url: &str) -> Command {
    let mut command = match os {
        "macos" => Command::new("open"),
        "windows" => {
            let mut command = Command::new("rundll32");
            command.arg("url.dll,FileProtocolHandler");
            command
        }
        _ => Command::new("xdg-open"),
    };
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_web_schemes() {
        assert!(open_external("file:///etc/passwd").is_err());
        assert!(open_external("javascript:alert(1)").is_err());
        assert!(open_external("").is_err());
    }

    fn invocation(os: &str, url: &str) -> (String, Vec<String>) {
        let command = opener_command(os, url);
        let command = command.as_std();
        (
            command.get_program().to_string_lossy().into_owned(),
            command
                .get_args()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        )
    }

    #[test]
    fn windows_opener_bypasses_the_shell() {
        let url = "https://example.com/?a=1&calc|whoami^%PATH%";
        let (program, args) = invocation("windows", url);
        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()]);
        assert!(!args.iter().any(|arg| arg == "/C"));
    }

    #[test]
    fn unix_openers_take_url_as_sole_argument() {
        let url = "https://example.com/open/sample?x=1&y=2";
        assert_eq!(
            invocation("macos", url),
            ("open".to_string(), vec![url.to_string()])
        );
        assert_eq!(
            invocation("linux", url),
            ("xdg-open".to_string(), vec![url.to_string()])
        );
    }
}
