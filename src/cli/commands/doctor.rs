//! Doctor command - verify configuration and credentials.

use crate::cli::Output;
use crate::config::{CredentialStatus, Settings};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("MagicSlides Doctor");
    println!();

    let checks = collect_checks(settings, config_path);
    for check in &checks {
        check.print();
    }

    println!();
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s), {} warning(s)", errors, warnings));
        anyhow::bail!("configuration has {} error(s)", errors);
    }

    if warnings > 0 {
        Output::warning(&format!("Ready with {} warning(s)", warnings));
    } else {
        Output::success("All checks passed");
    }
    Ok(())
}

fn collect_checks(settings: &Settings, config_path: &Path) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    if config_path.exists() {
        checks.push(CheckResult::ok("Config file", &config_path.display().to_string()));
    } else {
        checks.push(CheckResult::warning(
            "Config file",
            "not found, using built-in defaults",
            "Create one with: magicslides config init",
        ));
    }

    match settings.validate() {
        Ok(()) => checks.push(CheckResult::ok("Settings", "endpoints and timeouts are valid")),
        Err(e) => checks.push(CheckResult::error(
            "Settings",
            &e.to_string(),
            "Fix the value with: magicslides config set <key> <value>",
        )),
    }

    match settings.credential_status() {
        CredentialStatus::Configured => checks.push(CheckResult::ok("API key", "configured")),
        CredentialStatus::Missing => checks.push(CheckResult::error(
            "API key",
            "not set, presentations cannot be generated",
            "export MAGICSLIDES_API_KEY='...' or set credentials.api_key",
        )),
    }

    checks.push(CheckResult::ok(
        "Timeouts",
        &format!(
            "{}s per service call, {}s for generation",
            settings.timeouts.service_seconds, settings.timeouts.generation_seconds
        ),
    ));

    checks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_an_error() {
        let checks = collect_checks(&Settings::default(), Path::new("/nonexistent/config.toml"));
        let key = checks.iter().find(|c| c.name == "API key").unwrap();
        assert_eq!(key.status, CheckStatus::Error);

        let file = checks.iter().find(|c| c.name == "Config file").unwrap();
        assert_eq!(file.status, CheckStatus::Warning);
    }

    #[test]
    fn test_configured_settings_pass() {
        let settings = Settings::default().with_api_key(Some("ms-key".to_string()));
        let checks = collect_checks(&settings, Path::new("/nonexistent/config.toml"));
        assert!(checks.iter().all(|c| c.status != CheckStatus::Error));
    }
}
