use std::path::PathBuf;

use jukebox::config::AppConfig;
use tracing::info;

use crate::{reporter::TerminalReporter, tables::ValidationTableReporter};

const HEADER: [&str; 4] = ["Category", "Field", "Message", "Suggestion"];

pub(crate) fn handle_validate(
    original_config: &AppConfig,
    config_path: Option<PathBuf>,
    reporter: TerminalReporter,
) -> i32 {
    info!("Validating configuration");

    let mut result = original_config.validate();
    if let Some(path) = config_path {
        result = result.with_config_file_path(path);
    }
    let source = result
        .config_file_path()
        .map(|path| format!(" ({})", path.display()))
        .unwrap_or_default();

    let issues = result.issues();

    if issues.has_errors() {
        reporter.report_error(format!("Validation failed{source}."));

        ValidationTableReporter::new()
            .setup(HEADER.to_vec())
            .add_issues(issues.errors().chain(issues.warnings()), reporter)
            .print();
        1
    } else if issues.has_warnings() {
        ValidationTableReporter::new()
            .setup(HEADER.to_vec())
            .add_issues(issues.warnings(), reporter)
            .print();
        reporter.report_success(format!("Configuration is valid{source}, with warnings."));
        0
    } else {
        reporter.report_success(format!("Configuration is valid{source}."));
        0
    }
}
