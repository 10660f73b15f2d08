use comfy_table::{
    ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED,
};
use jukebox::validation::{ValidationIssue, ValidationLevel};

use crate::reporter::TerminalReporter;

pub(crate) struct ValidationTableReporter {
    table: Table,
}

impl ValidationTableReporter {
    pub(crate) fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    pub(crate) fn setup(&mut self, header: Vec<&'static str>) -> &mut Self {
        self.table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header);

        self
    }

    /// One row per issue; the category cell is styled by the issue's level
    pub(crate) fn add_issues<'a>(
        &mut self,
        issues: impl IntoIterator<Item = &'a ValidationIssue>,
        reporter: TerminalReporter,
    ) -> &mut Self {
        for issue in issues {
            let category = match issue.level() {
                ValidationLevel::Error => reporter.format_error(issue.category()),
                ValidationLevel::Warning => reporter.format_warning(issue.category()),
            };
            self.table.add_row(vec![
                category,
                issue.field().to_string(),
                issue.message().to_string(),
                issue.suggestion().map(ToString::to_string).unwrap_or_default(),
            ]);
        }

        self
    }

    #[cfg(test)]
    pub(crate) fn row_count(&self) -> usize {
        self.table.row_iter().count()
    }

    pub(crate) fn print(&self) {
        eprintln!("{}", &self.table);
    }
}
