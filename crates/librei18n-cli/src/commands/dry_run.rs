use crate::utils::ui;

/// Before and after text of a file a dry run would rewrite.
#[derive(Debug, Clone)]
pub struct DryRunDiff {
    before: String,
    after: String,
}

impl DryRunDiff {
    pub fn new(before: String, after: String) -> Self {
        Self { before, after }
    }

    pub fn is_empty(&self) -> bool {
        self.before == self.after
    }

    pub fn print(&self) {
        ui::print_diff(&self.before, &self.after);
    }
}
