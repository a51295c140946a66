//! Plain-text rendering of controller snapshots.

use std::fmt::{self, Display, Formatter};

use roster_application::{DirectoryRow, DirectorySummary, DirectoryView};
use roster_domain::{AccountStatus, Permission, Role};

pub const HELP: &str = "\
commands:
  list                     show the directory
  search [text]            filter by name (no text clears the filter)
  show <id|#n>             show or hide details
  edit <id|#n>             start editing role, status, permissions
  set <field> <value>      role | status | permission (comma separated)
  save                     send the edited fields
  cancel                   drop unsaved edits
  delete <id|#n>           delete after confirmation
  reload                   fetch the directory again
  dashboard                account totals from the backend
  quit";

pub fn render_view(view: &DirectoryView) -> String {
    ViewText(view).to_string()
}

pub fn render_summary(summary: &DirectorySummary) -> String {
    SummaryText(summary).to_string()
}

struct ViewText<'a>(&'a DirectoryView);

impl Display for ViewText<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(formatter, "User Management")?;
        if !view.search_term.is_empty() {
            writeln!(
                formatter,
                "search: \"{}\" ({} of {})",
                view.search_term,
                view.rows.len(),
                view.total
            )?;
        }

        if view.rows.is_empty() {
            return writeln!(formatter, "No user found");
        }

        for row in &view.rows {
            write_row(formatter, row)?;
        }

        Ok(())
    }
}

fn write_row(formatter: &mut Formatter<'_>, row: &DirectoryRow) -> fmt::Result {
    let record = &row.record;
    writeln!(
        formatter,
        "{:>3}. {}  [{}]  {}",
        row.position,
        record.name(),
        record.id(),
        if row.expanded { "Hide Details" } else { "Show Details" }
    )?;

    if !row.expanded {
        return Ok(());
    }

    writeln!(formatter, "     Name: {}", record.name())?;
    writeln!(formatter, "     Email ID: {}", record.email())?;
    let Some(scratch) = &row.editing else {
        writeln!(formatter, "     Role: {}", record.role())?;
        writeln!(formatter, "     Status: {}", record.status())?;
        return writeln!(formatter, "     Permission: {}", record.permissions());
    };

    let state = if row.saving { "saving" } else { "editing" };
    writeln!(
        formatter,
        "     Role: {} ({state}; options: {})",
        scratch.role,
        role_options()
    )?;
    writeln!(
        formatter,
        "     Status: {} ({state}; options: {})",
        scratch.status,
        status_options()
    )?;
    writeln!(
        formatter,
        "     Permission: {} ({state}; options: {})",
        scratch.permissions,
        permission_options()
    )
}

fn role_options() -> String {
    join(Role::all().iter().map(Role::as_str))
}

fn status_options() -> String {
    join(AccountStatus::all().iter().map(AccountStatus::as_str))
}

fn permission_options() -> String {
    join(
        Permission::all()
            .iter()
            .map(|permission| format!("{}={}", permission.as_str(), permission.label())),
    )
}

fn join<T: AsRef<str>>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join("/")
}

struct SummaryText<'a>(&'a DirectorySummary);

impl Display for SummaryText<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(formatter, "Admin Dashboard")?;
        writeln!(formatter, "Number of Current Users: {}", summary.total)?;
        for (role, count) in &summary.by_role {
            writeln!(formatter, "  {role}: {count}")?;
        }
        for (status, count) in &summary.by_status {
            writeln!(formatter, "  {status}: {count}")?;
        }

        Ok(())
    }
}
