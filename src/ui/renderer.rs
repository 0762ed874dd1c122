//! Plain-text rendering of the list view.
//!
//! The renderer turns a [`ListViewModel`] into lines of text for the demo binary:
//! a header, the checkbox column (outside `browsing`), one line per item, and the
//! error dialog when present. It writes into a `String` so output can be tested.
//!
//! ```text
//! == 2 selected ==================================== [Delete]
//! [-] select all
//! [ ] 0  Summer Photos        Anthony Stevens · Wed Jul 12 2017
//! [x] 1  Surfing              Scott Masterson · Sun Jul 16 2017
//! ```

use crate::ui::viewmodel::{DialogInfo, DisplayRow, HeaderInfo, ListViewModel};
use crate::workflow::Snapshot;
use std::fmt::Write as _;

/// Width of the title bar.
const HEADER_WIDTH: usize = 58;

/// Width of the title column.
const TITLE_WIDTH: usize = 20;

/// Renders `snapshot` through its view model.
#[must_use]
pub fn render(snapshot: &Snapshot) -> String {
    render_viewmodel(&snapshot.compute_viewmodel())
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &ListViewModel) -> String {
    let mut out = String::new();
    render_header(&mut out, &vm.header);

    if vm.show_checkboxes {
        let mark = if vm.all_selected { "[x]" } else { "[-]" };
        let _ = writeln!(out, "{mark} select all");
    }

    if vm.rows.is_empty() {
        let _ = writeln!(out, "    (no items)");
    }
    for row in &vm.rows {
        render_row(&mut out, row, vm.show_checkboxes);
    }

    if vm.busy {
        let _ = writeln!(out, "... deleting");
    }

    if let Some(dialog) = &vm.dialog {
        render_dialog(&mut out, dialog);
    }

    out
}

fn render_header(out: &mut String, header: &HeaderInfo) {
    let button = format!("[{}]", header.action.label());
    let left = format!("== {} ", header.title);
    let fill = HEADER_WIDTH.saturating_sub(left.chars().count() + button.len() + 1);
    let _ = writeln!(out, "{left}{} {button}", "=".repeat(fill));
}

fn render_row(out: &mut String, row: &DisplayRow, show_checkboxes: bool) {
    let checkbox = match (show_checkboxes, row.is_selected) {
        (false, _) => "   ",
        (true, true) => "[x]",
        (true, false) => "[ ]",
    };
    let _ = writeln!(
        out,
        "{checkbox} {:<2} {:<width$} {}",
        row.id,
        row.title,
        row.subtitle,
        width = TITLE_WIDTH
    );
}

fn render_dialog(out: &mut String, dialog: &DialogInfo) {
    let buttons = dialog
        .actions
        .iter()
        .map(|action| format!("[{}]", action.label()))
        .collect::<Vec<_>>()
        .join(" ");

    let _ = writeln!(out, "+-- {} --", dialog.title);
    let _ = writeln!(out, "| {}", dialog.message);
    let _ = writeln!(out, "+-- {buttons}");
}
