use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crm_cli::pipeline::FileOutcome;
use crm_map::{Detection, SynonymTable, abbreviations};
use crm_model::{CanonicalField, IssueSeverity, RowIssue};

use crate::types::ImportRun;

pub fn print_fields(table: &SynonymTable) {
    let mut out = Table::new();
    out.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Synonyms"),
        header_cell("Abbreviations"),
    ]);
    apply_table_style(&mut out);
    for field in CanonicalField::ALL {
        out.add_row(vec![
            field_cell(field),
            Cell::new(field.label()),
            Cell::new(table.synonyms(field).join(", ")),
            dim_cell(abbreviations(field).join(", ")),
        ]);
    }
    println!("{out}");
}

pub fn print_detection(file: &Path, headers: &[String], detection: &Detection) {
    println!("File: {}", file.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Header"),
        header_cell("Normalized"),
        header_cell("Fields"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (column, header) in headers.iter().enumerate() {
        let fields: Vec<String> = detection
            .matches
            .iter()
            .filter(|(_, found)| found.column == column)
            .map(|(field, found)| format!("{field}: {}", found.explain()))
            .collect();
        let normalized = detection
            .normalized_headers
            .get(column)
            .map_or("", String::as_str);
        table.add_row(vec![
            Cell::new(column),
            Cell::new(header),
            dim_cell(normalized),
            if fields.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(fields.join("\n")).fg(Color::Green)
            },
        ]);
    }
    println!("{table}");

    let missing: Vec<&str> = CanonicalField::ALL
        .iter()
        .filter(|field| !detection.matches.contains_key(*field))
        .map(CanonicalField::as_str)
        .collect();
    println!(
        "Detected {}/{} fields",
        detection.matches.len(),
        CanonicalField::COUNT
    );
    if !missing.is_empty() {
        println!("Not detected: {}", missing.join(", "));
    }
}

pub fn print_summary(run: &ImportRun) {
    if let Some(path) = &run.output {
        println!("Plan: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Fields"),
        header_cell("Issues"),
        header_cell("Duplicates"),
        header_cell("Create"),
        header_cell("Skipped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = [0usize; 5];
    for outcome in &run.outcomes {
        let counts = [
            outcome.report.row_count(),
            outcome.prepared.issues.len(),
            outcome.prepared.duplicates.len(),
            outcome.plan.to_create.len(),
            outcome.plan.skipped.len(),
        ];
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        table.add_row(vec![
            Cell::new(file_name(&outcome.path)).fg(Color::Blue),
            Cell::new(counts[0]),
            fields_cell(outcome.report.detected_count()),
            count_cell(counts[1], Color::Red),
            count_cell(counts[2], Color::Yellow),
            count_cell(counts[3], Color::Green),
            count_cell(counts[4], Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(totals[1], Color::Red).add_attribute(Attribute::Bold),
        count_cell(totals[2], Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals[3], Color::Green).add_attribute(Attribute::Bold),
        count_cell(totals[4], Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_issue_table(&run.outcomes);
    if !run.failures.is_empty() {
        eprintln!("Errors:");
        for failure in &run.failures {
            eprintln!("- {}: {}", failure.path.display(), failure.message);
        }
    }
}

fn print_issue_table(outcomes: &[FileOutcome]) {
    let mut issues: Vec<(String, &RowIssue)> = Vec::new();
    let mut duplicates = Vec::new();
    for outcome in outcomes {
        let name = file_name(&outcome.path);
        issues.extend(outcome.prepared.issues.iter().map(|issue| (name.clone(), issue)));
        duplicates.extend(
            outcome
                .prepared
                .duplicates
                .iter()
                .map(|duplicate| (name.clone(), duplicate.to_string())),
        );
    }
    if issues.is_empty() && duplicates.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Row"),
        header_cell("Severity"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (file, issue) in issues {
        table.add_row(vec![
            Cell::new(file),
            Cell::new(issue.row),
            severity_cell(issue.severity),
            Cell::new(issue.field().as_str()),
            Cell::new(issue.kind.message()),
        ]);
    }
    for (file, message) in duplicates {
        table.add_row(vec![
            Cell::new(file),
            dim_cell("-"),
            severity_cell(IssueSeverity::Warning),
            Cell::new(CanonicalField::Phone.as_str()),
            Cell::new(message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn fields_cell(detected: usize) -> Cell {
    let text = format!("{detected}/{}", CanonicalField::COUNT);
    if detected == 0 {
        Cell::new(text).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new(text)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn field_cell(field: CanonicalField) -> Cell {
    Cell::new(field.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
