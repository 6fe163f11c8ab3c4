use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use custid_match::NameStatistics;
use custid_model::{CandidateMatch, MatchStrategy, RankedCandidates};

use crate::commands::ResolveReport;

pub fn print_resolve_summary(report: &ResolveReport) {
    let summary = &report.summary;
    println!("Input: {}", report.input.display());
    println!("Output: {}", report.output.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let direct_matches = summary.matched_existing - summary.suggestions_accepted;
    table.add_row(vec![Cell::new("Matched existing"), count_cell(direct_matches, Color::Green)]);
    table.add_row(vec![
        Cell::new("Accepted suggestion"),
        count_cell(summary.suggestions_accepted, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("New identity"), count_cell(summary.new_identities, Color::Blue)]);
    table.add_row(vec![
        Cell::new("Unknown customer"),
        count_cell(summary.placeholders, Color::DarkYellow),
    ]);
    table.add_row(vec![Cell::new("Retained"), count_cell(summary.retained, Color::Red)]);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Reference names: {} seeded, {} added",
        summary.seeded_names, summary.added_names
    );
    if summary.retained > 0 {
        eprintln!(
            "warning: {} row(s) kept unchanged; see resolved_reason in the output",
            summary.retained
        );
    }
}

pub fn print_candidates(name: &str, ranked: &RankedCandidates) {
    println!("Candidates for: {name}");
    if ranked.is_empty() {
        println!("No candidates.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Bucket"),
        header_cell("Name"),
        header_cell("Confidence"),
        header_cell("Strategy"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for candidate in &ranked.matches {
        table.add_row(candidate_row(
            Cell::new("match")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            candidate,
        ));
    }
    for candidate in &ranked.suggestions {
        table.add_row(candidate_row(
            Cell::new("suggestion").fg(Color::Yellow),
            candidate,
        ));
    }
    println!("{table}");
}

pub fn print_stats(stats: &NameStatistics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Distinct names"), Cell::new(stats.total_names)]);
    table.add_row(vec![Cell::new("Redacted names"), Cell::new(stats.redacted_names)]);
    table.add_row(vec![
        Cell::new("Redacted share"),
        Cell::new(format!("{:.1}%", stats.redacted_percentage())),
    ]);
    println!("{table}");
}

fn candidate_row(bucket: Cell, candidate: &CandidateMatch) -> Vec<Cell> {
    vec![
        bucket,
        Cell::new(&candidate.reference_name),
        Cell::new(format!("{:.1}", candidate.confidence)),
        strategy_cell(candidate.strategy),
        Cell::new(&candidate.reason),
    ]
}

fn strategy_cell(strategy: MatchStrategy) -> Cell {
    match strategy {
        MatchStrategy::Exact => Cell::new(strategy).fg(Color::Green),
        MatchStrategy::CensorPattern => Cell::new(strategy).fg(Color::Magenta),
        MatchStrategy::GeneralSimilarity => Cell::new(strategy),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
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
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
