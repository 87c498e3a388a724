//! Plain-text rendering of catalog snapshots.

use std::fmt::Write;

use catalog_view::format::{
    category_color, format_display_id, format_height, format_weight, page_window,
    stat_bar_width, StatTier, DEFAULT_STAT_MAX,
};
use controller::CatalogSnapshot;
use shared::{
    domain::{DisplayRow, Phase, SortDirection, ViewMode},
    error::{ErrorCode, NetworkError},
};

const BAR_CELLS: usize = 20;
const GRID_COLUMNS: usize = 3;
const CARD_WIDTH: usize = 26;

pub fn render_snapshot(snapshot: &CatalogSnapshot) -> String {
    let mut out = String::new();
    if let Some(status) = render_status(snapshot) {
        out.push_str(&status);
        out.push('\n');
    }

    if snapshot.rows.is_empty() {
        if snapshot.phase == Phase::Ready {
            out.push_str("no matching entries\n");
        }
    } else {
        match snapshot.view_mode {
            ViewMode::Table => out.push_str(&render_table(&snapshot.rows)),
            ViewMode::Grid => out.push_str(&render_grid(&snapshot.rows)),
        }
    }

    out.push_str(&render_footer(snapshot));
    out
}

/// Progress or error line; `None` once a session finished cleanly.
pub fn render_status(snapshot: &CatalogSnapshot) -> Option<String> {
    if let Some(error) = &snapshot.error {
        return Some(match snapshot.error_code {
            Some(code) => format!("error ({}): {error}", error_label(code)),
            None => format!("error: {error}"),
        });
    }
    match snapshot.phase {
        Phase::Idle => None,
        Phase::LoadingIndex => Some("loading catalog index...".to_string()),
        Phase::LoadingDetails => Some(format!(
            "loading details {:>3}% [{}]",
            snapshot.progress_percent,
            bar(f64::from(snapshot.progress_percent))
        )),
        Phase::Ready | Phase::Failed => None,
    }
}

pub fn error_label(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::NotFound => "not found",
        ErrorCode::RateLimited => "rate limited",
        ErrorCode::Unavailable => "service unavailable",
        ErrorCode::Http => "request rejected",
        ErrorCode::Transport => "network unreachable",
        ErrorCode::Decode => "unexpected response",
    }
}

pub fn render_network_error(err: &NetworkError) -> String {
    format!("error ({}): {err}\n", error_label(err.code()))
}

pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<14} {:<18} {:>7} {:>8} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}",
        "ID", "Name", "Types", "Height", "Weight", "HP", "Atk", "Def", "SpA", "SpD", "Spe", "Exp"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<6} {:<14} {:<18} {:>7} {:>8} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4}",
            format_display_id(row.id),
            row.name,
            row.categories.join("/"),
            format_height(row.record.height),
            format_weight(row.record.weight),
            row.hp,
            row.attack,
            row.defense,
            row.special_attack,
            row.special_defense,
            row.speed,
            row.experience,
        );
    }
    out
}

pub fn render_grid(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    for chunk in rows.chunks(GRID_COLUMNS) {
        let headers: Vec<String> = chunk
            .iter()
            .map(|row| format!("{} {}", format_display_id(row.id), row.name))
            .collect();
        let types: Vec<String> = chunk.iter().map(|row| row.categories.join(" ")).collect();
        for line in [headers, types] {
            let cells: Vec<String> = line
                .iter()
                .map(|cell| format!("{cell:<CARD_WIDTH$}"))
                .collect();
            let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
        }
        out.push('\n');
    }
    out
}

/// `page X of Y` plus the clickable window, current page bracketed.
pub fn render_footer(snapshot: &CatalogSnapshot) -> String {
    let arrow = match snapshot.sort_direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    let window: Vec<String> = page_window(snapshot.current_page, snapshot.total_pages)
        .into_iter()
        .map(|page| {
            if page == snapshot.current_page {
                format!("[{}]", page + 1)
            } else {
                (page + 1).to_string()
            }
        })
        .collect();

    let mut out = format!(
        "page {} of {} | {} items | {} per page | sort {} {}",
        if snapshot.total_pages == 0 { 0 } else { snapshot.current_page + 1 },
        snapshot.total_pages,
        snapshot.total_items,
        snapshot.page_size,
        snapshot.sort_key,
        arrow,
    );
    if !window.is_empty() {
        let _ = write!(out, " | {}", window.join(" "));
    }
    if !snapshot.search_term.is_empty() {
        let _ = write!(out, " | search '{}'", snapshot.search_term);
    }
    if !snapshot.selected_categories.is_empty() {
        let selected: Vec<&str> = snapshot
            .selected_categories
            .iter()
            .map(String::as_str)
            .collect();
        let _ = write!(out, " | types {}", selected.join(","));
    }
    out.push('\n');
    out
}

pub fn render_detail(row: &DisplayRow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", format_display_id(row.id), row.name);
    let categories: Vec<String> = row
        .categories
        .iter()
        .map(|c| format!("{c} ({})", category_color(c)))
        .collect();
    let _ = writeln!(out, "types:      {}", categories.join(", "));
    let _ = writeln!(out, "height:     {}", format_height(row.record.height));
    let _ = writeln!(out, "weight:     {}", format_weight(row.record.weight));
    let _ = writeln!(out, "experience: {}", row.experience);
    if !row.image.is_empty() {
        let _ = writeln!(out, "image:      {}", row.image);
    }
    for (label, value) in [
        ("HP", row.hp),
        ("Attack", row.attack),
        ("Defense", row.defense),
        ("Sp. Atk", row.special_attack),
        ("Sp. Def", row.special_defense),
        ("Speed", row.speed),
    ] {
        let tier = match StatTier::for_value(value, DEFAULT_STAT_MAX) {
            StatTier::High => "high",
            StatTier::Medium => "medium",
            StatTier::Low => "low",
        };
        let _ = writeln!(
            out,
            "{label:<8} {value:>3} [{}] {tier}",
            bar(stat_bar_width(value, DEFAULT_STAT_MAX))
        );
    }
    out
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_CELLS as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
