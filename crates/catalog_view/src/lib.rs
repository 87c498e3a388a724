//! Pure row transforms: record flattening, search, category filter, sort, page slicing.

use std::{cmp::Ordering, collections::BTreeSet, sync::Arc};

use shared::domain::{DetailRecord, DisplayRow, SortDirection, SortKey};

pub mod format;

pub const STAT_HP: &str = "hp";
pub const STAT_ATTACK: &str = "attack";
pub const STAT_DEFENSE: &str = "defense";
pub const STAT_SPECIAL_ATTACK: &str = "special-attack";
pub const STAT_SPECIAL_DEFENSE: &str = "special-defense";
pub const STAT_SPEED: &str = "speed";

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_display_row(record: &Arc<DetailRecord>) -> DisplayRow {
    let stat = |name: &str| record.stat(name).unwrap_or(0);
    DisplayRow {
        id: record.id,
        name: capitalize(&record.name),
        image: record
            .sprites
            .candidates()
            .into_iter()
            .flatten()
            .next()
            .unwrap_or_default()
            .to_string(),
        categories: record
            .types
            .iter()
            .map(|slot| capitalize(&slot.category.name))
            .collect(),
        weight: f64::from(record.weight) / 10.0,
        height: f64::from(record.height) / 10.0,
        hp: stat(STAT_HP),
        experience: record.base_experience.unwrap_or(0),
        attack: stat(STAT_ATTACK),
        defense: stat(STAT_DEFENSE),
        special_attack: stat(STAT_SPECIAL_ATTACK),
        special_defense: stat(STAT_SPECIAL_DEFENSE),
        speed: stat(STAT_SPEED),
        record: Arc::clone(record),
    }
}

/// Case-insensitive substring search over name, categories and the decimal id.
/// A blank term keeps every row.
pub fn filter_rows(mut rows: Vec<DisplayRow>, search_term: &str) -> Vec<DisplayRow> {
    if search_term.trim().is_empty() {
        return rows;
    }

    let term = search_term.to_lowercase();
    rows.retain(|row| {
        row.name.to_lowercase().contains(&term)
            || row
                .categories
                .iter()
                .any(|category| category.to_lowercase().contains(&term))
            || row.id.to_string().contains(&term)
    });
    rows
}

pub fn filter_by_categories(mut rows: Vec<DisplayRow>, selected: &BTreeSet<String>) -> Vec<DisplayRow> {
    if selected.is_empty() {
        return rows;
    }

    rows.retain(|row| row.categories.iter().any(|c| selected.contains(c)));
    rows
}

enum SortValue<'a> {
    Text(&'a str),
    Joined(String),
    Int(u32),
    Real(f64),
}

fn sort_value(row: &DisplayRow, key: SortKey) -> SortValue<'_> {
    match key {
        SortKey::Id => SortValue::Int(row.id),
        SortKey::Name => SortValue::Text(&row.name),
        SortKey::Image => SortValue::Text(&row.image),
        SortKey::Types => SortValue::Joined(row.categories.join(", ")),
        SortKey::Weight => SortValue::Real(row.weight),
        SortKey::Height => SortValue::Real(row.height),
        SortKey::Hp => SortValue::Int(row.hp),
        SortKey::Experience => SortValue::Int(row.experience),
        SortKey::Attack => SortValue::Int(row.attack),
        SortKey::Defense => SortValue::Int(row.defense),
        SortKey::SpecialAttack => SortValue::Int(row.special_attack),
        SortKey::SpecialDefense => SortValue::Int(row.special_defense),
        SortKey::Speed => SortValue::Int(row.speed),
    }
}

/// Collation used for text columns: case-folded comparison first, then
/// lowercase before uppercase so distinct values never compare equal.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => locale_cmp(a, b),
        (SortValue::Joined(a), SortValue::Joined(b)) => locale_cmp(a, b),
        (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
        (SortValue::Real(a), SortValue::Real(b)) => a.total_cmp(b),
        _ => Ordering::Equal,
    }
}

/// Stable sort; equal keys keep their input order in both directions.
pub fn sort_rows(mut rows: Vec<DisplayRow>, key: SortKey, direction: SortDirection) -> Vec<DisplayRow> {
    rows.sort_by(|a, b| {
        let ordering = compare_values(&sort_value(a, key), &sort_value(b, key));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    rows
}

/// `[page * page_size, page * page_size + page_size)` clipped to bounds.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page.checked_mul(page_size) else {
        return &[];
    };
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
