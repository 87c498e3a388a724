//! Display helpers for renderers: units, ids, stat tiers, category palette, page window.

pub const DEFAULT_STAT_MAX: u32 = 255;
const PAGE_WINDOW: usize = 5;

pub const CATEGORY_NAMES: [&str; 18] = [
    "Normal", "Fire", "Water", "Electric", "Grass", "Ice", "Fighting", "Poison", "Ground",
    "Flying", "Psychic", "Bug", "Rock", "Ghost", "Dragon", "Dark", "Steel", "Fairy",
];

pub fn format_height(decimetres: u32) -> String {
    format!("{:.1} m", f64::from(decimetres) / 10.0)
}

pub fn format_weight(hectograms: u32) -> String {
    format!("{:.1} kg", f64::from(hectograms) / 10.0)
}

pub fn format_display_id(id: u32) -> String {
    format!("#{id:03}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTier {
    High,
    Medium,
    Low,
}

impl StatTier {
    pub fn for_value(value: u32, max: u32) -> Self {
        let percentage = stat_percentage(value, max);
        if percentage >= 70.0 {
            StatTier::High
        } else if percentage >= 50.0 {
            StatTier::Medium
        } else {
            StatTier::Low
        }
    }
}

fn stat_percentage(value: u32, max: u32) -> f64 {
    if max == 0 {
        return 100.0;
    }
    f64::from(value) / f64::from(max) * 100.0
}

/// Bar fill percentage, capped at 100.
pub fn stat_bar_width(value: u32, max: u32) -> f64 {
    stat_percentage(value, max).min(100.0)
}

pub fn category_color(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "normal" => "gray",
        "fire" => "red",
        "water" => "blue",
        "electric" => "yellow",
        "grass" => "green",
        "ice" => "light-blue",
        "fighting" => "dark-red",
        "poison" => "purple",
        "ground" => "ochre",
        "flying" => "indigo",
        "psychic" => "pink",
        "bug" => "light-green",
        "rock" => "brown",
        "ghost" => "dark-purple",
        "dragon" => "dark-indigo",
        "dark" => "charcoal",
        "steel" => "slate",
        "fairy" => "light-pink",
        _ => "gray",
    }
}

/// Up to five page indices around `current` for pagination controls.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let start = if current < 3 { 0 } else { current - 2 };
    (start..start + PAGE_WINDOW.min(total_pages))
        .filter(|page| *page < total_pages)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_units_with_one_decimal() {
        assert_eq!(format_height(7), "0.7 m");
        assert_eq!(format_height(20), "2.0 m");
        assert_eq!(format_weight(905), "90.5 kg");
        assert_eq!(format_weight(0), "0.0 kg");
    }

    #[test]
    fn pads_display_ids() {
        assert_eq!(format_display_id(4), "#004");
        assert_eq!(format_display_id(151), "#151");
        assert_eq!(format_display_id(1025), "#1025");
    }

    #[test]
    fn stat_tiers_follow_thresholds() {
        assert_eq!(StatTier::for_value(179, DEFAULT_STAT_MAX), StatTier::High);
        assert_eq!(StatTier::for_value(128, DEFAULT_STAT_MAX), StatTier::Medium);
        assert_eq!(StatTier::for_value(127, DEFAULT_STAT_MAX), StatTier::Low);
        assert_eq!(stat_bar_width(300, DEFAULT_STAT_MAX), 100.0);
        assert_eq!(stat_bar_width(255, 255), 100.0);
        assert_eq!(stat_bar_width(0, 255), 0.0);
    }

    #[test]
    fn category_palette_is_case_insensitive() {
        assert_eq!(category_color("Fire"), "red");
        assert_eq!(category_color("WATER"), "blue");
        assert_eq!(category_color("shadow"), "gray");
        assert!(CATEGORY_NAMES.iter().all(|name| !category_color(name).is_empty()));
    }

    #[test]
    fn page_window_tracks_current_page() {
        assert_eq!(page_window(0, 16), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(2, 16), vec![0, 1, 2, 3, 4]);
        assert_eq!(page_window(7, 16), vec![5, 6, 7, 8, 9]);
        assert_eq!(page_window(15, 16), vec![13, 14, 15]);
        assert_eq!(page_window(0, 2), vec![0, 1]);
        assert!(page_window(0, 0).is_empty());
    }
}
