use super::*;
use shared::domain::{ArtworkSprites, AttributeStat, CategorySlot, NamedResource, Sprites};

fn named(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

fn record(id: u32, name: &str, categories: &[&str], stats: &[(&str, u32)]) -> Arc<DetailRecord> {
    Arc::new(DetailRecord {
        id,
        name: name.to_string(),
        base_experience: Some(id * 10),
        height: 7,
        weight: 69,
        types: categories
            .iter()
            .enumerate()
            .map(|(i, c)| CategorySlot {
                slot: i as u32 + 1,
                category: named(c),
            })
            .collect(),
        stats: stats
            .iter()
            .map(|(n, v)| AttributeStat {
                base_stat: *v,
                effort: 0,
                attribute: named(n),
            })
            .collect(),
        sprites: Sprites {
            front_default: Some(format!("https://img/{id}.png")),
            ..Sprites::default()
        },
    })
}

fn row(id: u32, name: &str, categories: &[&str]) -> DisplayRow {
    to_display_row(&record(id, name, categories, &[]))
}

fn ids(rows: &[DisplayRow]) -> Vec<u32> {
    rows.iter().map(|r| r.id).collect()
}

fn starters() -> Vec<DisplayRow> {
    vec![
        row(4, "charmander", &["fire"]),
        row(6, "charizard", &["fire", "flying"]),
        row(25, "pikachu", &["electric"]),
        row(7, "squirtle", &["water"]),
    ]
}

#[test]
fn display_row_flattens_record() {
    let source = record(
        6,
        "charizard",
        &["fire", "flying"],
        &[
            ("hp", 78),
            ("attack", 84),
            ("defense", 78),
            ("special-attack", 109),
            ("special-defense", 85),
            ("speed", 100),
        ],
    );
    let row = to_display_row(&source);

    assert_eq!(row.id, 6);
    assert_eq!(row.name, "Charizard");
    assert_eq!(row.categories, vec!["Fire".to_string(), "Flying".to_string()]);
    assert_eq!(row.image, "https://img/6.png");
    assert_eq!(row.weight, 6.9);
    assert_eq!(row.height, 0.7);
    assert_eq!(row.experience, 60);
    assert_eq!(
        (row.hp, row.attack, row.defense, row.special_attack, row.special_defense, row.speed),
        (78, 84, 78, 109, 85, 100)
    );
    assert!(Arc::ptr_eq(&row.record, &source));
}

#[test]
fn missing_attributes_default_to_zero() {
    let row = to_display_row(&record(132, "ditto", &["normal"], &[("hp", 48)]));
    assert_eq!(row.hp, 48);
    assert_eq!(row.attack, 0);
    assert_eq!(row.defense, 0);
    assert_eq!(row.special_attack, 0);
    assert_eq!(row.special_defense, 0);
    assert_eq!(row.speed, 0);

    let mut bare = (*record(1, "x", &[], &[])).clone();
    bare.base_experience = None;
    assert_eq!(to_display_row(&Arc::new(bare)).experience, 0);
}

#[test]
fn image_falls_back_through_candidates_then_empty() {
    let mut alt = (*record(1, "bulbasaur", &["grass"], &[])).clone();
    alt.sprites = Sprites::default();
    alt.sprites.other.official_artwork = ArtworkSprites {
        front_default: Some("https://img/art/1.png".into()),
        ..ArtworkSprites::default()
    };
    alt.sprites.back_default = Some("https://img/back/1.png".into());
    assert_eq!(to_display_row(&Arc::new(alt.clone())).image, "https://img/art/1.png");

    alt.sprites = Sprites::default();
    assert_eq!(to_display_row(&Arc::new(alt)).image, "");
}

#[test]
fn capitalize_only_touches_first_character() {
    assert_eq!(capitalize("mr-mime"), "Mr-mime");
    assert_eq!(capitalize("Already"), "Already");
    assert_eq!(capitalize("élan"), "Élan");
    assert_eq!(capitalize(""), "");
}

#[test]
fn blank_search_term_keeps_rows_unchanged() {
    let rows = starters();
    assert_eq!(filter_rows(rows.clone(), ""), rows);
    assert_eq!(filter_rows(rows.clone(), "   "), rows);
}

#[test]
fn search_matches_name_category_and_id() {
    assert_eq!(ids(&filter_rows(starters(), "char")), vec![4, 6]);
    assert_eq!(ids(&filter_rows(starters(), "CHAR")), vec![4, 6]);
    assert_eq!(ids(&filter_rows(starters(), "fly")), vec![6]);
    assert_eq!(ids(&filter_rows(starters(), "25")), vec![25]);
    assert_eq!(ids(&filter_rows(starters(), "7")), vec![7]);
    assert!(filter_rows(starters(), "mew").is_empty());
}

#[test]
fn category_filter_keeps_rows_with_any_selected_category() {
    let rows = vec![row(6, "charizard", &["fire", "flying"]), row(7, "squirtle", &["water"])];
    let fire: BTreeSet<String> = ["Fire".to_string()].into_iter().collect();
    assert_eq!(ids(&filter_by_categories(rows.clone(), &fire)), vec![6]);

    let either: BTreeSet<String> = ["Water".to_string(), "Flying".to_string()].into_iter().collect();
    assert_eq!(ids(&filter_by_categories(rows.clone(), &either)), vec![6, 7]);

    assert_eq!(ids(&filter_by_categories(rows, &BTreeSet::new())), vec![6, 7]);
}

#[test]
fn sort_is_stable_for_equal_keys_in_both_directions() {
    // Same single category, distinct identity.
    let rows = vec![
        row(10, "caterpie", &["bug"]),
        row(1, "bulbasaur", &["grass"]),
        row(13, "weedle", &["bug"]),
        row(2, "ivysaur", &["grass"]),
    ];

    let asc = sort_rows(rows.clone(), SortKey::Types, SortDirection::Ascending);
    assert_eq!(ids(&asc), vec![10, 13, 1, 2]);

    let desc = sort_rows(rows, SortKey::Types, SortDirection::Descending);
    assert_eq!(ids(&desc), vec![1, 2, 10, 13]);
}

#[test]
fn sort_compares_joined_categories() {
    let rows = vec![
        row(1, "a", &["grass", "poison"]),
        row(2, "b", &["grass"]),
        row(3, "c", &["fire"]),
    ];
    let sorted = sort_rows(rows, SortKey::Types, SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec![3, 2, 1]);
}

#[test]
fn sort_by_name_ignores_case_first() {
    let mut rows = vec![row(1, "zubat", &[]), row(2, "abra", &[]), row(3, "Mew", &[])];
    rows[2].name = "mew".to_string();
    rows.push(row(4, "Mew", &[]));
    let sorted = sort_rows(rows, SortKey::Name, SortDirection::Ascending);
    assert_eq!(
        sorted.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["Abra", "mew", "Mew", "Zubat"]
    );
}

#[test]
fn sort_numeric_fields_by_value() {
    let mut rows = starters();
    rows[0].weight = 8.5;
    rows[1].weight = 90.5;
    rows[2].weight = 6.0;
    rows[3].weight = 9.0;
    let sorted = sort_rows(rows, SortKey::Weight, SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec![25, 4, 7, 6]);
}

#[test]
fn sort_by_id_descending_reverses_ascending_exactly() {
    let asc = sort_rows(starters(), SortKey::Id, SortDirection::Ascending);
    assert_eq!(ids(&asc), vec![4, 6, 7, 25]);
    let desc = sort_rows(asc.clone(), SortKey::Id, SortDirection::Descending);
    let mut reversed = ids(&asc);
    reversed.reverse();
    assert_eq!(ids(&desc), reversed);
}

#[test]
fn paginate_length_matches_bounds() {
    let rows: Vec<u32> = (0..23).collect();
    for size in [1usize, 5, 10, 25] {
        for page in 0..30usize {
            let expected = size.min(rows.len().saturating_sub(page * size));
            assert_eq!(paginate(&rows, page, size).len(), expected, "page {page} size {size}");
        }
    }
    assert_eq!(paginate(&rows, 2, 10), &[20, 21, 22]);
    assert!(paginate(&rows, 3, 10).is_empty());
    assert!(paginate(&rows, usize::MAX, 10).is_empty());
    assert!(paginate::<u32>(&[], 0, 10).is_empty());
}

#[test]
fn total_pages_rounds_up() {
    assert_eq!(total_pages(151, 10), 16);
    assert_eq!(total_pages(150, 50), 3);
    assert_eq!(total_pages(0, 25), 0);
    assert_eq!(total_pages(5, 0), 0);
}

#[test]
fn locale_cmp_orders_case_insensitively() {
    assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
    assert_eq!(locale_cmp("Fire, Flying", "Fire"), Ordering::Greater);
    assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
}

#[test]
fn locale_cmp_puts_lowercase_first_on_case_only_ties() {
    assert_eq!(locale_cmp("a", "A"), Ordering::Less);
    assert_eq!(locale_cmp("Mr. Mime", "mr. mime"), Ordering::Greater);
    assert_eq!(locale_cmp("abc", "ABD"), Ordering::Less);
}
