use super::*;
use crate::{error::ErrorCode, error::NetworkError, protocol::IndexResponse};

const DETAIL_JSON: &str = r#"{
    "id": 6,
    "name": "charizard",
    "base_experience": 267,
    "height": 17,
    "weight": 905,
    "is_default": true,
    "order": 7,
    "types": [
        {"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}},
        {"slot": 2, "type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}}
    ],
    "stats": [
        {"base_stat": 78, "effort": 0, "stat": {"name": "hp", "url": ""}},
        {"base_stat": 84, "effort": 0, "stat": {"name": "attack", "url": ""}}
    ],
    "sprites": {
        "front_default": null,
        "back_default": "https://img/back/6.png",
        "other": {
            "official-artwork": {"front_default": "https://img/art/6.png", "front_shiny": null},
            "dream_world": {"front_default": null, "front_female": null},
            "home": {"front_default": null}
        }
    },
    "species": {"name": "charizard", "url": ""}
}"#;

#[test]
fn decodes_detail_record_and_ignores_unknown_fields() {
    let record: DetailRecord = serde_json::from_str(DETAIL_JSON).expect("decode");
    assert_eq!(record.id, 6);
    assert_eq!(record.base_experience, Some(267));
    assert_eq!(record.types.len(), 2);
    assert_eq!(record.types[1].category.name, "flying");
    assert_eq!(record.stat("hp"), Some(78));
    assert_eq!(record.stat("speed"), None);
    assert_eq!(
        record.sprites.other.official_artwork.front_default.as_deref(),
        Some("https://img/art/6.png")
    );
}

#[test]
fn detail_record_tolerates_null_experience_and_missing_sprites() {
    let record: DetailRecord = serde_json::from_str(
        r#"{"id": 10001, "name": "deoxys-attack", "base_experience": null, "height": 17, "weight": 608}"#,
    )
    .expect("decode");
    assert_eq!(record.base_experience, None);
    assert!(record.types.is_empty());
    assert!(record.sprites.candidates().iter().all(Option::is_none));
}

#[test]
fn decodes_index_response_with_url_as_reference_handle() {
    let body = r#"{
        "count": 1302,
        "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
        "previous": null,
        "results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
        ]
    }"#;
    let response: IndexResponse = serde_json::from_str(body).expect("decode");
    assert_eq!(response.count, 1302);
    assert_eq!(response.previous, None);
    assert_eq!(response.results[1].name, "ivysaur");
    assert_eq!(
        response.results[1].reference_handle,
        "https://pokeapi.co/api/v2/pokemon/2/"
    );
}

#[test]
fn extracts_numeric_id_from_reference_handle() {
    let entry = IndexEntry::new("pikachu", "https://pokeapi.co/api/v2/pokemon/25/");
    assert_eq!(entry.numeric_id(), Some(25));
    assert_eq!(IndexEntry::new("x", "https://host/pokemon/7").numeric_id(), Some(7));
    assert_eq!(IndexEntry::new("x", "https://host/pokemon/x/").numeric_id(), None);
    assert_eq!(IndexEntry::new("x", "").numeric_id(), None);
}

#[test]
fn parses_sort_keys_in_snake_and_camel_case() {
    assert_eq!("id".parse::<SortKey>(), Ok(SortKey::Id));
    assert_eq!("specialAttack".parse::<SortKey>(), Ok(SortKey::SpecialAttack));
    assert_eq!("special_defense".parse::<SortKey>(), Ok(SortKey::SpecialDefense));
    assert_eq!("Types".parse::<SortKey>(), Ok(SortKey::Types));
    assert!("colour".parse::<SortKey>().is_err());
    for key in SortKey::ALL {
        assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
    }
}

#[test]
fn page_size_accepts_only_fixed_choices() {
    assert_eq!(PageSize::try_from(25usize), Ok(PageSize::TwentyFive));
    assert!(PageSize::try_from(20usize).is_err());
    assert_eq!(PageSize::default().get(), 10);
}

#[test]
fn direction_flip_round_trips() {
    assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
    assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
}

#[test]
fn classifies_network_errors() {
    assert_eq!(NetworkError::status("detail:1", 404, "Not Found").code(), ErrorCode::NotFound);
    assert_eq!(NetworkError::status("detail:1", 429, "").code(), ErrorCode::RateLimited);
    assert_eq!(NetworkError::status("detail:1", 503, "").code(), ErrorCode::Unavailable);
    assert_eq!(NetworkError::status("detail:1", 400, "").code(), ErrorCode::Http);
    assert_eq!(NetworkError::transport("index:151", "refused").code(), ErrorCode::Transport);

    let err = NetworkError::status("index:151", 500, "Internal Server Error");
    assert_eq!(err.resource(), "index:151");
    assert_eq!(
        err.to_string(),
        "failed to fetch index:151: HTTP 500 Internal Server Error"
    );
}
