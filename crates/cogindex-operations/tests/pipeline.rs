use std::fs;

use cogindex_operations::{
    load_catalog, query, IndexSource, QueryOptions, RequestParams,
};
use cogindex_registry::{build_catalog, CogType, RepoCategory};
use serde_json::{json, Value};

fn index() -> Value {
    json!({
        "https://github.com/alice/audio-cogs@v3": {
            "name": "Audio-Cogs",
            "rx_category": "approved",
            "rx_branch": "v3",
            "rx_cogs": {
                "player": {
                    "type": "COG",
                    "author": ["alice"],
                    "short": "Play music",
                    "description": "Plays music\nfrom many sources",
                    "min_bot_version": "3.5.0",
                    "max_bot_version": "0.0.0",
                    "min_python_version": [3, 9, 1],
                    "requirements": ["yt-dlp"],
                    "tags": ["Music", "audio"]
                },
                "lyrics": {
                    "type": "COG",
                    "author": ["alice", "carol"],
                    "short": "Find lyrics",
                    "tags": ["music"]
                },
                "internal": { "hidden": true, "tags": ["music"] }
            }
        },
        "https://github.com/bob/fun": {
            "name": "BobFun",
            "rx_category": "unapproved",
            "rx_cogs": {
                "dice": {
                    "type": "SHARED_LIBRARY",
                    "author": ["bob"],
                    "short": "Roll dice",
                    "tags": { "0": "games" }
                }
            }
        },
        "https://github.com/eve/bad": {
            "name": "Bad",
            "rx_category": "Approved",
            "rx_cogs": { "evil": { "short": "music" } }
        }
    })
}

#[test]
fn test_unapproved_gating() {
    let approved = build_catalog(&index(), false).unwrap();
    assert_eq!(query(&approved, &QueryOptions::default()).total, 2);

    let all = build_catalog(&index(), true).unwrap();
    let page = query(&all, &QueryOptions::default());
    assert_eq!(page.total, 3);

    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["dice", "lyrics", "player"]);
}

#[test]
fn test_cog_fields_survive_the_pipeline() {
    let catalog = build_catalog(&index(), true).unwrap();
    let page = query(
        &catalog,
        &QueryOptions {
            search: "yt-dlp".into(),
            ..QueryOptions::default()
        },
    );
    assert_eq!(page.total, 1);

    let player = &page.items[0];
    assert_eq!(player.kind, CogType::Cog);
    assert_eq!(player.repo.url, "https://github.com/alice/audio-cogs");
    assert_eq!(player.repo.branch, "v3");
    assert_eq!(player.repo.category, RepoCategory::Approved);
    assert_eq!(player.max_bot_version, "");
    assert_eq!(
        player.all_requirements(),
        ["Python>=3.9.1", "Bot>=3.5.0", "yt-dlp"]
    );
    assert_eq!(player.tags, vec!["music", "audio"]);
    assert_eq!(
        player.repo.add_command(),
        "repo add audio-cogs https://github.com/alice/audio-cogs v3"
    );
    assert_eq!(player.install_command(), "cog install audio-cogs player");

    let dice = catalog.iter().find(|c| c.name == "dice").unwrap();
    assert_eq!(dice.kind, CogType::SharedLibrary);
    assert!(dice.tags.is_empty());
}

#[test]
fn test_invalid_category_is_invisible() {
    let catalog = build_catalog(&index(), true).unwrap();
    assert!(catalog.iter().all(|c| c.name != "evil"));

    let page = query(
        &catalog,
        &QueryOptions {
            search: "music".into(),
            ..QueryOptions::default()
        },
    );
    let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["lyrics", "player"]);
}

#[test]
fn test_request_params_drive_the_query() {
    let catalog = build_catalog(&index(), true).unwrap();

    let params = RequestParams::from_query("ua=1&filter_tag=MUSIC&search=<carol>");
    assert!(params.include_unapproved);

    let page = query(&catalog, &params.to_query_options(25));
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "lyrics");
}

#[test]
fn test_pagination_over_many_repositories() {
    let mut raw = serde_json::Map::new();
    for repo in 0..3 {
        let cogs: serde_json::Map<String, Value> = (0..10)
            .map(|i| (format!("cog{}", repo * 10 + i + 1), json!({ "short": "x" })))
            .collect();
        raw.insert(
            format!("https://github.com/r/{repo}"),
            json!({ "name": format!("r{repo}"), "rx_category": "approved", "rx_cogs": cogs }),
        );
    }
    let catalog = build_catalog(&Value::Object(raw), false).unwrap();

    let pages: Vec<_> = (1..=3)
        .map(|page| {
            query(
                &catalog,
                &QueryOptions {
                    page,
                    per_page: 25,
                    ..QueryOptions::default()
                },
            )
        })
        .collect();

    assert!(pages.iter().all(|p| p.page_count == 2 && p.total == 30));
    assert_eq!(pages[0].items.len(), 25);
    assert_eq!(pages[1].items.len(), 5);
    assert!(pages[2].items.is_empty());
    assert_eq!(pages[0].items[0].name, "cog1");
    assert_eq!(pages[1].items[4].name, "cog30");
}

#[test]
fn test_load_catalog_from_index_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("1-min.json");
    fs::write(&path, index().to_string()).unwrap();

    let catalog = load_catalog(&IndexSource::File(path), false).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_page_serializes_to_json() {
    let catalog = build_catalog(&index(), false).unwrap();
    let page = query(&catalog, &QueryOptions::default());
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["page"], 1);
    assert_eq!(value["page_count"], 1);
    assert_eq!(value["total"], 2);
    assert_eq!(value["items"][0]["name"], "lyrics");
    assert_eq!(value["items"][0]["repo"]["name"], "Audio-Cogs");
    assert_eq!(value["items"][1]["all_requirements"][0], "Python>=3.9.1");
}
