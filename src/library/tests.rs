use super::*;
use std::fs;
use tempfile::tempdir;

fn t(file: &str, tags: &[&str]) -> Track {
    Track {
        file: file.into(),
        title: file.trim_end_matches(".mp3").to_uppercase(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
    }
}

fn scenario_catalog() -> Vec<Track> {
    vec![
        t("a.mp3", &["rock"]),
        t("b.mp3", &["jazz"]),
        t("c.mp3", &["rock", "live"]),
    ]
}

fn files<'a>(playlist: &FilteredPlaylist, catalog: &'a [Track]) -> Vec<&'a str> {
    playlist
        .tracks(catalog)
        .into_iter()
        .map(|t| t.file.as_str())
        .collect()
}

#[test]
fn empty_selection_keeps_whole_catalog_in_order() {
    let catalog = scenario_catalog();
    let playlist = filter(&catalog, &TagSelection::default());
    assert_eq!(playlist.positions(), &[0, 1, 2]);
}

#[test]
fn selection_keeps_tracks_with_any_selected_tag() {
    let catalog = scenario_catalog();
    let playlist = filter(&catalog, &TagSelection::from_tags(["rock"]));
    assert_eq!(files(&playlist, &catalog), vec!["a.mp3", "c.mp3"]);

    let playlist = filter(&catalog, &TagSelection::from_tags(["jazz", "live"]));
    assert_eq!(files(&playlist, &catalog), vec!["b.mp3", "c.mp3"]);
}

#[test]
fn filter_result_is_an_ordered_subsequence_and_sound() {
    let catalog = vec![
        t("1.mp3", &["x"]),
        t("2.mp3", &[]),
        t("3.mp3", &["y", "z"]),
        t("4.mp3", &["z"]),
        t("5.mp3", &["x", "w"]),
    ];
    let selection = TagSelection::from_tags(["z", "w"]);
    let playlist = filter(&catalog, &selection);

    assert!(playlist.positions().windows(2).all(|w| w[0] < w[1]));
    for (i, track) in catalog.iter().enumerate() {
        let kept = playlist.positions().contains(&i);
        let hits = track.tags.iter().any(|tag| selection.contains(tag));
        assert_eq!(kept, hits, "track {}", track.file);
    }
}

#[test]
fn unknown_selected_tag_is_harmless() {
    let catalog = scenario_catalog();
    let playlist = filter(&catalog, &TagSelection::from_tags(["rock", "polka"]));
    assert_eq!(files(&playlist, &catalog), vec!["a.mp3", "c.mp3"]);

    let playlist = filter(&catalog, &TagSelection::from_tags(["polka"]));
    assert!(playlist.is_empty());
}

#[test]
fn all_tags_is_sorted_by_code_point_and_deduplicated() {
    let catalog = vec![
        t("1.mp3", &["rock", "Ambient"]),
        t("2.mp3", &["éclair", "rock"]),
        t("3.mp3", &["ambient"]),
    ];
    assert_eq!(
        all_tags(&catalog),
        vec!["Ambient", "ambient", "rock", "éclair"]
    );
}

#[test]
fn listed_tags_keep_selected_tags_missing_from_catalog() {
    let tags = all_tags(&scenario_catalog());
    let sel = TagSelection::from_tags(["polka", "rock"]);
    assert_eq!(listed_tags(&tags, &sel), vec!["jazz", "live", "polka", "rock"]);
    assert_eq!(listed_tags(&tags, &TagSelection::default()), tags);
}

#[test]
fn empty_catalog_yields_nothing() {
    assert!(all_tags(&[]).is_empty());
    assert!(filter(&[], &TagSelection::default()).is_empty());
    assert!(filter(&[], &TagSelection::from_tags(["rock"])).is_empty());
}

#[test]
fn toggle_flips_membership() {
    let mut sel = TagSelection::default();
    assert!(sel.toggle("rock"));
    assert!(sel.contains("rock"));
    assert!(!sel.toggle("rock"));
    assert!(sel.is_empty());
}

#[test]
fn track_display_falls_back_to_file() {
    let mut track = t("song.mp3", &[]);
    track.title = "  ".into();
    assert_eq!(track.display(), "song.mp3");
}

#[test]
fn json_catalog_reads_both_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
  "tracks": [
    {"title": "First", "file": "a.mp3", "tags": ["rock"]},
    {"file": "b.mp3"}
  ],
  "images": [{"title": "Sky", "file": "sky.jpg"}]
}"#,
    )
    .unwrap();

    let catalog = JsonCatalog::new(&path);
    let tracks = catalog.tracks();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "First");
    assert!(tracks[0].tags.contains("rock"));
    assert!(tracks[1].tags.is_empty());
    assert_eq!(catalog.images(), vec![Image {
        file: "sky.jpg".into(),
        title: "Sky".into(),
    }]);
}

#[test]
fn json_catalog_sections_fail_independently() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"tracks": [{"file": "a.mp3", "tags": []}], "images": "oops"}"#,
    )
    .unwrap();

    let catalog = JsonCatalog::new(&path);
    assert!(matches!(
        catalog.try_images(),
        Err(CatalogError::Section { section: "images", .. })
    ));
    assert!(catalog.images().is_empty());
    assert_eq!(catalog.tracks().len(), 1);
}

#[test]
fn json_catalog_missing_or_broken_file_is_empty() {
    let dir = tempdir().unwrap();
    let missing = JsonCatalog::new(dir.path().join("nope.json"));
    assert!(matches!(missing.try_tracks(), Err(CatalogError::Read { .. })));
    assert!(missing.tracks().is_empty());

    let broken_path = dir.path().join("broken.json");
    fs::write(&broken_path, "{ not json").unwrap();
    let broken = JsonCatalog::new(&broken_path);
    assert!(matches!(broken.try_tracks(), Err(CatalogError::Json { .. })));
    assert!(broken.images().is_empty());
}

#[test]
fn json_catalog_missing_section_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"tracks": [{"file": "a.mp3"}]}"#).unwrap();

    let catalog = JsonCatalog::new(&path);
    assert!(catalog.try_images().unwrap().is_empty());
}
