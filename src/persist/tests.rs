use super::*;
use std::fs;
use tempfile::tempdir;

fn sample() -> PersistedSettings {
    PersistedSettings {
        version: SETTINGS_VERSION,
        volume: 37,
        shuffle_enabled: true,
        selected_tags: vec!["jazz".into(), "live set".into(), "ñandú".into()],
    }
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = TomlFileStore::in_dir(dir.path());
    assert!(store.try_load().unwrap().is_none());
    assert_eq!(
        store.load(),
        PersistedSettings {
            version: 1,
            volume: 100,
            shuffle_enabled: false,
            selected_tags: vec![],
        }
    );
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let mut store = TomlFileStore::in_dir(&dir.path().join("nested"));
    store.save(&sample());
    assert_eq!(store.load(), sample());
}

#[test]
fn saving_what_was_loaded_changes_nothing() {
    let dir = tempdir().unwrap();
    let mut store = TomlFileStore::in_dir(dir.path());
    store.save(&sample());

    let before = fs::read_to_string(store.path()).unwrap();
    let loaded = store.load();
    store.save(&loaded);
    let after = fs::read_to_string(store.path()).unwrap();

    assert_eq!(before, after);
    assert_eq!(store.load(), loaded);
}

#[test]
fn corrupt_blob_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = TomlFileStore::in_dir(dir.path());
    fs::write(store.path(), "volume = [[[").unwrap();

    assert!(matches!(store.try_load(), Err(StoreError::Parse(_))));
    assert_eq!(store.load(), PersistedSettings::default());
}

#[test]
fn partial_blob_is_not_trusted() {
    let dir = tempdir().unwrap();
    let store = TomlFileStore::in_dir(dir.path());
    fs::write(store.path(), "version = 1\nvolume = 20\n").unwrap();

    assert_eq!(store.load(), PersistedSettings::default());
}

#[test]
fn out_of_range_volume_or_unknown_version_loads_defaults() {
    let dir = tempdir().unwrap();
    let store = TomlFileStore::in_dir(dir.path());

    fs::write(
        store.path(),
        "version = 1\nvolume = 250\nshuffle_enabled = true\nselected_tags = []\n",
    )
    .unwrap();
    assert!(matches!(store.try_load(), Err(StoreError::Invalid(_))));
    assert_eq!(store.load(), PersistedSettings::default());

    fs::write(
        store.path(),
        "version = 9\nvolume = 50\nshuffle_enabled = true\nselected_tags = []\n",
    )
    .unwrap();
    assert_eq!(store.load(), PersistedSettings::default());
}

#[test]
fn unwritable_location_is_silent() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "").unwrap();

    // Parent "directory" is a regular file, so the write must fail.
    let mut store = TomlFileStore::in_dir(&blocker);
    assert!(store.try_save(&sample()).is_err());
    store.save(&sample());
    assert_eq!(store.load(), PersistedSettings::default());
}
