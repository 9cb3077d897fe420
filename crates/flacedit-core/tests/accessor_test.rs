//! Integration tests for reading and writing FLAC tags on disk.
//!
//! The fixtures are synthesized: a `fLaC` stream marker followed by a single
//! STREAMINFO block and no audio frames. That is the smallest stream the tag
//! library accepts, and enough to exercise the read-modify-save cycle.

use flacedit_core::{FlacAccessor, MemoryJournal, PendingEdits, TagSet, TagStore, Validator};
use log::Level;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Bytes of a minimal FLAC stream: 44.1 kHz, stereo, 16 bit, zero samples.
fn minimal_flac() -> Vec<u8> {
    let mut bytes = b"fLaC".to_vec();
    // Last metadata block, type STREAMINFO, 34 bytes long
    bytes.extend_from_slice(&[0x80, 0x00, 0x00, 0x22]);
    // Min/max block size
    bytes.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]);
    // Min/max frame size (unknown)
    bytes.extend_from_slice(&[0x00; 6]);
    // Sample rate, channels, bits per sample, high bits of total samples
    let info: u32 = (44_100 << 12) | (1 << 9) | (15 << 4);
    bytes.extend_from_slice(&info.to_be_bytes());
    // Low bits of total samples
    bytes.extend_from_slice(&[0x00; 4]);
    // MD5 signature
    bytes.extend_from_slice(&[0x00; 16]);
    bytes
}

fn flac_fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("test.flac");
    fs::write(&path, minimal_flac()).unwrap();
    path
}

fn single(field: &str, value: &str) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(field, value);
    tags
}

fn read(path: &Path) -> TagSet {
    let journal = MemoryJournal::new();
    FlacAccessor::new(&journal)
        .try_read(path)
        .expect("fixture should be readable")
}

#[test]
fn test_read_untagged_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);

    let tags = read(&path);
    assert!(tags.is_empty());
}

#[test]
fn test_read_nonexistent_path_returns_none() {
    let dir = TempDir::new().unwrap();
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let result = accessor.read(&dir.path().join("missing.flac"));
    assert!(result.is_none());
    assert!(journal.contains(Level::Error, "File not found"));
}

#[test]
fn test_read_non_flac_returns_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.flac");
    fs::write(&path, "this is not an audio file at all").unwrap();

    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let err = accessor.try_read(&path).unwrap_err();
    assert!(err.is_invalid_container(), "unexpected error: {err}");

    assert!(accessor.read(&path).is_none());
    assert!(journal.contains(Level::Error, "Invalid FLAC file"));
}

#[test]
fn test_read_truncated_file_returns_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.flac");
    fs::write(&path, &minimal_flac()[..10]).unwrap();

    let journal = MemoryJournal::new();
    assert!(FlacAccessor::new(&journal).read(&path).is_none());
    assert_eq!(journal.count(Level::Error), 1);
}

#[test]
fn test_write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    assert!(accessor.write(&path, &single("TITLE", "New Title")).is_some());

    let tags = read(&path);
    assert_eq!(tags.get("TITLE"), Some(&["New Title".to_string()][..]));
}

#[test]
fn test_write_replaces_existing_field_and_keeps_others() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let mut initial = TagSet::new();
    initial.insert("TITLE", "Old Title");
    initial.insert_values("ARTIST", vec!["One".to_string(), "Two".to_string()]);
    accessor.try_write(&path, &initial).unwrap();

    accessor.try_write(&path, &single("TITLE", "New Title")).unwrap();

    let tags = read(&path);
    assert_eq!(tags.get("TITLE"), Some(&["New Title".to_string()][..]));
    assert_eq!(
        tags.get("ARTIST"),
        Some(&["One".to_string(), "Two".to_string()][..])
    );
}

#[test]
fn test_write_keeps_order_of_untouched_multi_value_field() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let artists = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
    let mut initial = TagSet::new();
    initial.insert_values("ARTIST", artists.clone());
    initial.insert("TITLE", "Old Title");
    initial.insert("ALBUM", "Old Album");
    accessor.try_write(&path, &initial).unwrap();

    accessor.try_write(&path, &single("TITLE", "New Title")).unwrap();
    accessor.try_write(&path, &single("ALBUM", "New Album")).unwrap();

    let tags = read(&path);
    assert_eq!(tags.get("ARTIST"), Some(&artists[..]));
    assert_eq!(tags.first("TITLE"), Some("New Title"));
    assert_eq!(tags.first("ALBUM"), Some("New Album"));
}

#[test]
fn test_write_replaces_field_stored_in_other_case() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    accessor.try_write(&path, &single("title", "Old")).unwrap();
    assert_eq!(read(&path).get_ignore_case("TITLE"), vec!["Old"]);

    accessor.try_write(&path, &single("TITLE", "New")).unwrap();

    let tags = read(&path);
    assert_eq!(tags.get("title"), None);
    assert_eq!(tags.get_ignore_case("TITLE"), vec!["New"]);
}

#[test]
fn test_write_replaces_whole_sequence() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let mut initial = TagSet::new();
    initial.insert_values("GENRE", vec!["Jazz".to_string(), "Blues".to_string()]);
    accessor.try_write(&path, &initial).unwrap();
    accessor.try_write(&path, &single("GENRE", "Rock")).unwrap();

    assert_eq!(read(&path).get("GENRE"), Some(&["Rock".to_string()][..]));
}

#[test]
fn test_write_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let mut edits = TagSet::new();
    edits.insert("TITLE", "Song");
    edits.insert_values("ARTIST", vec!["A".to_string(), "B".to_string()]);

    accessor.try_write(&path, &edits).unwrap();
    let once = read(&path);
    accessor.try_write(&path, &edits).unwrap();
    let twice = read(&path);

    assert_eq!(once, twice);
    assert_eq!(once, edits);
}

#[test]
fn test_write_empty_edits_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let before = fs::read(&path).unwrap();

    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    assert!(accessor.write(&path, &TagSet::new()).is_none());
    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(journal.contains(Level::Error, "No valid metadata"));
}

#[test]
fn test_write_to_missing_file_returns_none() {
    let dir = TempDir::new().unwrap();
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    let result = accessor.write(&dir.path().join("missing.flac"), &single("TITLE", "x"));
    assert!(result.is_none());
    assert!(!dir.path().join("missing.flac").exists());
}

#[test]
fn test_write_to_non_flac_returns_none_and_preserves_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.flac");
    fs::write(&path, "plain text").unwrap();

    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    assert!(accessor.write(&path, &single("TITLE", "x")).is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), "plain text");
}

#[test]
fn test_failed_save_returns_none_and_logs() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    // Privileged users can write through read-only permissions.
    if fs::OpenOptions::new().write(true).open(&path).is_ok() {
        return;
    }

    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    assert!(accessor.read(&path).is_some());
    assert!(accessor.write(&path, &single("TITLE", "x")).is_none());
    assert!(journal.contains(Level::Error, "Unexpected error on"));
    assert!(read(&path).is_empty());
}

#[test]
fn test_pending_edits_validate_and_save() {
    let dir = TempDir::new().unwrap();
    let path = flac_fixture(&dir);
    let journal = MemoryJournal::new();
    let accessor = FlacAccessor::new(&journal);

    accessor
        .try_write(&path, &single("ARTIST", "Old Artist"))
        .unwrap();

    let mut pending = PendingEdits::new();
    pending.set("TITLE", "New Title");
    pending.set("ARTIST", "");
    pending.set("TEST", "Test Value");

    let validated = Validator::new(&journal).validate(&pending.into_raw());
    assert!(accessor.write(&path, &validated).is_some());

    let tags = read(&path);
    assert_eq!(tags.first("TITLE"), Some("New Title"));
    assert_eq!(tags.first("ARTIST"), Some("Old Artist"));
    assert_eq!(tags.first("TEST"), Some("Test Value"));
}
