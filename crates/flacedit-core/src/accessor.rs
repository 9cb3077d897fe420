//! FLAC metadata access on top of `lofty`.
//!
//! [`FlacAccessor::try_read`] and [`FlacAccessor::try_write`] report typed
//! [`AccessError`]s. The [`TagStore`] methods wrap them into the optional
//! contract the CLI works with: any failure is recorded in the journal and
//! surfaces as `None`.

use lofty::config::{ParseOptions, WriteOptions};
use lofty::error::{ErrorKind, LoftyError};
use lofty::file::AudioFile;
use lofty::flac::FlacFile;
use lofty::ogg::VorbisComments;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{AccessError, AccessResult};
use crate::journal::Journal;
use crate::tags::{is_valid_field_name, TagSet};

const COMPONENT: &str = "flacedit::accessor";

/// Reads and writes the tags of a single file.
pub trait TagStore: fmt::Debug {
    /// Read all tags, or `None` if the file cannot be read.
    fn read(&self, path: &Path) -> Option<TagSet>;

    /// Merge `edits` into the file's tags and save.
    ///
    /// Each edited field replaces that field's whole value sequence; fields
    /// not mentioned are left alone. Returns `None` if nothing was saved.
    fn write(&self, path: &Path, edits: &TagSet) -> Option<()>;
}

/// [`TagStore`] for FLAC files, backed by their Vorbis comment block.
#[derive(Debug, Clone, Copy)]
pub struct FlacAccessor<'j> {
    journal: &'j dyn Journal,
}

impl<'j> FlacAccessor<'j> {
    #[must_use]
    pub fn new(journal: &'j dyn Journal) -> Self {
        Self { journal }
    }

    /// Open and parse `path`, returning every tag it carries.
    pub fn try_read(&self, path: &Path) -> AccessResult<TagSet> {
        let flac = self.open(path)?;
        Ok(self.collect_tags(path, flac.vorbis_comments()))
    }

    /// Merge `edits` into `path` and save it.
    pub fn try_write(&self, path: &Path, edits: &TagSet) -> AccessResult<()> {
        if edits.is_empty() {
            return Err(AccessError::EmptyEdits);
        }

        let mut flac = self.open(path)?;

        let mut comments = flac
            .remove_vorbis_comments()
            .unwrap_or_else(VorbisComments::new);
        let applied = self.merge(&mut comments, edits);
        flac.set_vorbis_comments(comments);

        if applied == 0 {
            return Err(AccessError::EmptyEdits);
        }

        flac.save_to_path(path, WriteOptions::default())
            .map_err(|source| AccessError::Lofty {
                path: path.to_path_buf(),
                source,
            })?;

        self.journal.info(
            COMPONENT,
            &format!("Saved {} field(s) to {}", applied, path.display()),
        );
        Ok(())
    }

    fn open(&self, path: &Path) -> AccessResult<FlacFile> {
        let mut file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AccessError::NotFound(path.to_path_buf()),
            _ => AccessError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        self.journal
            .debug(COMPONENT, &format!("Parsing {}", path.display()));

        // Keep values exactly as stored, e.g. TRACKNUMBER=3/12 stays whole.
        let options = ParseOptions::new().implicit_conversions(false);
        FlacFile::read_from(&mut file, options).map_err(|source| classify(path, source))
    }

    fn collect_tags(&self, path: &Path, comments: Option<&VorbisComments>) -> TagSet {
        let mut tags = TagSet::new();
        let Some(comments) = comments else {
            self.journal.debug(
                COMPONENT,
                &format!("{} has no Vorbis comment block", path.display()),
            );
            return tags;
        };

        for (field, value) in comments.items() {
            if !tags.push(field, value) {
                self.journal.debug(
                    COMPONENT,
                    &format!("Ignoring blank value for {} in {}", field, path.display()),
                );
            }
        }
        tags
    }

    /// Apply `edits` to `comments`, returning how many fields were written.
    ///
    /// Stored items whose key matches an edited field (ignoring ASCII case)
    /// are dropped; every other item keeps its position.
    fn merge(&self, comments: &mut VorbisComments, edits: &TagSet) -> usize {
        let storable: Vec<(&String, &Vec<String>)> = edits
            .iter()
            .filter(|(field, _)| {
                let valid = is_valid_field_name(field);
                if !valid {
                    self.journal.warn(
                        COMPONENT,
                        &format!(
                            "Field name {:?} cannot be stored in a FLAC file. Skipping.",
                            field
                        ),
                    );
                }
                valid
            })
            .collect();
        if storable.is_empty() {
            return 0;
        }

        // Vorbis comment keys compare case-insensitively.
        let is_edited = |key: &str| {
            storable
                .iter()
                .any(|(field, _)| field.eq_ignore_ascii_case(key))
        };
        let (replaced, kept): (Vec<_>, Vec<_>) =
            comments.take_items().partition(|(key, _)| is_edited(key.as_str()));

        for (key, value) in kept {
            comments.push(key, value);
        }

        let mut applied: Vec<&str> = Vec::with_capacity(storable.len());
        for &(field, values) in &storable {
            for value in values {
                comments.push(field.clone(), value.clone());
            }

            let earlier = applied
                .iter()
                .copied()
                .find(|name| name.eq_ignore_ascii_case(field));
            if let Some(earlier) = earlier {
                self.journal.warn(
                    COMPONENT,
                    &format!(
                        "Fields {:?} and {:?} name the same tag; storing the values of both.",
                        earlier, field
                    ),
                );
            } else {
                applied.push(field.as_str());
            }
        }

        self.journal.debug(
            COMPONENT,
            &format!(
                "Replaced {} stored value(s) across {} field(s)",
                replaced.len(),
                applied.len()
            ),
        );
        applied.len()
    }

    fn report(&self, path: &Path, err: &AccessError) {
        let message = match err {
            AccessError::NotFound(_) => format!("File not found: {}", path.display()),
            AccessError::InvalidContainer { reason, .. } => {
                format!("Invalid FLAC file: {} ({})", path.display(), reason)
            }
            AccessError::EmptyEdits => "No valid metadata to update.".to_string(),
            other => format!("Unexpected error on {}: {}", path.display(), other),
        };
        self.journal.error(COMPONENT, &message);
    }
}

impl TagStore for FlacAccessor<'_> {
    fn read(&self, path: &Path) -> Option<TagSet> {
        self.try_read(path)
            .map_err(|err| self.report(path, &err))
            .ok()
    }

    fn write(&self, path: &Path, edits: &TagSet) -> Option<()> {
        self.try_write(path, edits)
            .map_err(|err| self.report(path, &err))
            .ok()
    }
}

fn classify(path: &Path, source: LoftyError) -> AccessError {
    let invalid = match source.kind() {
        ErrorKind::FileDecoding(_)
        | ErrorKind::UnknownFormat
        | ErrorKind::SizeMismatch
        | ErrorKind::FakeTag => true,
        ErrorKind::Io(err) => err.kind() == io::ErrorKind::UnexpectedEof,
        _ => false,
    };

    if invalid {
        AccessError::InvalidContainer {
            path: path.to_path_buf(),
            reason: source.to_string(),
        }
    } else {
        AccessError::Lofty {
            path: path.to_path_buf(),
            source,
        }
    }
}
