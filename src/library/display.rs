use std::io::Cursor;
use std::path::Path;

use lofty::prelude::*;

use crate::config::TrackDisplayField;

/// Tag fields used to compose display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Read title/artist/album from in-memory file bytes. Unreadable or untagged
/// files yield empty tags.
pub fn read_tags(bytes: &[u8]) -> TrackTags {
    let probed = match lofty::probe::Probe::new(Cursor::new(bytes)).guess_file_type() {
        Ok(probe) => probe.read(),
        Err(e) => {
            log::debug!("cannot probe file type: {e}");
            return TrackTags::default();
        }
    };
    let tagged = match probed {
        Ok(tagged) => tagged,
        Err(e) => {
            log::debug!("no tags read: {e}");
            return TrackTags::default();
        }
    };

    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return TrackTags::default();
    };
    TrackTags {
        title: non_blank(tag.title().as_deref()),
        artist: non_blank(tag.artist().as_deref()),
        album: non_blank(tag.album().as_deref()),
    }
}

/// Whether any of `fields` needs tag data.
pub fn needs_tags(fields: &[TrackDisplayField]) -> bool {
    fields.iter().any(|f| *f != TrackDisplayField::Filename)
}

/// Build a display name from `fields` joined by `sep`.
///
/// Missing tag fields are skipped; when nothing is produced the file name is
/// used.
pub fn display_from_fields(
    path: &Path,
    tags: &TrackTags,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let parts: Vec<&str> = fields
        .iter()
        .filter_map(|f| match f {
            TrackDisplayField::Filename => Some(file_name.as_str()),
            TrackDisplayField::Title => tags.title.as_deref(),
            TrackDisplayField::Artist => tags.artist.as_deref(),
            TrackDisplayField::Album => tags.album.as_deref(),
        })
        .collect();

    if parts.is_empty() {
        file_name
    } else {
        parts.join(sep)
    }
}
