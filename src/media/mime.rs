use std::path::Path;

/// Accepted-audio predicate applied to a file's declared type.
pub fn is_accepted_audio(mime: &str) -> bool {
    mime.trim()
        .get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("audio/"))
        .unwrap_or(false)
}

/// Declare a MIME type for `path` from its extension, the way a browser file
/// input would. Unknown extensions are `application/octet-stream`.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("m4a" | "mp4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("aif" | "aiff") => "audio/aiff",
        Some("txt") => "text/plain",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
