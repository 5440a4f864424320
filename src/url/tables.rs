//! Constant tables used by the trap filter

use std::collections::HashSet;
use std::sync::LazyLock;

/// File extensions that are never worth crawling
///
/// Matched case-insensitively against the text after the last `.` of the
/// URL path. Grouped by kind; order inside a group carries no meaning.
pub const DENIED_EXTENSIONS: &[&str] = &[
    // stylesheets, scripts and source code
    "css", "js", "py", "java", "r", "sas", "sql", "tex", "jar", "war",
    // images
    "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "psd", "exr",
    // audio
    "mid", "mp2", "mp3", "wav", "ram", "ogg", "wma", "wvx",
    // video and streaming
    "mp4", "avi", "mov", "mpeg", "mpg", "m4v", "mkv", "ogv", "webm", "wmv", "swf", "smil", "rm",
    // documents
    "pdf", "ps", "eps", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "rtf", "epub", "thmx",
    "mso",
    // executables and disk images
    "exe", "msi", "bin", "dll", "dmg", "iso",
    // archives
    "bz2", "tar", "7z", "tgz", "zip", "rar", "gz",
    // datasets and dumps
    "names", "data", "dat", "cnf", "sha1", "arff", "csv", "tsv", "db", "klg", "ply", "hdf5",
    "seq", "bam", "npz", "bw",
    // filesystem droppings
    "ds_store",
];

/// Query fragments that mark session, share and export traps
pub const TRAP_QUERY_MARKERS: &[&str] = &["share=", "action=download"];

/// Schemes the crawler follows
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

static DENIED_EXTENSION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| DENIED_EXTENSIONS.iter().copied().collect());

/// Returns the denied extension a path ends with, if any
///
/// # Examples
///
/// ```
/// use trawl::url::denied_extension;
///
/// assert_eq!(denied_extension("/papers/Thesis.PDF"), Some("pdf".to_string()));
/// assert_eq!(denied_extension("/about/index.html"), None);
/// ```
pub fn denied_extension(path: &str) -> Option<String> {
    let lowered = path.to_ascii_lowercase();
    let (_, ext) = lowered.rsplit_once('.')?;

    if DENIED_EXTENSION_SET.contains(ext) {
        Some(ext.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_extensions() {
        assert_eq!(denied_extension("/page.pdf"), Some("pdf".to_string()));
        assert_eq!(denied_extension("/a/b/photo.JPEG"), Some("jpeg".to_string()));
        assert_eq!(denied_extension("/dump.tar.gz"), Some("gz".to_string()));
        assert_eq!(denied_extension("/~user/hw1.py"), Some("py".to_string()));
        assert_eq!(denied_extension("/.DS_Store"), Some("ds_store".to_string()));
    }

    #[test]
    fn test_allowed_paths() {
        assert_eq!(denied_extension("/"), None);
        assert_eq!(denied_extension(""), None);
        assert_eq!(denied_extension("/index.html"), None);
        assert_eq!(denied_extension("/about.php"), None);
        assert_eq!(denied_extension("/courses/cs121"), None);
    }

    #[test]
    fn test_extension_must_follow_last_dot() {
        // ".pdf" in a directory name does not make the page a pdf
        assert_eq!(denied_extension("/files.pdf/listing"), None);
        assert_eq!(denied_extension("/pdf"), None);
        assert_eq!(denied_extension("/report.pdfx"), None);
    }

    #[test]
    fn test_table_has_no_duplicates() {
        assert_eq!(DENIED_EXTENSION_SET.len(), DENIED_EXTENSIONS.len());
        assert!(DENIED_EXTENSIONS
            .iter()
            .all(|ext| *ext == ext.to_ascii_lowercase()));
    }
}
