//! Extension based file classification.
//!
//! Every file is assigned a category label that names a folder under the
//! organized root. Known extensions map through [`CATEGORY_TABLE`]; unknown
//! extensions become their own category and files without an extension go
//! to [`NO_EXTENSION`].
//!
//! ```
//! use sortbox::file::classify;
//!
//! assert_eq!(classify("holiday.JPG"), "images");
//! assert_eq!(classify("data.parquet"), "parquet");
//! assert_eq!(classify("Makefile"), "no_extension");
//! ```

use super::name::split_name;

/// Category label for files without an extension.
pub const NO_EXTENSION: &str = "no_extension";

/// Category labels and the extensions they claim, checked in order.
///
/// The first category containing an extension wins.
pub const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    ("images", &["jpg", "jpeg", "png", "gif", "bmp", "svg", "webp"]),
    ("pdfs", &["pdf"]),
    ("documents", &["doc", "docx", "txt", "rtf", "odt"]),
    ("spreadsheets", &["xls", "xlsx", "csv", "ods"]),
    ("presentations", &["ppt", "pptx", "odp"]),
    ("archives", &["zip", "rar", "7z", "tar", "gz"]),
    ("videos", &["mp4", "mkv", "mov", "avi"]),
    ("code", &["py", "js", "html", "css", "java", "cpp", "json"]),
];

/// Lower-cased extension of a file name, without the dot.
///
/// Returns an empty string when the name has no extension.
pub fn extension_of(file_name: &str) -> String {
    let (_, ext) = split_name(file_name);
    ext.trim_start_matches('.').to_lowercase()
}

/// Map a file name to its category label.
pub fn classify(file_name: &str) -> String {
    let ext = extension_of(file_name);
    if ext.is_empty() {
        return NO_EXTENSION.to_string();
    }

    CATEGORY_TABLE
        .iter()
        .find(|(_, extensions)| extensions.contains(&ext.as_str()))
        .map(|(category, _)| (*category).to_string())
        .unwrap_or(ext)
}
