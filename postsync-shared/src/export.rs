/// Spreadsheet export of stored posts
///
/// Produces an XLSX workbook with a single `Posts` sheet: a header row
/// `Title | Body` followed by one row per stored post of the user, in
/// insertion order. Author and company are not exported. A user with no
/// stored posts gets a header-only workbook rather than an error.
///
/// Excel caps a cell at 32,767 characters. Longer titles or bodies are cut
/// to that length at a character boundary, so every stored post still gets
/// its row. Data cells carry a wrap format, which keeps a post with an empty
/// title and body as a blank row instead of dropping it.

use crate::error::SyncResult;
use crate::models::post::Post;
use crate::store::Store;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::sync::Arc;
use tracing::{debug, instrument};

/// MIME type of the generated workbook
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Worksheet holding the exported rows
pub const SHEET_NAME: &str = "Posts";

/// Column headers, in order
pub const HEADERS: [&str; 2] = ["Title", "Body"];

/// Longest string Excel accepts in one cell, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// A rendered export ready to be sent as a download
#[derive(Debug, Clone)]
pub struct SpreadsheetExport {
    /// Suggested file name, `posts_<userId>.xlsx`
    pub filename: String,

    /// MIME type of `bytes`
    pub content_type: &'static str,

    /// Encoded workbook
    pub bytes: Vec<u8>,
}

/// Suggested download name for a user's export
pub fn export_filename(user_id: i64) -> String {
    format!("posts_{}.xlsx", user_id)
}

/// Cuts `value` to at most [`MAX_CELL_CHARS`] characters
pub fn fit_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Encodes posts as an XLSX workbook
pub fn render_posts_xlsx(posts: &[Post]) -> SyncResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    // An unformatted empty string is not written at all
    let cell_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 80)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, post) in posts.iter().enumerate() {
        let row = (index + 1) as u32;
        worksheet.write_string_with_format(row, 0, fit_cell(&post.title), &cell_format)?;
        worksheet.write_string_with_format(row, 1, fit_cell(&post.body), &cell_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Reads stored posts and renders them for download
#[derive(Clone)]
pub struct Exporter {
    store: Arc<dyn Store>,
}

impl Exporter {
    /// Creates an exporter reading from `store`
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Exports the stored posts of `user_id`
    ///
    /// # Errors
    ///
    /// `Store` if the posts cannot be read, `Export` if encoding fails.
    #[instrument(skip(self))]
    pub async fn export_posts_as_spreadsheet(&self, user_id: i64) -> SyncResult<SpreadsheetExport> {
        let posts = self.store.list_posts_for_user(user_id).await?;
        let bytes = render_posts_xlsx(&posts)?;

        debug!(rows = posts.len(), size = bytes.len(), "Rendered posts export");

        Ok(SpreadsheetExport {
            filename: export_filename(user_id),
            content_type: XLSX_CONTENT_TYPE,
            bytes,
        })
    }
}
