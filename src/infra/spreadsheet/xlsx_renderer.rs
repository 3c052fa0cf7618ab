use crate::domain::models::spreadsheet::{Cell, Sheet};
use crate::domain::ports::SpreadsheetRenderer;
use crate::error::AppError;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Excel refuses cells longer than this many characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Renders sheets as Office Open XML workbooks with a bold header row.
pub struct XlsxRenderer;

// Logged once by `AppError::into_response`.
fn render_error(e: XlsxError) -> AppError {
    AppError::InternalWithMsg(format!("xlsx rendering failed: {}", e))
}

fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

impl SpreadsheetRenderer for XlsxRenderer {
    fn render(&self, sheet: &Sheet) -> Result<Vec<u8>, AppError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name).map_err(render_error)?;

        for (col, column) in sheet.columns.iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, column.width).map_err(render_error)?;
            worksheet.write_string_with_format(0, col, &column.header, &header_format).map_err(render_error)?;
        }

        for (index, cells) in sheet.rows.iter().enumerate() {
            let row = (index + 1) as u32;
            for (col, cell) in cells.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => worksheet.write_string(row, col, fit_cell(text)).map_err(render_error)?,
                    Cell::Number(number) => worksheet.write_number(row, col, *number).map_err(render_error)?,
                };
            }
        }

        workbook.save_to_buffer().map_err(render_error)
    }
}
