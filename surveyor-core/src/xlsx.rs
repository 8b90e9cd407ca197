//! Formatted workbook rendering for the field report.

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::error::Result;
use crate::report::{REPORT_HEADERS, ReportTable};

/// Sheet holding the field rows.
pub const SHEET_NAME: &str = "Campos";

/// Fill for the first row of each folder group.
const GROUP_FILL: Color = Color::RGB(0xFFD966);
const COLUMN_WIDTH: f64 = 25.0;

/// Render the report table into an in-memory workbook.
///
/// The caller decides where the bytes land; the library never touches the
/// output path itself.
pub fn render_workbook(table: &ReportTable) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let group_format = Format::new().set_bold().set_background_color(GROUP_FILL);

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (column, header) in REPORT_HEADERS.iter().enumerate() {
        sheet.set_column_width(column as u16, COLUMN_WIDTH)?;
        sheet.write_string_with_format(0, column as u16, *header, &header_format)?;
    }

    for (index, display) in table.display_rows().iter().enumerate() {
        let row = index as u32 + 1;
        let format = if display.group_start {
            Some(&group_format)
        } else {
            None
        };
        write_text(sheet, row, 0, &display.base_folder, format)?;
        write_text(sheet, row, 1, &display.shapefile_name, format)?;
        write_text(sheet, row, 2, &display.geometry_type, format)?;
        write_text(sheet, row, 3, &display.field_name, format)?;
        write_text(sheet, row, 4, &display.data_type, format)?;
        match format {
            Some(format) => {
                sheet.write_number_with_format(row, 5, display.length as f64, format)?
            }
            None => sheet.write_number(row, 5, display.length as f64)?,
        };
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    column: u16,
    value: &str,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    match format {
        Some(format) => sheet.write_string_with_format(row, column, value, format)?,
        None => sheet.write_string(row, column, value)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::render_workbook;
    use crate::domain::FieldRecord;
    use crate::report::ReportTable;

    fn record(folder: &str, file: &str, field: &str) -> FieldRecord {
        FieldRecord {
            base_folder: folder.to_string(),
            shapefile_name: file.to_string(),
            geometry_type: "Polygon".to_string(),
            field_name: field.to_string(),
            data_type: "str".to_string(),
            length: 25,
        }
    }

    #[test]
    fn renders_zip_container_bytes() {
        let table = ReportTable::new(vec![
            record("a", "a.shp", "name"),
            record("b", "b.shp", "name"),
        ]);

        let buffer = render_workbook(&table).expect("render");
        // XLSX is a ZIP container; check the local file header magic.
        assert_eq!(&buffer[..2], b"PK");
        assert!(buffer.len() > 100);
    }

    #[test]
    fn renders_header_only_workbook_for_empty_table() {
        let table = ReportTable::new(Vec::new());
        let buffer = render_workbook(&table).expect("render");
        assert_eq!(&buffer[..2], b"PK");
    }
}
