use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::db::models::Reading;

pub const WORKSHEET_NAME: &str = "readings";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Render `readings` as an in-memory xlsx file.
///
/// Row 0 holds the column names from [`Reading::COLUMNS`]; each reading
/// occupies one row after that, in the order given. Blocking, so call it
/// from `spawn_blocking` inside async code.
pub fn render_workbook(readings: &[Reading]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in Reading::COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, r) in readings.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_number(row, 0, r.id as f64)?;
        worksheet.write_string(row, 1, &r.timestamp)?;
        worksheet.write_number(row, 2, r.ldr)?;
        worksheet.write_number(row, 3, r.pir as f64)?;
        worksheet.write_number(row, 4, r.current)?;
        worksheet.write_number(row, 5, r.battery_voltage)?;
        worksheet.write_number(row, 6, r.battery_level)?;
        worksheet.write_number(row, 7, r.solar_voltage)?;
    }

    workbook.save_to_buffer()
}
