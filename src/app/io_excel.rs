// Primitives for reading Excel workbooks.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::app::{io_common::ColumnIndex, *};

/// Reads the results table in the given worksheet, or in the first one.
///
/// The cells of the percent column must be text cells, as written on the
/// panel (for example `55,9%`). A cell holding a number is rejected with
/// [`AppError::NumericPercent`]: a spreadsheet stores `55,9%` as `0.559`,
/// which cannot be told apart from a percentage written without its sign.
pub fn read_excel_results(path: &str, worksheet_name: Option<&str>) -> AppResult<Vec<RawRecord>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange: Range<DataType> = match worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyTableSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    let res = read_rows(wrange.rows(), path)?;
    info!("Read {} rows from {:?}", res.len(), path);
    Ok(res)
}

fn read_rows<'a, I>(mut rows: I, path: &str) -> AppResult<Vec<RawRecord>>
where
    I: Iterator<Item = &'a [DataType]>,
{
    let header = rows.next().context(EmptyTableSnafu { path })?;
    debug!("read_excel_results: header: {:?}", header);
    let header_cells = header
        .iter()
        .map(|c| read_cell(c, 1))
        .collect::<AppResult<Vec<String>>>()?;
    let columns = ColumnIndex::from_header(&header_cells)?;

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        let cells = row
            .iter()
            .map(|c| read_cell(c, lineno))
            .collect::<AppResult<Vec<String>>>()?;
        if cells.iter().all(|c| c.is_empty()) {
            debug!("read_excel_results: skipping empty line {}", lineno);
            continue;
        }
        if let Some(DataType::Float(_) | DataType::Int(_)) = row.get(columns.percent_position()) {
            return NumericPercentSnafu { lineno }.fail();
        }
        res.push(columns.record(&cells, lineno)?);
    }
    Ok(res)
}

// Cells are turned into text: the numbers are checked later, with the same
// rules as the CSV input.
fn read_cell(cell: &DataType, lineno: usize) -> AppResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        // Integral values are written without a decimal part.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        _ => ExcelCellSnafu {
            lineno,
            cell: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(&DataType::Float(23528.0), 2).unwrap(), "23528");
        assert_eq!(read_cell(&DataType::Float(0.5), 2).unwrap(), "0.5");
        assert_eq!(read_cell(&DataType::Int(7), 2).unwrap(), "7");
        assert_eq!(
            read_cell(&DataType::String("55,9%".to_string()), 2).unwrap(),
            "55,9%"
        );
        assert_eq!(read_cell(&DataType::Empty, 2).unwrap(), "");
        assert!(matches!(
            read_cell(&DataType::Bool(true), 3),
            Err(AppError::ExcelCell { lineno: 3, .. })
        ));
    }

    fn text(s: &str) -> DataType {
        DataType::String(s.to_string())
    }

    fn header() -> Vec<DataType> {
        ["id", "name", "candidate", "votes", "percent", "party"]
            .iter()
            .map(|h| text(h))
            .collect()
    }

    #[test]
    fn rows_of_a_sheet() {
        let sheet = vec![
            header(),
            vec![
                DataType::Float(10001.0),
                text("Avalon"),
                text("Ken McDonald"),
                DataType::Int(23528),
                text("55,9%"),
                text("Parti libéral du Canada"),
            ],
            vec![DataType::Empty; 6],
        ];
        let rows = read_rows(sheet.iter().map(|r| r.as_slice()), "sheet.xlsx").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district_id, "10001");
        assert_eq!(rows[0].vote_count, "23528");
        assert_eq!(rows[0].vote_percent_text, "55,9%");
    }

    #[test]
    fn numeric_percent_is_rejected() {
        for percent in [DataType::Float(0.559), DataType::Int(1)] {
            let sheet = vec![
                header(),
                vec![
                    text("10001"),
                    text("Avalon"),
                    text("Ken McDonald"),
                    text("23528"),
                    percent,
                    text("Parti libéral du Canada"),
                ],
            ];
            let res = read_rows(sheet.iter().map(|r| r.as_slice()), "sheet.xlsx");
            assert!(matches!(res, Err(AppError::NumericPercent { lineno: 2 })));
        }
    }

    #[test]
    fn empty_sheet() {
        let sheet: Vec<Vec<DataType>> = vec![];
        let res = read_rows(sheet.iter().map(|r| r.as_slice()), "sheet.xlsx");
        assert!(matches!(res, Err(AppError::EmptyTable { .. })));
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_results("/nonexistent/results.xlsx", None);
        assert!(matches!(res, Err(AppError::OpeningExcel { .. })));
    }
}
