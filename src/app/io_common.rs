// Column layout of the results tables.

use crate::app::*;

pub const COLUMNS: [&str; 6] = ["id", "name", "candidate", "votes", "percent", "party"];

/// Positions of the columns, found from the first row of the table.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnIndex {
    positions: [usize; 6],
}

impl ColumnIndex {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> AppResult<ColumnIndex> {
        let mut positions = [0usize; 6];
        for (slot, column) in positions.iter_mut().zip(COLUMNS.iter()) {
            *slot = header
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(column))
                .context(MissingColumnSnafu { column: *column })?;
        }
        debug!("ColumnIndex: {:?}", positions);
        Ok(ColumnIndex { positions })
    }

    pub fn percent_position(&self) -> usize {
        self.positions[4]
    }

    /// Builds the record of a line. `lineno` is only used for the errors.
    pub fn record<S: AsRef<str>>(&self, cells: &[S], lineno: usize) -> AppResult<RawRecord> {
        let cell = |idx: usize| -> AppResult<String> {
            cells
                .get(self.positions[idx])
                .map(|c| c.as_ref().to_string())
                .context(LineTooShortSnafu { lineno })
        };
        Ok(RawRecord {
            district_id: cell(0)?,
            district_name: cell(1)?,
            candidate_name: cell(2)?,
            vote_count: cell(3)?,
            vote_percent_text: cell(4)?,
            party_name: cell(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_in_any_order() {
        let idx = ColumnIndex::from_header(&["Party", "votes", "percent", "id", "candidate", " name "])
            .unwrap();
        let rec = idx
            .record(&["PV", "12", "1,0%", "7", "Anna", "Yukon"], 2)
            .unwrap();
        assert_eq!(rec.district_id, "7");
        assert_eq!(rec.district_name, "Yukon");
        assert_eq!(rec.candidate_name, "Anna");
        assert_eq!(rec.vote_count, "12");
        assert_eq!(rec.vote_percent_text, "1,0%");
        assert_eq!(rec.party_name, "PV");
        assert_eq!(idx.percent_position(), 2);
    }

    #[test]
    fn missing_column() {
        let res = ColumnIndex::from_header(&["id", "name", "candidate", "votes", "party"]);
        match res {
            Err(AppError::MissingColumn { column }) => assert_eq!(column, "percent"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn short_line() {
        let idx = ColumnIndex::from_header(&COLUMNS).unwrap();
        let res = idx.record(&["1", "A"], 5);
        assert!(matches!(res, Err(AppError::LineTooShort { lineno: 5 })));
    }
}
