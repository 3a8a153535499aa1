//! Header-label to column-index resolution.
//!
//! Chess-Results pages carry a different set of columns per tournament, so
//! columns are located by header text once per page and the resulting map is
//! passed to the row parsers.

/// Columns the parsers know how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    FideId,
    Rating,
    ClubCity,
    Team,
    Board,
}

impl Column {
    /// Header text identifying this column
    fn label(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::FideId => "FideID",
            Column::Rating => "Rtg",
            Column::ClubCity => "Club/City",
            Column::Team => "Team",
            Column::Board => "Bo.",
        }
    }
}

/// First and last occurrence of a label in the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub first: usize,
    pub last: usize,
}

impl ColumnSpan {
    /// Label occurs more than once (one column per side)
    pub fn is_paired(&self) -> bool {
        self.first != self.last
    }
}

/// Resolved column positions for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<ColumnSpan>,
    pub fide_id: Option<ColumnSpan>,
    pub rating: Option<ColumnSpan>,
    pub club_city: Option<ColumnSpan>,
    pub team: Option<ColumnSpan>,
    pub board: Option<ColumnSpan>,
}

impl ColumnMap {
    /// Resolve every known column from the header labels
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let span = |column: Column| -> Option<ColumnSpan> {
            let label = column.label();
            let first = labels.iter().position(|l| l.as_ref().trim() == label)?;
            let last = labels.iter().rposition(|l| l.as_ref().trim() == label)?;
            Some(ColumnSpan { first, last })
        };

        Self {
            name: span(Column::Name),
            fide_id: span(Column::FideId),
            rating: span(Column::Rating),
            club_city: span(Column::ClubCity),
            team: span(Column::Team),
            board: span(Column::Board),
        }
    }
}
