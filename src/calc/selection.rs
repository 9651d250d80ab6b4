use crate::calc::grid::{CalendarDate, GridCell};

/// Single-date selection. There is no transition back to `Empty`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    Selected(CalendarDate),
}

impl SelectionState {
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            SelectionState::Empty => None,
            SelectionState::Selected(d) => Some(*d),
        }
    }

    pub fn is_selected(&self, date: CalendarDate) -> bool {
        self.date() == Some(date)
    }
}

/// Date carried by a tapped cell, or `None` when the tap must be ignored.
pub fn select_cell(cell: &GridCell) -> Option<CalendarDate> {
    cell.date()
}

/// Next selection after tapping `cell`. Empty cells leave `current` as is;
/// a date cell always replaces it, including when it is already selected.
pub fn apply_selection(current: SelectionState, cell: &GridCell) -> SelectionState {
    match select_cell(cell) {
        Some(date) => SelectionState::Selected(date),
        None => current,
    }
}
