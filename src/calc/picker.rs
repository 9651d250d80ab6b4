use crate::calc::calendar::{header_labels, WeekStart};
use crate::calc::grid::{compute_grid, CalendarDate, Direction, DisplayedMonth, GridCell};
use crate::calc::selection::{apply_selection, SelectionState};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    MonthChanged(DisplayedMonth),
    DateSelected(CalendarDate),
}

type Observer = Box<dyn FnMut(&PickerEvent)>;

/// Owns the displayed month and the selection. Every change replaces the
/// whole value, recomputes what depends on it, and notifies observers.
pub struct CalendarPicker {
    displayed_month: DisplayedMonth,
    selection: SelectionState,
    week_start: WeekStart,
    grid: Vec<GridCell>,
    observers: Vec<Observer>,
}

impl CalendarPicker {
    pub fn new(today: CalendarDate, week_start: WeekStart) -> Self {
        let displayed_month = today.displayed_month();
        CalendarPicker {
            displayed_month,
            selection: SelectionState::Empty,
            week_start,
            grid: compute_grid(displayed_month, week_start),
            observers: Vec::new(),
        }
    }

    pub fn displayed_month(&self) -> DisplayedMonth {
        self.displayed_month
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn grid(&self) -> &[GridCell] {
        &self.grid
    }

    pub fn header_labels<T: Clone>(&self, sunday_first: &[T; 7]) -> [T; 7] {
        header_labels(sunday_first, self.week_start)
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&PickerEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Pages one month. At the ends of the year range nothing changes and
    /// no event is emitted.
    pub fn navigate(&mut self, direction: Direction) {
        let next = self.displayed_month.navigate(direction);
        if next != self.displayed_month {
            self.replace_month(next);
        }
    }

    /// Shows `month`, recomputing the grid.
    fn replace_month(&mut self, month: DisplayedMonth) {
        debug!(from = %self.displayed_month, to = %month, "displayed month replaced");
        self.displayed_month = month;
        self.grid = compute_grid(month, self.week_start);
        self.notify(PickerEvent::MonthChanged(month));
    }

    /// Applies a tap. Returns the selected date, or `None` for an empty cell.
    pub fn select(&mut self, cell: &GridCell) -> Option<CalendarDate> {
        let next = apply_selection(self.selection, cell);
        let date = cell.date()?;
        debug!(%date, "date selected");
        self.selection = next;
        self.notify(PickerEvent::DateSelected(date));
        Some(date)
    }

    /// Taps the cell at `index` of the current grid.
    pub fn select_index(&mut self, index: usize) -> Option<CalendarDate> {
        let cell = *self.grid.get(index)?;
        self.select(&cell)
    }

    fn notify(&mut self, event: PickerEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        DisplayedMonth::new(y, m).unwrap().date(day).unwrap()
    }

    fn recording(picker: &mut CalendarPicker) -> Rc<RefCell<Vec<PickerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        picker.subscribe(move |e| sink.borrow_mut().push(*e));
        events
    }

    #[test]
    fn test_new_starts_on_today_month_with_no_selection() {
        let picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Sunday);
        assert_eq!(picker.displayed_month(), DisplayedMonth::new(2025, 7).unwrap());
        assert_eq!(picker.selection(), SelectionState::Empty);
        assert_eq!(picker.grid().len(), 35);
    }

    #[test]
    fn test_navigate_recomputes_grid_and_notifies() {
        let mut picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Sunday);
        let events = recording(&mut picker);

        picker.navigate(Direction::Next);
        let august = DisplayedMonth::new(2025, 8).unwrap();
        assert_eq!(picker.displayed_month(), august);
        assert_eq!(picker.grid(), compute_grid(august, WeekStart::Sunday).as_slice());
        assert_eq!(*events.borrow(), vec![PickerEvent::MonthChanged(august)]);
    }

    #[test]
    fn test_navigate_at_year_range_edge_emits_nothing() {
        let last = DisplayedMonth::new(i32::MAX, 12).unwrap().date(31).unwrap();
        let mut picker = CalendarPicker::new(last, WeekStart::Sunday);
        let events = recording(&mut picker);

        picker.navigate(Direction::Next);
        assert_eq!(picker.displayed_month(), last.displayed_month());
        assert!(events.borrow().is_empty());

        picker.navigate(Direction::Previous);
        assert_eq!(
            *events.borrow(),
            vec![PickerEvent::MonthChanged(DisplayedMonth::new(i32::MAX, 11).unwrap())]
        );
    }

    #[test]
    fn test_selection_survives_navigation() {
        let mut picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Sunday);
        picker.select(&GridCell::Date(d(2025, 7, 20)));
        picker.navigate(Direction::Next);
        assert_eq!(picker.selection().date(), Some(d(2025, 7, 20)));
    }

    #[test]
    fn test_select_empty_cell_emits_nothing() {
        let mut picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Sunday);
        let events = recording(&mut picker);

        assert_eq!(picker.select_index(0), None);
        assert_eq!(picker.selection(), SelectionState::Empty);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_reselect_emits_again_without_deselecting() {
        let mut picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Sunday);
        let events = recording(&mut picker);

        // index 2 is July 1st with a Sunday week start
        assert_eq!(picker.select_index(2), Some(d(2025, 7, 1)));
        assert_eq!(picker.select_index(2), Some(d(2025, 7, 1)));
        assert_eq!(picker.selection().date(), Some(d(2025, 7, 1)));
        assert_eq!(
            *events.borrow(),
            vec![
                PickerEvent::DateSelected(d(2025, 7, 1)),
                PickerEvent::DateSelected(d(2025, 7, 1)),
            ]
        );
    }

    #[test]
    fn test_select_index_out_of_bounds() {
        let mut picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Sunday);
        assert_eq!(picker.select_index(99), None);
    }

    #[test]
    fn test_header_labels_follow_week_start() {
        let picker = CalendarPicker::new(d(2025, 7, 14), WeekStart::Monday);
        let labels = picker.header_labels(&["S", "M", "T", "W", "T", "F", "S"]);
        assert_eq!(labels, ["M", "T", "W", "T", "F", "S", "S"]);
    }
}
