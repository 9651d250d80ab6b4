pub mod calendar;
pub mod grid;
pub mod picker;
pub mod selection;

pub use calendar::{header_labels, WeekStart};
pub use grid::{compute_grid, CalendarDate, Direction, DisplayedMonth, GridCell};
pub use picker::{CalendarPicker, PickerEvent};
