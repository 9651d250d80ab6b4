use crate::calc::calendar::month_name;
use crate::calc::{CalendarDate, CalendarPicker, Direction, PickerEvent};
use crate::data::AppSettings;
use anyhow::Result;
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io::Stdout;
use std::rc::Rc;
use std::time::Duration as StdDuration;

/// Terminal columns per grid cell: a right-aligned day number and a gap.
const CELL_WIDTH: u16 = 4;
const GRID_WIDTH: u16 = CELL_WIDTH * 7;
/// Width of the ◀ / ▶ click targets on the title row.
const NAV_TARGET_WIDTH: u16 = 3;

pub struct App {
    picker: CalendarPicker,
    settings: AppSettings,
    today: CalendarDate,
    /// Grid index under the keyboard cursor. Always a date cell.
    cursor: usize,
    /// Last event reported by the picker, shown on the status line.
    last_event: Rc<RefCell<Option<PickerEvent>>>,
    /// Screen areas from the last render, used for mouse hit-testing.
    title_area: Option<Rect>,
    grid_area: Option<Rect>,
}

impl App {
    pub fn new(settings: AppSettings, today: CalendarDate) -> Self {
        let mut picker = CalendarPicker::new(today, settings.week_start);
        let last_event = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last_event);
        picker.subscribe(move |event| *sink.borrow_mut() = Some(*event));

        let mut app = App {
            picker,
            settings,
            today,
            cursor: 0,
            last_event,
            title_area: None,
            grid_area: None,
        };
        app.cursor = app.default_cursor();
        app
    }

    pub fn selected_date(&self) -> Option<CalendarDate> {
        self.picker.selection().date()
    }

    /// Today's cell when today is on screen, otherwise day 1.
    fn default_cursor(&self) -> usize {
        let target = if self.today.displayed_month() == self.picker.displayed_month() {
            Some(self.today)
        } else {
            self.picker.displayed_month().date(1)
        };
        self.picker
            .grid()
            .iter()
            .position(|c| target.is_some() && c.date() == target)
            .unwrap_or(0)
    }

    fn navigate(&mut self, direction: Direction) {
        self.picker.navigate(direction);
        self.cursor = self.default_cursor();
    }

    fn move_cursor(&mut self, delta: isize) {
        let Some(target) = self.cursor.checked_add_signed(delta) else {
            return;
        };
        if self.picker.grid().get(target).is_some_and(|c| !c.is_empty()) {
            self.cursor = target;
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.picker.select_index(self.cursor);
            }
            KeyCode::Char('p') | KeyCode::PageUp => self.navigate(Direction::Previous),
            KeyCode::Char('n') | KeyCode::PageDown => self.navigate(Direction::Next),
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            _ => {}
        }
        false
    }

    /// Left clicks are taps: on a date cell they select it, on the title
    /// arrows they page months. Everything else is ignored.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(title) = self.title_area {
            if let Some(direction) = nav_target_at(title, mouse.column, mouse.row) {
                self.navigate(direction);
                return;
            }
        }
        let Some(grid_area) = self.grid_area else {
            return;
        };
        if let Some(index) = cell_at(grid_area, mouse.column, mouse.row, self.picker.grid().len())
        {
            if self.picker.select_index(index).is_some() {
                self.cursor = index;
            }
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let width = GRID_WIDTH.min(area.width);
        let weeks = (self.picker.grid().len() / 7) as u16;
        let row = |offset: u16, height: u16| {
            Rect::new(area.x, area.y + offset, width, height).intersection(area)
        };

        let title_area = row(0, 1);
        let header_area = row(1, 1);
        let grid_area = row(2, weeks);
        let help_area = Rect::new(area.x, area.y + 3 + weeks, area.width, 2).intersection(area);
        let status_area = Rect::new(area.x, area.y + 5 + weeks, area.width, 1).intersection(area);

        f.render_widget(Paragraph::new(self.title_line()), title_area);
        f.render_widget(Paragraph::new(self.header_line()), header_area);
        f.render_widget(Paragraph::new(self.grid_lines()), grid_area);
        f.render_widget(
            Paragraph::new(vec![
                Line::from("←→↑↓=move  Enter/Space/click=select"),
                Line::from("p/PgUp=previous  n/PgDn=next  q/Esc=quit"),
            ])
            .style(Style::default().add_modifier(Modifier::DIM)),
            help_area,
        );
        f.render_widget(Paragraph::new(self.status_line()), status_area);

        self.title_area = Some(title_area);
        self.grid_area = Some(grid_area);
    }

    fn title_line(&self) -> Line<'static> {
        let month = self.picker.displayed_month();
        let title = format!("{} {}", month_name(month.month()), month.year());
        let inner = (GRID_WIDTH - 2 * NAV_TARGET_WIDTH) as usize;
        Line::from(vec![
            Span::raw(" ◀ "),
            Span::styled(
                format!("{:^inner$}", title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ▶ "),
        ])
    }

    fn header_line(&self) -> Line<'static> {
        let labels = self.picker.header_labels(&self.settings.labels());
        let spans: Vec<Span> = labels
            .iter()
            .map(|l| Span::styled(format!("{:>3} ", l), Style::default().add_modifier(Modifier::BOLD)))
            .collect();
        Line::from(spans)
    }

    fn grid_lines(&self) -> Vec<Line<'static>> {
        let selection = self.picker.selection();
        self.picker
            .grid()
            .chunks(7)
            .enumerate()
            .map(|(week, cells)| {
                let spans: Vec<Span> = cells
                    .iter()
                    .enumerate()
                    .flat_map(|(col, cell)| {
                        let Some(date) = cell.date() else {
                            return [Span::raw("   "), Span::raw(" ")];
                        };
                        let style = calendar_day_style(
                            selection.is_selected(date),
                            date == self.today,
                            week * 7 + col == self.cursor,
                        );
                        [Span::styled(format!("{:>3}", date.day()), style), Span::raw(" ")]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn status_line(&self) -> Line<'static> {
        let text = match (self.selected_date(), *self.last_event.borrow()) {
            (Some(date), Some(PickerEvent::DateSelected(_))) => format!("Selected {date}"),
            (Some(date), _) => format!("Selection: {date}"),
            (None, _) => "No date selected".to_string(),
        };
        Line::from(Span::styled(text, Style::default().fg(Color::Cyan)))
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
    Ok(())
}

// ── Grid helpers ──────────────────────────────────────────────────────────────

/// Maps a screen position to an index into a grid of `cell_count` cells
/// rendered in `area`, one week per row.
pub(crate) fn cell_at(area: Rect, column: u16, row: u16, cell_count: usize) -> Option<usize> {
    if column < area.x || row < area.y || row >= area.y + area.height {
        return None;
    }
    let col = ((column - area.x) / CELL_WIDTH) as usize;
    if col >= 7 {
        return None;
    }
    let index = (row - area.y) as usize * 7 + col;
    (index < cell_count).then_some(index)
}

/// Which navigation arrow, if any, sits at a position on the title row.
pub(crate) fn nav_target_at(title: Rect, column: u16, row: u16) -> Option<Direction> {
    if row != title.y || column < title.x {
        return None;
    }
    let offset = column - title.x;
    if offset < NAV_TARGET_WIDTH {
        Some(Direction::Previous)
    } else if (GRID_WIDTH - NAV_TARGET_WIDTH..GRID_WIDTH).contains(&offset) {
        Some(Direction::Next)
    } else {
        None
    }
}

/// Determines the ratatui `Style` for a day cell.
pub(crate) fn calendar_day_style(is_selected: bool, is_today: bool, is_cursor: bool) -> Style {
    let style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };
    if is_cursor {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}
