use crate::calc::CalendarDate;
use crate::data::AppSettings;
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use tracing::{error, info};

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    info!(week_start = ?settings.week_start, "starting calendar picker");

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("calpick panicked: {info}");
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = CalendarDate::from(Local::now().date_naive());
    let mut app = App::new(settings, today);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result?;

    write_selection(app.selected_date(), &mut std::io::stdout())
}

/// Prints the picked date for scripts; nothing when no date was picked.
pub(crate) fn write_selection<W: std::io::Write>(
    selection: Option<CalendarDate>,
    out: &mut W,
) -> Result<()> {
    match selection {
        Some(date) => {
            info!(%date, "exiting with selection");
            writeln!(out, "{date}")?;
        }
        None => info!("exiting without selection"),
    }
    Ok(())
}
