use crate::calc::calendar::month_name;
use crate::calc::{compute_grid, header_labels, CalendarDate, DisplayedMonth, GridCell, WeekStart};
use crate::data::AppSettings;
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

/// JSON view of one month: cells are ISO dates, `null` for padding.
#[derive(Serialize)]
struct MonthJson {
    year: i32,
    month: u32,
    week_start: WeekStart,
    header: Vec<String>,
    cells: Vec<Option<String>>,
}

pub fn run(month: Option<&str>, json: bool) -> Result<()> {
    let settings = AppSettings::load()?;
    let month = match month {
        Some(raw) => raw
            .parse::<DisplayedMonth>()
            .with_context(|| format!("cannot show month '{raw}'"))?,
        None => CalendarDate::from(Local::now().date_naive()).displayed_month(),
    };
    let mut out = std::io::stdout();
    if json {
        write_month_json(month, &settings, &mut out)
    } else {
        write_month(month, &settings, &mut out)
    }
}

/// `cal`-style block: centered title, weekday header, one line per week.
pub(crate) fn write_month<W: std::io::Write>(
    month: DisplayedMonth,
    settings: &AppSettings,
    out: &mut W,
) -> Result<()> {
    let title = format!("{} {}", month_name(month.month()), month.year());
    writeln!(out, "{}", format!("{:^28}", title).trim_end())?;

    let header: String = header_labels(&settings.labels(), settings.week_start)
        .iter()
        .map(|l| format!("{:>3} ", l))
        .collect();
    writeln!(out, "{}", header.trim_end())?;

    for week in compute_grid(month, settings.week_start).chunks(7) {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                GridCell::Date(d) => format!("{:>3} ", d.day()),
                GridCell::Empty => "    ".to_string(),
            })
            .collect();
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

pub(crate) fn write_month_json<W: std::io::Write>(
    month: DisplayedMonth,
    settings: &AppSettings,
    out: &mut W,
) -> Result<()> {
    let view = MonthJson {
        year: month.year(),
        month: month.month(),
        week_start: settings.week_start,
        header: header_labels(&settings.labels(), settings.week_start).to_vec(),
        cells: compute_grid(month, settings.week_start)
            .iter()
            .map(|c| c.date().map(|d| d.to_string()))
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &view).context("failed to serialize JSON")?;
    writeln!(out)?;
    Ok(())
}
