//! Month grid widget
//!
//! Renders one month of the calendar into a ratatui buffer: title row,
//! rotated day-name header, then the week rows. Cell styling is driven by
//! the diff-painted state in [`CellRegistry`], never recomputed from the
//! whole model, so only selection/focus changes repaint cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::calendar::view::MonthView;
use crate::config::ThemeConfig;
use crate::date_math::{month_weeks, CalendarDate};
use crate::tui::painter::CellRegistry;

/// Width of one day cell including its trailing gap.
const CELL_WIDTH: u16 = 4;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Human-readable title for a month ("June 2024").
pub fn month_title(date: CalendarDate) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

/// Render the view's current display month. Returns the number of rows used.
pub fn render_month_grid(
    view: &MonthView,
    registry: &CellRegistry,
    theme: &ThemeConfig,
    area: Rect,
    buf: &mut Buffer,
) -> u16 {
    if area.height < 2 {
        return 0;
    }

    let display = view.display_date();
    let mut y = area.y;

    buf.set_string(
        area.x,
        y,
        month_title(display),
        Style::default().add_modifier(Modifier::BOLD),
    );
    y += 1;

    let header = view.week_header().join(" ");
    buf.set_string(area.x, y, header, Style::default().add_modifier(Modifier::DIM));
    y += 1;

    let weeks = month_weeks(display, view.locale().first_day_of_week);
    for week in &weeks {
        if y >= area.bottom() {
            break;
        }
        for (col, slot) in week.iter().enumerate() {
            let Some(date) = slot else { continue };
            let x = area.x + col as u16 * CELL_WIDTH;
            let id = view.cell_id(*date);

            let mut style = Style::default();
            if *date == view.today() {
                style = style.fg(theme.today_fg);
            }
            if registry.is_selected(&id) {
                style = style.fg(theme.selection_fg).add_modifier(Modifier::BOLD);
            }
            if registry.is_focused(&id) {
                style = style.fg(theme.focus_fg).add_modifier(Modifier::REVERSED);
            }

            buf.set_string(x, y, format!("{:>3}", date.day()), style);
        }
        y += 1;
    }

    y - area.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::bounds::DateBounds;
    use crate::calendar::window::WindowGeometry;
    use crate::locale::DateLocale;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    fn test_view(display: CalendarDate) -> MonthView {
        let mut view = MonthView::with_today(
            0,
            Some(display),
            DateBounds::default(),
            WindowGeometry::default(),
            DateLocale::default(),
            d(2024, 6, 15),
        );
        view.initialize();
        view
    }

    fn buffer_line(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(d(2024, 6, 1)), "June 2024");
        assert_eq!(month_title(d(2023, 12, 25)), "December 2023");
    }

    #[test]
    fn test_grid_renders_title_header_and_weeks() {
        let view = test_view(d(2024, 6, 15));
        let registry = CellRegistry::default();
        let theme = ThemeConfig::default();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);

        // June 2024 spans 6 week rows: title + header + 6.
        let rows = render_month_grid(&view, &registry, &theme, area, &mut buf);
        assert_eq!(rows, 8);

        assert_eq!(buffer_line(&buf, 0, 30), "June 2024");
        assert_eq!(buffer_line(&buf, 1, 30), "Sun Mon Tue Wed Thu Fri Sat");
        // June 1 2024 is a Saturday: first week row has one cell, far right.
        assert_eq!(buffer_line(&buf, 2, 30), "                          1");
        assert_eq!(buffer_line(&buf, 3, 30), "  2   3   4   5   6   7   8");
    }

    #[test]
    fn test_selected_cell_is_styled() {
        let view = test_view(d(2024, 6, 15));
        let mut registry = CellRegistry::default();
        registry.apply_selection_diff(
            &crate::calendar::selection::SelectionDiff {
                previous: None,
                current: Some(d(2024, 6, 3)),
            },
            0,
        );
        let theme = ThemeConfig::default();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);

        render_month_grid(&view, &registry, &theme, area, &mut buf);

        // June 3 renders in week row 1 (y=3), column 1; its digit lands at
        // x=6 with the two-space right alignment.
        let cell = &buf[(6, 3)];
        assert_eq!(cell.symbol(), "3");
        assert_eq!(cell.style().fg, Some(theme.selection_fg));
    }

    #[test]
    fn test_grid_respects_area_height() {
        let view = test_view(d(2024, 6, 15));
        let registry = CellRegistry::default();
        let theme = ThemeConfig::default();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);

        // Only title + header + 2 week rows fit.
        let rows = render_month_grid(&view, &registry, &theme, area, &mut buf);
        assert_eq!(rows, 4);
    }
}
