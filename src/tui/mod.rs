// Module declarations
pub mod month_grid;
pub mod painter;

pub use month_grid::render_month_grid;
pub use painter::{CellRegistry, TermScrollSurface, ValueBinding};

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    Terminal,
};

use crate::calendar::bounds::DateBounds;
use crate::calendar::view::{CalendarEvent, MonthView};
use crate::config::Config;
use crate::date_math::{month_weeks, CalendarDate};
use crate::locale::DateLocale;

/// Main entry point for the interactive calendar demo.
pub async fn run(
    config: Config,
    initial_value: Option<CalendarDate>,
    bounds: DateBounds,
) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let locale = DateLocale {
        first_day_of_week: config.first_day_of_week,
        ..DateLocale::default()
    };
    let mut view = MonthView::new(0, initial_value, bounds, config.window_geometry(), locale);
    view.initialize();

    let mut surface = TermScrollSurface::default();
    let mut registry = CellRegistry::default();
    let mut binding = ValueBinding::with_value(initial_value);

    // Main loop
    loop {
        // Only cells of the displayed month exist; navigation off-month
        // defers focus until the next frame realizes the target.
        let display = view.display_date();
        registry.set_realized(
            month_weeks(display, view.locale().first_day_of_week)
                .iter()
                .flatten()
                .flatten()
                .map(|date| view.cell_id(*date)),
        );
        if let Some(event) = view.apply_deferred_focus(&mut registry) {
            tracing::debug!("LOOP: Deferred focus applied: {:?}", event);
        }

        terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();

            let grid_area = Rect::new(1, 1, area.width.saturating_sub(2), area.height.saturating_sub(5));
            let rows = render_month_grid(&view, &registry, &config.theme, grid_area, buf);

            let status_y = grid_area.y + rows + 1;
            if status_y + 2 < area.height {
                buf.set_string(
                    1,
                    status_y,
                    format!("value: {}", binding.rendered()),
                    Style::default(),
                );
                let focused = registry
                    .focused()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                buf.set_string(
                    1,
                    status_y + 1,
                    format!(
                        "scroll: {}px  index: {}  focus: {}",
                        surface.offset_px(),
                        view.focused_index(),
                        focused
                    ),
                    Style::default().add_modifier(Modifier::DIM),
                );
                buf.set_string(
                    1,
                    status_y + 2,
                    "arrows/PgUp/PgDn/Home/End navigate  Enter selects  q quits",
                    Style::default().add_modifier(Modifier::DIM),
                );
            }
        })?;

        // Poll for keyboard events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('q') {
                    tracing::debug!("ACTION: Quitting application");
                    break;
                }

                let events = view
                    .handle_key(key, &mut surface, &mut registry, &mut binding)
                    .await;

                let mut close_requested = false;
                for event in events {
                    match event {
                        CalendarEvent::CloseRequested { .. } => close_requested = true,
                        CalendarEvent::SelectionChanged(diff) => {
                            registry.apply_selection_diff(&diff, view.instance_id());
                        }
                        CalendarEvent::ModelChanged(date) => {
                            tracing::debug!("ACTION: Model value changed to {:?}", date);
                        }
                        // The registry already took focus through the
                        // CellHost seam.
                        CalendarEvent::FocusCell(_) => {}
                    }
                }
                if close_requested {
                    tracing::debug!("ACTION: Close requested, quitting");
                    break;
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
