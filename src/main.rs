use std::path::PathBuf;

use anyhow::Result;
use co2_atlas::app::App;
use co2_atlas::data;
use co2_atlas::map::MapRenderer;
use co2_atlas::ui;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::time::Duration;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    // Load the datasets before entering raw mode; a failed load still
    // starts the app, in a visible data-unavailable state
    let (renderer, data_error) = match data::load_map(&data_dir) {
        Ok(renderer) => (renderer, None),
        Err(err) => (
            MapRenderer::new(Default::default(), Vec::new()),
            Some(format!("{err:#}")),
        ),
    };

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, renderer, data_error);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events: hover tracking, click-to-select, drag-to-pan,
/// wheel zoom
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Always track mouse position for hover styling and the cursor marker
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => app.press(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.drag_to(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.release(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    renderer: MapRenderer,
    data_error: Option<String>,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(size.width as usize, size.height as usize, renderer, data_error);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Close the selected region (back to all-regions view)
                            KeyCode::Char('c') | KeyCode::Char('C') => app.close_selection(),

                            // Layer toggles
                            KeyCode::Char('b') | KeyCode::Char('B') => {
                                app.map_renderer.toggle_borders();
                            }
                            KeyCode::Char('L') => {
                                app.map_renderer.toggle_labels();
                            }

                            // Reset view
                            KeyCode::Char('r') | KeyCode::Char('0') => {
                                let size = terminal.size()?;
                                app.close_selection();
                                app.resize(size.width as usize, size.height as usize);
                                app.viewport = co2_atlas::map::Viewport::africa(
                                    app.viewport.width,
                                    app.viewport.height,
                                );
                            }

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
