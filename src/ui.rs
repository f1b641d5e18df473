//! Terminal rendering: choropleth map on the left, chart and
//! proportional-symbol panels on the right, status bar along the bottom.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::chart::ChartModel;
use crate::map::{geometry, MapLayers};
use crate::palette::Rgb;
use crate::symbol::SymbolPanel;

const SIDE_PANEL_WIDTH: u16 = 42;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map + side panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Collapse the side panel on narrow terminals
    if rows[0].width > SIDE_PANEL_WIDTH + 30 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(rows[0]);
        render_map(frame, app, cols[0]);
        render_side(frame, app, cols[1]);
    } else {
        render_map(frame, app, rows[0]);
    }

    render_status_bar(frame, app, rows[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Africa CO₂ Atlas ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(err) = &app.data_error {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Emission data unavailable",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(err.as_str(), Style::default().fg(Color::DarkGray))),
        ])
        .centered()
        .wrap(Wrap { trim: true });
        frame.render_widget(msg, inner);
        return;
    }

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app.map_renderer.render(
        inner.width as usize,
        inner.height as usize,
        &viewport,
        app.hovered(),
    );

    let cursor_pos = app.mouse_pixel_pos().and_then(|(px, py)| {
        let cx = (px / 2) as u16;
        let cy = (py / 4) as u16;
        if cx < inner.width && cy < inner.height {
            Some((cx, cy))
        } else {
            None
        }
    });

    let map_widget = MapWidget {
        layers,
        cursor_pos,
        inner_width: inner.width,
        inner_height: inner.height,
    };
    frame.render_widget(map_widget, inner);
}

/// Custom widget that renders the colored braille layers with region
/// labels overlaid
struct MapWidget {
    layers: MapLayers,
    cursor_pos: Option<(u16, u16)>,
    inner_width: u16,
    inner_height: u16,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: region fills, region outlines, country borders
        for region in &self.layers.regions {
            Self::render_layer(&region.fill, region.fill_color, area, buf);
        }
        for region in &self.layers.regions {
            Self::render_layer(&region.outline, region.stroke_color, area, buf);
        }
        Self::render_layer(
            &self.layers.borders,
            crate::palette::BORDER_ORANGE.to_color(),
            area,
            buf,
        );

        // Region name labels
        let label_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        for (lx, ly, text) in &self.layers.labels {
            if *ly >= self.inner_height || *lx >= self.inner_width {
                continue;
            }
            let y = area.y + *ly;
            let max_len = (self.inner_width - *lx) as usize;
            for (i, ch) in text.chars().take(max_len.min(24)).enumerate() {
                let x = area.x + *lx + i as u16;
                if x < area.x + area.width {
                    buf[(x, y)].set_char(ch).set_style(label_style);
                }
            }
        }

        // Cursor marker
        if let Some((cx, cy)) = self.cursor_pos {
            let x = area.x + cx;
            let y = area.y + cy;
            if x < area.x + area.width && y < area.y + area.height {
                buf[(x, y)].set_char('╋').set_fg(Color::Red);
            }
        }
    }
}

fn render_side(frame: &mut Frame, app: &App, area: Rect) {
    let model = app.chart_model();
    let symbols = app.symbol_panel();

    let legend_rows = if model.legend {
        model.series.len().min(6) as u16 + 1
    } else {
        0
    };
    let symbol_rows = if symbols.is_some() { 15 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(legend_rows),
            Constraint::Length(symbol_rows),
        ])
        .split(area);

    render_chart(frame, &model, chunks[0]);
    if model.legend {
        render_legend(frame, &model, chunks[1]);
    }
    if let Some(panel) = symbols {
        render_symbols(frame, &panel, chunks[2]);
    }
}

fn render_chart(frame: &mut Frame, model: &ChartModel, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", model.title),
            Style::default().fg(Color::White),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if model.series.is_empty() || inner.height < 3 {
        return;
    }

    let max_value = model
        .series
        .iter()
        .flat_map(|s| s.values.iter())
        .fold(0.0f64, |acc, &v| acc.max(v))
        .max(1.0)
        .round() as u64;

    // Fit 3 groups of |series| bars into the panel width
    let per_group = model.series.len() as u16;
    let bar_width = ((inner.width.saturating_sub(8)) / (3 * per_group)).clamp(1, 7);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(if per_group > 1 { 1 } else { 2 })
        .group_gap(2)
        .max(max_value);

    for (year, label) in model.labels.iter().enumerate() {
        let bars: Vec<Bar> = model
            .series
            .iter()
            .map(|series| {
                Bar::default()
                    .value(series.values[year].round() as u64)
                    .text_value(String::new())
                    .style(Style::default().fg(series.paint.for_year(year).to_color()))
            })
            .collect();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(*label).centered())
                .bars(&bars),
        );
    }

    frame.render_widget(chart, inner);
}

fn render_legend(frame: &mut Frame, model: &ChartModel, area: Rect) {
    let mut lines = Vec::with_capacity(model.series.len());
    for series in model.series.iter().take(area.height as usize) {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(series.paint.for_year(0).to_color())),
            Span::styled(series.name.clone(), Style::default().fg(Color::White)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_symbols(frame: &mut Frame, panel: &SymbolPanel, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", panel.title),
            Style::default()
                .fg(panel.fill.to_color())
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 5 {
        return;
    }

    let desc_rows = if panel.description.is_empty() { 0 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(desc_rows), Constraint::Min(4)])
        .split(inner);

    if desc_rows > 0 {
        let desc = Paragraph::new(panel.description.as_str())
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(desc, chunks[0]);
    }

    frame.render_widget(
        CirclesWidget {
            panel: panel.clone(),
        },
        chunks[1],
    );
}

/// Three braille circles, one per year, sized from the symbol panel and
/// annotated with the percentage and year
struct CirclesWidget {
    panel: SymbolPanel,
}

impl Widget for CirclesWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 || area.width < 12 {
            return;
        }

        // Reserve the bottom two rows for annotations
        let canvas_rows = (area.height - 2) as usize;
        let mut canvas = BrailleCanvas::new(area.width as usize, canvas_rows);

        let pw = canvas.pixel_width() as i32;
        let ph = canvas.pixel_height() as i32;
        let slot = pw / 3;
        // Largest circle (display size ~350) fills its slot
        let max_radius = (slot / 2 - 1).min(ph / 2 - 1).max(2);

        let mut centers = [0i32; 3];
        for (i, circle) in self.panel.circles.iter().enumerate() {
            let cx = slot * i as i32 + slot / 2;
            centers[i] = cx;
            let radius = ((circle.size / 350.0) * max_radius as f64).round() as i32;
            geometry::draw_circle(&mut canvas, cx, ph / 2, radius.clamp(2, max_radius));
        }

        MapWidget::render_layer(&canvas, self.panel.fill.to_color(), area, buf);

        // Annotations under each circle
        let value_y = area.y + area.height - 2;
        let year_y = area.y + area.height - 1;
        for (i, circle) in self.panel.circles.iter().enumerate() {
            let value = format!("{}%", circle.value);
            write_centered(buf, area, (centers[i] / 2) as u16, value_y, &value, Color::White);
            write_centered(buf, area, (centers[i] / 2) as u16, year_y, circle.year, Color::DarkGray);
        }
    }
}

/// Write `text` centered on column `cx` of the given row, clipped to `area`
fn write_centered(buf: &mut Buffer, area: Rect, cx: u16, y: u16, text: &str, color: Color) {
    let len = text.chars().count() as u16;
    let start = area.x + cx.saturating_sub(len / 2);
    for (i, ch) in text.chars().enumerate() {
        let x = start + i as u16;
        if x < area.x + area.width && y < area.y + area.height {
            buf[(x, y)].set_char(ch).set_fg(color);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let settings = &app.map_renderer.settings;

    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" ", Style::default()),
        Span::styled(
            if settings.show_borders { "[B]orders " } else { "[b]orders " },
            Style::default().fg(if settings.show_borders { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled(
            if settings.show_labels { "[L]abels " } else { "[l]abels " },
            Style::default().fg(if settings.show_labels { Color::Green } else { Color::DarkGray }),
        ),
    ];

    // Hover tooltip: region name plus its three yearly values
    if let Some(region) = app.hovered().and_then(|i| app.map_renderer.catalog().get(i)) {
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            region.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(
                " 2020: {} 2021: {} 2022: {} mil. tones ",
                region.values[0], region.values[1], region.values[2]
            ),
            Style::default().fg(Color::Gray),
        ));
    }

    spans.push(Span::styled(
        "| drag:pan +/-:zoom c:close r:reset q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
