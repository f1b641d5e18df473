//! Application state: viewport, catalog-backed renderer, and the
//! selection/hover state driving the chart and symbol panels.

use crate::chart::{self, ChartModel};
use crate::map::{MapRenderer, Viewport};
use crate::select::SelectionState;
use crate::symbol::{self, SymbolPanel};

pub struct App {
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    /// Set when the dataset failed to load; the UI renders a visible
    /// "data unavailable" state instead of silent blank overlays
    pub data_error: Option<String>,
    pub should_quit: bool,
    /// Current mouse position for the cursor marker
    pub mouse_pos: Option<(u16, u16)>,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    selection: SelectionState,
    hovered: Option<usize>,
    /// True once a press turned into a drag; suppresses the click on release
    dragging: bool,
}

impl App {
    pub fn new(
        width: usize,
        height: usize,
        map_renderer: MapRenderer,
        data_error: Option<String>,
    ) -> Self {
        // Braille gives 2x4 resolution per character; account for the
        // map block border and the status bar
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);

        Self {
            viewport: Viewport::africa(inner_width * 2, inner_height * 4),
            map_renderer,
            data_error,
            should_quit: false,
            mouse_pos: None,
            last_mouse: None,
            selection: SelectionState::new(),
            hovered: None,
            dragging: false,
        }
    }

    /// Update viewport size when the terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let inner_width = width.saturating_sub(2);
        let inner_height = height.saturating_sub(3);
        self.viewport.width = inner_width * 2;
        self.viewport.height = inner_height * 4;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        self.viewport.zoom_in_at(px, py);
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = Self::to_pixel(col, row);
        self.viewport.zoom_out_at(px, py);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Convert terminal coords to braille pixel coords.
    /// Each terminal cell is 2 braille pixels wide, 4 tall; the map
    /// block border offsets everything by one cell.
    fn to_pixel(col: u16, row: u16) -> (i32, i32) {
        let px = ((col.saturating_sub(1)) as i32) * 2;
        let py = ((row.saturating_sub(1)) as i32) * 4;
        (px, py)
    }

    /// Mouse position in braille pixel coordinates (for the cursor marker)
    pub fn mouse_pixel_pos(&self) -> Option<(i32, i32)> {
        self.mouse_pos.map(|(col, row)| Self::to_pixel(col, row))
    }

    /// Region under a terminal position, if the pointer is over the map
    fn region_at(&self, col: u16, row: u16) -> Option<usize> {
        let (px, py) = Self::to_pixel(col, row);
        if px >= self.viewport.width as i32 || py >= self.viewport.height as i32 {
            return None;
        }
        let (lon, lat) = self.viewport.unproject(px, py);
        self.map_renderer.hit_test(lon, lat)
    }

    /// Track the pointer: cursor marker plus hover restyling
    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
        self.hovered = self.region_at(col, row);
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Begin a left-button press; may become a click or a drag
    pub fn press(&mut self, col: u16, row: u16) {
        self.last_mouse = Some((col, row));
        self.dragging = false;
    }

    /// Drag-to-pan, scaled down when zoomed in
    pub fn drag_to(&mut self, col: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = last_col as i32 - col as i32;
            let dy = last_row as i32 - row as i32;
            if dx != 0 || dy != 0 {
                self.dragging = true;
                let scale = if self.viewport.zoom < 4.0 { 3 } else { 2 };
                self.pan(dx * scale, dy * scale);
            }
        }
        self.last_mouse = Some((col, row));
    }

    /// Release the left button. A press that never dragged is a click:
    /// if it lands on a region the click is consumed by the selection
    /// machine and never reaches the map surface.
    pub fn release(&mut self, col: u16, row: u16) {
        if !self.dragging {
            if let Some(idx) = self.region_at(col, row) {
                self.selection.click(idx);
            }
        }
        self.last_mouse = None;
        self.dragging = false;
    }

    /// Explicit close action for the selected region
    pub fn close_selection(&mut self) {
        self.selection.close();
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Chart model for the current frame. Re-derived from selection and
    /// catalog on every call; never cached or patched.
    pub fn chart_model(&self) -> ChartModel {
        chart::project(self.map_renderer.catalog(), self.selection.selected())
    }

    /// Proportional-symbol panel, present only while a region is selected
    pub fn symbol_panel(&self) -> Option<SymbolPanel> {
        self.selection
            .selected()
            .and_then(|i| self.map_renderer.catalog().get(i))
            .map(symbol::generate)
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}
