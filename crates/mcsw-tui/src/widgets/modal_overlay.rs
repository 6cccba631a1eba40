//! Shared modal overlay utilities.
//!
//! Centering, background dimming and drop shadows for the dialog widgets.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::theme::palette;

/// Center a fixed-size rect within an area, clamped to the area.
///
/// # Examples
/// ```
/// use ratatui::layout::Rect;
/// use mcsw_tui::widgets::modal_overlay::centered_rect;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let modal = centered_rect(40, 10, area);
/// assert_eq!(modal, Rect::new(20, 7, 40, 10));
/// ```
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim every cell in `area`, simulating a translucent backdrop
pub fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim_style = Style::default()
        .fg(palette::TEXT_MUTED)
        .bg(palette::DEEPEST_BG);

    let y_end = area.y.saturating_add(area.height);
    let x_end = area.x.saturating_add(area.width);
    for y in area.y..y_end {
        for x in area.x..x_end {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(dim_style);
            }
        }
    }
}

/// Render a 1-cell shadow to the right of and below `modal_rect`
pub fn render_shadow(buf: &mut Buffer, modal_rect: Rect) {
    let shadow_style = Style::default().fg(palette::SHADOW).bg(palette::SHADOW);

    let right_x = modal_rect.x.saturating_add(modal_rect.width);
    for y in modal_rect.y.saturating_add(1)
        ..modal_rect
            .y
            .saturating_add(modal_rect.height)
            .saturating_add(1)
    {
        if let Some(cell) = buf.cell_mut((right_x, y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }

    let bottom_y = modal_rect.y.saturating_add(modal_rect.height);
    for x in modal_rect.x.saturating_add(1)
        ..modal_rect
            .x
            .saturating_add(modal_rect.width)
            .saturating_add(1)
    {
        if let Some(cell) = buf.cell_mut((x, bottom_y)) {
            cell.set_char(' ');
            cell.set_style(shadow_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        assert_eq!(centered_rect(60, 20, area), area);
    }

    #[test]
    fn test_shadow_outside_bounds_is_ignored() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        // Modal flush with the bottom-right corner: shadow falls off-buffer
        render_shadow(&mut buf, Rect::new(5, 2, 5, 3));
        dim_background(&mut buf, area);
    }
}
