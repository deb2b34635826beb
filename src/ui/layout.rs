// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The areas of the application's user interface.
pub struct AppLayout {
    pub input: Rect,
    pub report: Rect,
    pub summary: Rect,
    pub footer: Rect,
}

/// Creates the complete application layout.
///
/// The frame is split vertically into the input box, the content area and a
/// one-line footer. The content area holds the report (70%) and the summary (30%)
/// side by side.
///
/// # Arguments
/// * `frame_size` - The `Rect` representing the total size of the terminal frame.
///
/// # Returns
/// An `AppLayout` with the `Rect` of each widget area.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame_size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_chunks[1]);

    AppLayout {
        input: main_chunks[0],
        report: content_chunks[0],
        summary: content_chunks[1],
        footer: main_chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn areas_fill_the_frame() {
        let layout = create_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.input.height, 3);
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.report.height, 36);
        assert_eq!(layout.report.width + layout.summary.width, 100);
    }
}
