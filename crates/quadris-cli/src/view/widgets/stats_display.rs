use std::time::Duration;

use quadris_engine::GameStats;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;

/// Score, play time, and clear counts as label/value rows.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    rows: Vec<Option<(&'static str, String)>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(stats: &GameStats, play_time: Duration) -> Self {
        Self {
            rows: stat_rows(stats, play_time),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.rows.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

/// `None` is a blank separator row.
fn stat_rows(stats: &GameStats, play_time: Duration) -> Vec<Option<(&'static str, String)>> {
    let clears = stats.row_clear_counter();
    vec![
        Some(("SCORE", stats.score().to_string())),
        Some(("TIME", format_play_time(play_time))),
        None,
        Some(("PIECES", stats.completed_pieces().to_string())),
        Some(("ROWS", stats.total_cleared_rows().to_string())),
        None,
        Some(("SINGLES", clears[1].to_string())),
        Some(("DOUBLES", clears[2].to_string())),
        Some(("TRIPLES", clears[3].to_string())),
        Some(("QUADS", clears[4].to_string())),
    ]
}

/// Formats as `m:ss.cc`.
fn format_play_time(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{}:{:02}.{:02}", secs / 60, secs % 60, time.subsec_millis() / 10)
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = area.layout_vec(&Layout::vertical(
            self.rows.iter().map(|_| Constraint::Length(1)),
        ));
        let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]);

        for (row, row_area) in self.rows.into_iter().zip(row_areas) {
            let Some((label, value)) = row else {
                continue;
            };
            let [label_area, value_area] = row_area.layout(&columns);
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_play_time() {
        assert_eq!(format_play_time(Duration::ZERO), "0:00.00");
        assert_eq!(format_play_time(Duration::from_millis(62_350)), "1:02.35");
        assert_eq!(format_play_time(Duration::from_secs(600)), "10:00.00");
    }

    #[test]
    fn test_rows_follow_stats() {
        let mut stats = GameStats::new(10);
        stats.complete_piece_lock(2);
        stats.complete_piece_lock(0);

        let rows = stat_rows(&stats, Duration::from_secs(5));
        let value = |label: &str| {
            rows.iter()
                .flatten()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(value("SCORE"), Some("20"));
        assert_eq!(value("TIME"), Some("0:05.00"));
        assert_eq!(value("PIECES"), Some("2"));
        assert_eq!(value("ROWS"), Some("2"));
        assert_eq!(value("DOUBLES"), Some("1"));
        assert_eq!(value("QUADS"), Some("0"));
    }
}
