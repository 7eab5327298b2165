//! Tree pane rendering

use crate::tree::format_node;
use crate::ui::app::Row;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

fn row_line(row: &Row<'_>, folded: bool) -> Line<'static> {
    let marker = if row.node.child_count() == 0 {
        "  "
    } else if folded {
        "▸ "
    } else {
        "▾ "
    };

    // Verbose so epsilon rows (only present when shown) get a label
    let label = match format_node(row.node, 0, true) {
        Ok(Some(text)) => text,
        Ok(None) => row.node.name().to_string(),
        Err(_) => format!("{}: <unset>", row.node.name()),
    };

    Line::from(vec![
        Span::raw("  ".repeat(row.depth)),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(label, Style::default().fg(DEFAULT_THEME.kind_color(row.node.kind()))),
    ])
}

/// Render the tree pane, keeping the selected row in view.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[Row<'_>],
    selected: usize,
    folded: &FxHashSet<usize>,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    if rows.is_empty() {
        let paragraph = Paragraph::new("(empty tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, row)| {
            let item = ListItem::new(row_line(row, folded.contains(&row.id)));
            if index == selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
