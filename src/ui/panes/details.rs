//! Selected-node details and tree summary

use crate::tree::{NodeKind, TreeStats};
use crate::ui::app::Row;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

fn field(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", name), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

fn kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::NonTerminal => "non-terminal",
        NodeKind::EpsilonNonTerminal => "epsilon",
        NodeKind::IdentifierLeaf => "identifier",
        NodeKind::TypeLeaf => "type",
        NodeKind::IntLiteralLeaf => "int literal",
        NodeKind::FloatLiteralLeaf => "float literal",
        NodeKind::NoValueLeaf => "token",
    }
}

pub fn render_details_pane(frame: &mut Frame, area: Rect, row: Option<Row<'_>>, stats: &TreeStats) {
    let block = Block::default()
        .title(" Node ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 0, 0, 0));

    let mut lines = Vec::new();

    if let Some(row) = row {
        let node = row.node;
        lines.push(Line::from(Span::styled(
            node.name().to_string(),
            Style::default()
                .fg(DEFAULT_THEME.kind_color(node.kind()))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(field("kind", kind_name(node.kind()).to_string()));
        lines.push(field("line", node.lineno().to_string()));
        if node.kind().carries_value() {
            lines.push(field("value", node.payload().to_string()));
        }
        lines.push(field("children", node.child_count().to_string()));
        lines.push(field("depth", row.depth.to_string()));
        lines.push(field("subtree", node.subtree_size().to_string()));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Tree",
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(field("nodes", stats.nodes.to_string()));
    lines.push(field("leaves", stats.leaves.to_string()));
    lines.push(field("epsilon", stats.epsilons.to_string()));
    lines.push(field("depth", stats.max_depth.to_string()));

    for (label, count) in stats.most_common(5) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>5} ", count), Style::default().fg(DEFAULT_THEME.number)),
            Span::styled(label.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
