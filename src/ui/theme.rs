use crate::tree::NodeKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,
    pub comment: Color,
    pub success: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub non_terminal: Color,
    pub identifier: Color,
    pub type_name: Color,
    pub number: Color,
}

impl Theme {
    pub fn kind_color(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::NonTerminal => self.non_terminal,
            NodeKind::EpsilonNonTerminal => self.comment,
            NodeKind::IdentifierLeaf => self.identifier,
            NodeKind::TypeLeaf => self.type_name,
            NodeKind::IntLiteralLeaf | NodeKind::FloatLiteralLeaf => self.number,
            NodeKind::NoValueLeaf => self.fg,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    border_focused: Color::Rgb(249, 226, 175), // Yellow
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    non_terminal: Color::Rgb(137, 180, 250),
    identifier: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213), // Cyan/teal
    number: Color::Rgb(250, 179, 135),
};
