//! Tree viewer state and event loop

use crate::tree::{preorder, NodeKind, SyntaxNode, TreeStats};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;

/// One visible line of the tree pane
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    /// Preorder index of the node in the whole tree, stable across folding
    pub id: usize,
    pub depth: usize,
    pub node: &'a SyntaxNode,
}

/// Rows left after hiding the descendants of folded nodes and, unless
/// `show_epsilon` is set, epsilon non-terminals.
pub fn visible_rows<'a>(
    root: &'a SyntaxNode,
    folded: &FxHashSet<usize>,
    show_epsilon: bool,
) -> Vec<Row<'a>> {
    let mut rows = Vec::new();
    let mut hidden_below: Option<usize> = None;

    for (id, (depth, node)) in preorder(root).enumerate() {
        if let Some(fold_depth) = hidden_below {
            if depth > fold_depth {
                continue;
            }
            hidden_below = None;
        }
        if node.kind() == NodeKind::EpsilonNonTerminal && !show_epsilon {
            continue;
        }
        rows.push(Row { id, depth, node });
        if folded.contains(&id) {
            hidden_below = Some(depth);
        }
    }
    rows
}

pub struct App<'a> {
    pub root: &'a SyntaxNode,
    pub stats: TreeStats,
    pub rows: Vec<Row<'a>>,
    pub folded: FxHashSet<usize>,
    pub show_epsilon: bool,

    /// Index into `rows`
    pub selected: usize,
    pub scroll: usize,

    pub should_quit: bool,
    pub status_message: String,
}

impl<'a> App<'a> {
    pub fn new(root: &'a SyntaxNode, show_epsilon: bool) -> Self {
        let folded = FxHashSet::default();
        App {
            root,
            stats: TreeStats::collect(root),
            rows: visible_rows(root, &folded, show_epsilon),
            folded,
            show_epsilon,
            selected: 0,
            scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    pub fn selected_row(&self) -> Option<Row<'a>> {
        self.rows.get(self.selected).copied()
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        super::panes::render_tree_pane(
            frame,
            columns[0],
            &self.rows,
            self.selected,
            &self.folded,
            &mut self.scroll,
        );

        super::panes::render_details_pane(frame, columns[1], self.selected_row(), &self.stats);

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.rows.len(),
        );
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.rows.len().saturating_sub(1),
            KeyCode::Left | KeyCode::Char('h') => self.collapse_or_parent(),
            KeyCode::Right | KeyCode::Char('l') => self.expand_or_child(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_fold(),
            KeyCode::Char('e') => {
                self.show_epsilon = !self.show_epsilon;
                self.refresh();
                self.status_message = if self.show_epsilon {
                    "Showing epsilon nodes".to_string()
                } else {
                    "Hiding epsilon nodes".to_string()
                };
            }
            KeyCode::Char('z') => {
                self.folded.clear();
                self.refresh();
                self.status_message = "Expanded all".to_string();
            }
            _ => {}
        }
    }

    pub fn toggle_fold(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.node.child_count() == 0 {
            self.status_message = format!("{} has no children", row.node.name());
            return;
        }
        if self.folded.remove(&row.id) {
            self.status_message = format!("Expanded {}", row.node.name());
        } else {
            self.folded.insert(row.id);
            self.status_message = format!("Folded {}", row.node.name());
        }
        self.refresh();
    }

    fn collapse_or_parent(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.node.child_count() > 0 && !self.folded.contains(&row.id) {
            self.toggle_fold();
            return;
        }
        if let Some(parent) = self.rows[..self.selected]
            .iter()
            .rposition(|r| r.depth < row.depth)
        {
            self.selected = parent;
        }
    }

    fn expand_or_child(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if self.folded.contains(&row.id) {
            self.toggle_fold();
        } else if self
            .rows
            .get(self.selected + 1)
            .is_some_and(|next| next.depth > row.depth)
        {
            self.selected += 1;
        }
    }

    /// Rebuild the rows, keeping the selection on the same node when it is
    /// still visible.
    fn refresh(&mut self) {
        let current = self.selected_row().map(|r| r.id);
        self.rows = visible_rows(self.root, &self.folded, self.show_epsilon);
        self.selected = current
            .and_then(|id| self.rows.iter().position(|r| r.id == id))
            .unwrap_or(self.selected)
            .min(self.rows.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn sample() -> SyntaxNode {
        let stmt = SyntaxNode::non_terminal("Stmt", 2)
            .with_children([
                SyntaxNode::token("RETURN", 2),
                SyntaxNode::int_literal(0, 2),
                SyntaxNode::token("SEMI", 2),
            ])
            .unwrap();
        SyntaxNode::non_terminal("CompSt", 1)
            .with_children([
                SyntaxNode::token("LC", 1),
                SyntaxNode::epsilon("DefList", 2),
                stmt,
                SyntaxNode::token("RC", 3),
            ])
            .unwrap()
    }

    fn press(app: &mut App<'_>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn names<'a>(app: &App<'a>) -> Vec<&'a str> {
        app.rows.iter().map(|r| r.node.name()).collect()
    }

    #[test]
    fn test_epsilon_rows_hidden_by_default() {
        let root = sample();
        let app = App::new(&root, false);
        assert_eq!(
            names(&app),
            vec!["CompSt", "LC", "Stmt", "RETURN", "INT", "SEMI", "RC"]
        );
        assert_eq!(app.rows[2].id, 3);
    }

    #[test]
    fn test_fold_hides_descendants() {
        let root = sample();
        let mut app = App::new(&root, true);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_row().unwrap().node.name(), "RC");

        // Select Stmt and fold it
        app.selected = 3;
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(names(&app), vec!["CompSt", "LC", "DefList", "Stmt", "RC"]);
        assert_eq!(app.selected_row().unwrap().node.name(), "Stmt");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.rows.len(), 8);
    }

    #[test]
    fn test_left_moves_to_parent() {
        let root = sample();
        let mut app = App::new(&root, false);
        app.selected = 4; // INT
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_row().unwrap().node.name(), "Stmt");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.rows.len(), 4);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected_row().unwrap().node.name(), "CompSt");
    }

    #[test]
    fn test_toggle_epsilon_keeps_selection() {
        let root = sample();
        let mut app = App::new(&root, false);
        app.selected = 2; // Stmt
        press(&mut app, KeyCode::Char('e'));
        assert!(app.show_epsilon);
        assert_eq!(app.selected_row().unwrap().node.name(), "Stmt");
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn test_render_shows_tree() {
        let root = sample();
        let mut app = App::new(&root, false);
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("CompSt (1)"));
        assert!(text.contains("INT: 0"));
    }
}
