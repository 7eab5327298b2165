//! Token scanner for C--
//!
//! Converts source text into a flat [`Token`] stream. Malformed input does
//! not stop the scan: the offending characters are skipped and a
//! [`LexError`] is recorded, so one run reports every lexical error.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// C-- token classes
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Valued tokens
    Int(i32),
    Float(f32),
    Id(String),
    Type(String),

    // Keywords
    Struct,
    Return,
    If,
    Else,
    While,

    // Operators
    Relop(&'static str), // > < >= <= == !=
    AssignOp,            // =
    Plus,                // +
    Minus,               // -
    Star,                // *
    Div,                 // /
    And,                 // &&
    Or,                  // ||
    Dot,                 // .
    Not,                 // !

    // Punctuation
    Semi,  // ;
    Comma, // ,
    Lp,    // (
    Rp,    // )
    Lb,    // [
    Rb,    // ]
    Lc,    // {
    Rc,    // }
}

impl TokenKind {
    /// Token class name as it appears in tree dumps
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "INT",
            TokenKind::Float(_) => "FLOAT",
            TokenKind::Id(_) => "ID",
            TokenKind::Type(_) => "TYPE",
            TokenKind::Struct => "STRUCT",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Relop(_) => "RELOP",
            TokenKind::AssignOp => "ASSIGNOP",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Div => "DIV",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Dot => "DOT",
            TokenKind::Not => "NOT",
            TokenKind::Semi => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::Lp => "LP",
            TokenKind::Rp => "RP",
            TokenKind::Lb => "LB",
            TokenKind::Rb => "RB",
            TokenKind::Lc => "LC",
            TokenKind::Rc => "RC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

/// Lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of scanning a whole input
#[derive(Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            errors: Vec::new(),
        }
    }

    /// Scan the entire input
    pub fn tokenize(mut self) -> LexOutput {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();
            if self.is_at_end() {
                break;
            }
            if let Some(token) = self.next_token() {
                tokens.push(token);
            }
        }

        LexOutput {
            tokens,
            errors: self.errors,
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        let loc = self.current_location();
        let ch = self.advance()?;

        let kind = match ch {
            '0'..='9' => return self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '>' | '<' | '=' | '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Relop(match ch {
                        '>' => ">=",
                        '<' => "<=",
                        '=' => "==",
                        _ => "!=",
                    })
                } else {
                    match ch {
                        '>' => TokenKind::Relop(">"),
                        '<' => TokenKind::Relop("<"),
                        '=' => TokenKind::AssignOp,
                        _ => TokenKind::Not,
                    }
                }
            }
            '&' | '|' => {
                if self.peek() == Some(ch) {
                    self.advance();
                    if ch == '&' {
                        TokenKind::And
                    } else {
                        TokenKind::Or
                    }
                } else {
                    self.error(loc, format!("Mysterious character '{}'", ch));
                    return None;
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Div,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '(' => TokenKind::Lp,
            ')' => TokenKind::Rp,
            '[' => TokenKind::Lb,
            ']' => TokenKind::Rb,
            '{' => TokenKind::Lc,
            '}' => TokenKind::Rc,

            _ => {
                self.error(loc, format!("Mysterious character '{}'", ch));
                return None;
            }
        };

        Some(Token {
            kind,
            location: loc,
        })
    }

    /// Decimal, octal (`017`) and hex (`0x1F`) integers; decimal floats with
    /// an optional exponent.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Option<Token> {
        let mut text = String::new();
        text.push(first_digit);

        if first_digit == '0' && matches!(self.peek(), Some('x') | Some('X')) {
            text.push(self.advance()?);
            self.take_alphanumeric(&mut text);
            return self.radix_literal(&text, &text[2..], 16, "hexadecimal", loc);
        }

        self.take_digits(&mut text);

        let is_float = match self.peek() {
            Some('.') => self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit() || c == 'e' || c == 'E'),
            Some('e') | Some('E') => true,
            _ => false,
        };

        if is_float {
            return self.float_literal(text, loc);
        }

        // Trailing letters glued to a number make the whole word illegal
        let digits_end = text.len();
        self.take_alphanumeric(&mut text);
        if text.len() != digits_end {
            self.error(loc, format!("Illegal number '{}'", text));
            return None;
        }

        if text.len() > 1 && text.starts_with('0') {
            return self.radix_literal(&text, &text[1..], 8, "octal", loc);
        }
        self.radix_literal(&text, &text, 10, "decimal", loc)
    }

    fn radix_literal(
        &mut self,
        text: &str,
        digits: &str,
        radix: u32,
        what: &str,
        loc: SourceLocation,
    ) -> Option<Token> {
        match u32::from_str_radix(digits, radix) {
            // C-- INT is a 32-bit word; values above i32::MAX wrap
            Ok(value) => Some(Token {
                kind: TokenKind::Int(value as i32),
                location: loc,
            }),
            Err(_) => {
                self.error(loc, format!("Illegal {} number '{}'", what, text));
                None
            }
        }
    }

    fn float_literal(&mut self, mut text: String, loc: SourceLocation) -> Option<Token> {
        if self.peek() == Some('.') {
            text.push('.');
            self.advance();
            self.take_digits(&mut text);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            text.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.advance();
            }
            let before = text.len();
            self.take_digits(&mut text);
            if text.len() == before {
                self.take_alphanumeric(&mut text);
                self.error(loc, format!("Illegal floating point number '{}'", text));
                return None;
            }
        }

        match text.parse::<f32>() {
            Ok(value) => Some(Token {
                kind: TokenKind::Float(value),
                location: loc,
            }),
            Err(_) => {
                self.error(loc, format!("Illegal floating point number '{}'", text));
                None
            }
        }
    }

    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first_char);
        self.take_alphanumeric(&mut ident);

        match ident.as_str() {
            "int" | "float" => TokenKind::Type(ident),
            "struct" => TokenKind::Struct,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            _ => TokenKind::Id(ident),
        }
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    fn take_alphanumeric(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            text.push(ch);
            self.advance();
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('*') => self.skip_block_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start_loc = self.current_location();
        self.advance(); // '/'
        self.advance(); // '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }

        self.error(start_loc, "Unterminated block comment");
    }

    fn error(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.errors.push(LexError {
            message: message.into(),
            location,
        });
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let output = Lexer::new(source).tokenize();
        assert!(output.errors.is_empty(), "unexpected errors: {:?}", output.errors);
        output.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_function() {
        let tokens = kinds("int main() { return 0; }");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Type("int".into()),
                TokenKind::Id("main".into()),
                TokenKind::Lp,
                TokenKind::Rp,
                TokenKind::Lc,
                TokenKind::Return,
                TokenKind::Int(0),
                TokenKind::Semi,
                TokenKind::Rc,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = kinds("= == != <= >= < > && || !");
        assert_eq!(
            tokens,
            vec![
                TokenKind::AssignOp,
                TokenKind::Relop("=="),
                TokenKind::Relop("!="),
                TokenKind::Relop("<="),
                TokenKind::Relop(">="),
                TokenKind::Relop("<"),
                TokenKind::Relop(">"),
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds("017"), vec![TokenKind::Int(15)]);
        assert_eq!(kinds("0x1F"), vec![TokenKind::Int(31)]);
        assert_eq!(kinds("3.5"), vec![TokenKind::Float(3.5)]);
        assert_eq!(kinds("1.5e2"), vec![TokenKind::Float(150.0)]);
        assert_eq!(kinds("2E-1"), vec![TokenKind::Float(0.2)]);
    }

    #[test]
    fn test_comments_and_lines() {
        let output = Lexer::new("int x; // comment\n/* block\ncomment */ float y;").tokenize();
        assert!(output.errors.is_empty());
        let lines: Vec<usize> = output.tokens.iter().map(|t| t.location.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 3, 3, 3]);
    }

    #[test]
    fn test_errors_do_not_stop_the_scan() {
        let output = Lexer::new("int a = 09;\nb ~ c;\n1e;").tokenize();
        let messages: Vec<&str> = output.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Illegal octal number '09'",
                "Mysterious character '~'",
                "Illegal floating point number '1e'",
            ]
        );
        assert_eq!(output.errors[1].location, SourceLocation::new(2, 3));
        assert!(output.tokens.iter().any(|t| t.kind == TokenKind::Id("c".into())));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let output = Lexer::new("int x; /* never closed").tokenize();
        assert_eq!(output.tokens.len(), 3);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].to_string(), "Unterminated block comment");
    }
}
