use crate::Position;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
/// The text carried by a token, in one of three storage forms: nothing at
/// all (the kind says everything), a single character, or a full string.
pub enum TokenText {
    Empty,
    Char(char),
    Str(String),
}

impl TokenText {
    /// Build the cheapest form that can hold `text`.
    pub fn from_buffer(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => TokenText::Empty,
            (Some(c), None) => TokenText::Char(c),
            _ => TokenText::Str(text.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TokenText::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            TokenText::Empty => 0,
            TokenText::Char(c) => c.len_utf8(),
            TokenText::Str(s) => s.len(),
        }
    }

    /// Compare the stored text against a key string without materializing
    /// the single-character form.
    pub fn cmp_str(&self, key: &str) -> Ordering {
        match self {
            TokenText::Empty => "".cmp(key),
            TokenText::Char(c) => {
                let mut key_chars = key.chars();
                match key_chars.next() {
                    None => Ordering::Greater,
                    Some(k) => c.cmp(&k).then_with(|| {
                        if key_chars.next().is_some() {
                            Ordering::Less
                        } else {
                            Ordering::Equal
                        }
                    }),
                }
            }
            TokenText::Str(s) => s.as_str().cmp(key),
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.cmp_str(key) == Ordering::Equal
    }
}

impl Display for TokenText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenText::Empty => Ok(()),
            TokenText::Char(c) => write!(f, "{}", c),
            TokenText::Str(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
/// A lexed token: a caller-defined kind plus the matched text.
pub struct Token<T> {
    pub kind: T,
    pub text: TokenText,
}

impl<T> Token<T> {
    pub fn new(kind: T, text: TokenText) -> Self {
        Self { kind, text }
    }

    pub fn empty(kind: T) -> Self {
        Self {
            kind,
            text: TokenText::Empty,
        }
    }
}

impl<T: Debug> Display for Token<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            TokenText::Empty => write!(f, "{:?}", self.kind),
            text => write!(f, "{:?} {:?}", self.kind, text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A token bundled with the line and column where it starts.
pub struct LocatedToken<T> {
    pub line: usize,
    pub column: usize,
    pub token: Token<T>,
}

impl<T> LocatedToken<T> {
    pub fn new(line: usize, column: usize, token: Token<T>) -> Self {
        Self {
            line,
            column,
            token,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One line of the token stream: the line number and the tokens on it,
/// each paired with its column. Regrouping the flat lexer output into
/// lines means the parser phase never stores a line number per token.
pub struct Line<T> {
    pub number: usize,
    pub tokens: Vec<(usize, Token<T>)>,
}

impl<T> Line<T> {
    pub fn new(number: usize, tokens: Vec<(usize, Token<T>)>) -> Self {
        Self { number, tokens }
    }

    /// Regroup a flat located-token stream by line number.
    pub fn regroup(stream: Vec<LocatedToken<T>>) -> Vec<Line<T>> {
        let mut lines: Vec<Line<T>> = Vec::new();
        for located in stream {
            match lines.last_mut() {
                Some(line) if line.number == located.line => {
                    line.tokens.push((located.column, located.token));
                }
                _ => {
                    lines.push(Line::new(
                        located.line,
                        vec![(located.column, located.token)],
                    ));
                }
            }
        }
        lines
    }
}

#[cfg(test)]
mod __tests__ {
    use super::{Line, LocatedToken, Token, TokenText};
    use std::cmp::Ordering;

    #[test]
    fn text_picks_the_cheapest_form() {
        assert_eq!(TokenText::from_buffer(""), TokenText::Empty);
        assert_eq!(TokenText::from_buffer("+"), TokenText::Char('+'));
        assert_eq!(
            TokenText::from_buffer("+="),
            TokenText::Str("+=".to_string())
        );
    }

    #[test]
    fn char_form_compares_like_a_string() {
        let plus = TokenText::Char('+');
        assert_eq!(plus.cmp_str("+"), Ordering::Equal);
        assert_eq!(plus.cmp_str("+="), Ordering::Less);
        assert_eq!(plus.cmp_str(""), Ordering::Greater);
        assert!(plus.matches("+"));
        assert!(!plus.matches("-"));
    }

    #[test]
    fn regroup_collects_tokens_by_line() {
        let stream = vec![
            LocatedToken::new(1, 1, Token::new(0u8, TokenText::Char('a'))),
            LocatedToken::new(1, 3, Token::new(1u8, TokenText::Char('b'))),
            LocatedToken::new(2, 1, Token::new(2u8, TokenText::Char('c'))),
        ];
        let lines = Line::regroup(stream);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[0].tokens.len(), 2);
        assert_eq!(lines[1].number, 2);
        assert_eq!(lines[1].tokens[0].0, 1);
    }
}
