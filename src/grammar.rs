use crate::lexer::Lexer;
use crate::parser::{Parser, ParserState};
use crate::{Line, Log, ParseError, PValue};
use once_cell::unsync::OnceCell;
use std::fmt::Debug;

/// A complete grammar: a tab width for column accounting, a lexer, and a
/// parser over the lexer's token stream.
///
/// [parse](Grammar::parse) runs the two phases back to back: the lexer to
/// exhaustion, the token stream regrouped into lines, the parser over the
/// lines. A lexing failure is converted into a parser-compatible error with
/// a one-point span at the position where the lexer stopped.
pub struct Grammar<S, T, A> {
    tab_width: usize,
    lexer: Lexer<T>,
    parser: Parser<S, T, A>,
    log: OnceCell<Log<&'static str>>,
}

impl<S: 'static, T: Copy + Debug + Ord + 'static, A: 'static> Grammar<S, T, A> {
    pub fn new(tab_width: usize, lexer: Lexer<T>, parser: Parser<S, T, A>) -> Self {
        Self {
            tab_width,
            lexer,
            parser,
            log: OnceCell::new(),
        }
    }

    /// Set a log label to debug parse runs.
    pub fn set_log(&self, log: Log<&'static str>) -> Result<(), String> {
        self.log
            .set(log)
            .map_err(|err| format!("Log label {} is already assigned.", err))
    }

    /// Run only the lexical phase.
    pub fn tokenize<'c>(
        &self,
        input: &'c str,
    ) -> (
        PValue<Vec<crate::LocatedToken<T>>, crate::LexError>,
        crate::lexer::LexerState<'c, T>,
    ) {
        self.lexer.lex(input, self.tab_width)
    }

    /// Parse `input` with an initial caller state.
    pub fn parse(&self, input: &str, user: S) -> PValue<A, ParseError<T>> {
        self.evaluate(input, user).0
    }

    fn evaluate(
        &self,
        input: &str,
        user: S,
    ) -> (PValue<A, ParseError<T>>, Option<ParserState<S, T>>) {
        let (lexed, _) = self.lexer.lex(input, self.tab_width);
        let tokens = match lexed {
            PValue::Ok(tokens) => tokens,
            PValue::Backtrack => {
                return (PValue::Backtrack, None);
            }
            PValue::Fail(err) => {
                self.log_outcome::<()>(&PValue::Fail(err.clone().into()));
                return (PValue::Fail(err.into()), None);
            }
        };

        let mut state = ParserState::new(Line::regroup(tokens), user);
        let outcome = self.parser.run(&mut state);
        self.log_outcome(&outcome);
        (outcome, Some(state))
    }

    fn log_outcome<B>(&self, _outcome: &PValue<B, ParseError<T>>) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.log.get() {
            match _outcome {
                PValue::Ok(_) if label.covers(&Log::Matches(())) => {
                    println!("[{}; Grammar]: parse succeeded", label)
                }
                PValue::Fail(err) if label.covers(&Log::Failures(())) => {
                    println!("[{}; Grammar]: {}", label, err)
                }
                _ => {}
            }
        }
    }
}

impl<S: Debug + 'static, T: Copy + Debug + Ord + 'static, A: 'static> Grammar<S, T, A> {
    /// [parse](Grammar::parse), with a rendering of the final caller state
    /// attached to any failure for diagnostics.
    pub fn parse_traced(&self, input: &str, user: S) -> PValue<A, ParseError<T>> {
        let (outcome, state) = self.evaluate(input, user);
        match (outcome, state) {
            (PValue::Fail(err), Some(state)) => {
                PValue::Fail(err.with_state_note(format!("{:?}", state.user())))
            }
            (outcome, _) => outcome,
        }
    }
}

#[cfg(test)]
mod __tests__ {
    use super::Grammar;
    use crate::lexer::{Lexer, Numbers, Operators, Whitespace};
    use crate::parser::Parser;
    use crate::{Location, Position, PValue};
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Tok {
        Radix,
        Int,
        Dec,
        Sci,
        Op,
    }

    fn sum_grammar() -> Grammar<u32, Tok, i64> {
        let lexer = Lexer::new(vec![
            Rc::new(Whitespace::skip()),
            Rc::new(Numbers::new(Tok::Radix, Tok::Int, Tok::Dec, Tok::Sci)),
            Rc::new(Operators::new(Tok::Op, "+")),
        ]);
        let int = Parser::kind(Tok::Int)
            .map(|t| t.token.text.to_string().parse::<i64>().unwrap_or(0));
        let tail = Parser::text("+").then(&int.clone().expect("an integer")).many();
        let sum = int.and_then(move |first| {
            tail.map(move |rest| first + rest.iter().sum::<i64>())
        });
        let complete = sum.and_then(|value| {
            Parser::eof().expect("end of input").map(move |_| value)
        });
        Grammar::new(4, lexer, complete)
    }

    #[test]
    fn two_phases_run_back_to_back() {
        let grammar = sum_grammar();
        assert!(matches!(grammar.parse("1 + 2 + 3", 0), PValue::Ok(_)));
    }

    #[test]
    fn lex_failures_surface_as_parse_errors() {
        let grammar = sum_grammar();
        match grammar.parse("1 + ?", 0) {
            PValue::Fail(err) => {
                assert_eq!(err.location, Location::at(Position::new(1, 5)));
                assert!(err.message.contains("unrecognized"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn traced_failures_carry_the_state_note() {
        let grammar = sum_grammar();
        match grammar.parse_traced("1 + + 2", 7u32) {
            PValue::Fail(err) => assert_eq!(err.state_note.as_deref(), Some("7")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
