use crate::lexer::{
    ILexeme, Identifiers, Lexer, LexerState, Numbers, Operators, QuotedString, Whitespace,
};
use crate::{Position, PValue, TokenText};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Tok {
    Ident,
    Radix,
    Int,
    Dec,
    Sci,
    Op,
    Space,
    Str,
}

fn numbers() -> Numbers<Tok> {
    Numbers::new(Tok::Radix, Tok::Int, Tok::Dec, Tok::Sci)
}

#[test]
fn hex_literal_lexes_and_leaves_the_rest() {
    let mut state = LexerState::new("0xFF ", 4);
    assert!(numbers().scan(&mut state).is_ok());

    let tokens = state.emitted();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token.kind, Tok::Radix);
    assert_eq!(tokens[0].token.text, TokenText::Str("0xFF".to_string()));
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!(state.remaining(), " ");
    assert_eq!(state.position(), Position::new(1, 5));
}

#[test]
fn compound_operators_beat_their_prefixes() {
    let lexer = Lexer::new(vec![Rc::new(Operators::new(Tok::Op, "+ += - -= == ="))]);
    let (result, _) = lexer.lex("+=", 4);
    let tokens = result.ok().unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].token.text, TokenText::Str("+=".to_string()));
}

#[test]
fn rewind_undoes_a_partial_match() {
    let mut state: LexerState<Tok> = LexerState::new("abcdef", 4);
    let start = state.position();

    assert!(state.match_str("abc").is_ok());
    assert_eq!(state.buffer(), "abc");
    let _: PValue<(), _> = state.rewind();

    assert_eq!(state.buffer(), "");
    assert_eq!(state.remaining(), "abcdef");
    assert_eq!(state.position(), start);
}

#[test]
fn emit_refuses_an_empty_buffer() {
    let mut state: LexerState<Tok> = LexerState::new("xyz", 4);
    assert!(state.emit(Tok::Ident, false).is_backtrack());
    assert_eq!(state.token_count(), 0);
}

#[test]
fn tabs_and_breaks_advance_the_position() {
    let lexer = Lexer::new(vec![
        Rc::new(Whitespace::skip()),
        Rc::new(Identifiers::new(Tok::Ident)),
    ]);
    let (result, state) = lexer.lex("\tab\n  cd", 4);
    let tokens = result.ok().unwrap();

    assert_eq!((tokens[0].line, tokens[0].column), (1, 5));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    assert_eq!(state.position(), Position::new(2, 5));
}

#[test]
fn every_character_is_accounted_for() {
    // with all lexemes keeping their text, the concatenation of emitted
    // texts plus the unconsumed remainder reconstructs the input
    let lexer = Lexer::new(vec![
        Rc::new(Whitespace::keep(Tok::Space)),
        Rc::new(Identifiers::new(Tok::Ident)),
        Rc::new(numbers()),
        Rc::new(QuotedString::new(Tok::Str)),
        Rc::new(Operators::new(Tok::Op, "= + - ==")),
    ]);
    let input = "x = 3.5 + \"two words\"\n  y == 0x1A";
    let (result, state) = lexer.lex(input, 4);

    let rebuilt: String = result
        .ok()
        .unwrap()
        .iter()
        .map(|t| t.token.text.to_string())
        .collect();
    assert_eq!(rebuilt + state.remaining(), input);
}

#[test]
fn unrecognized_characters_fail_with_their_position() {
    let lexer = Lexer::new(vec![
        Rc::new(Whitespace::skip()),
        Rc::new(Identifiers::new(Tok::Ident)),
    ]);
    let (result, _) = lexer.lex("ab ?", 4);
    match result {
        PValue::Fail(err) => {
            assert_eq!(err.position, Position::new(1, 4));
            assert!(err.message.contains('?'));
        }
        other => panic!("expected a failure, got {:?}", other),
    }
}

#[test]
fn hard_failures_stop_the_run() {
    let lexer = Lexer::new(vec![
        Rc::new(Whitespace::skip()),
        Rc::new(QuotedString::new(Tok::Str)),
    ]);
    let (result, _) = lexer.lex("\"closed\" \"open", 4);
    match result {
        PValue::Fail(err) => assert!(err.message.contains("unterminated")),
        other => panic!("expected a failure, got {:?}", other),
    }
}
