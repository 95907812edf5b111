use crate::parser::{Parser, ParserState};
use crate::{Line, Location, LocatedToken, Position, PValue, Token, TokenText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tok {
    Word,
    Digit,
    Op,
    Open,
    Close,
}

fn state_of(tokens: Vec<(Tok, &str, usize, usize)>) -> ParserState<(), Tok> {
    let stream = tokens
        .into_iter()
        .map(|(kind, text, line, column)| {
            LocatedToken::new(line, column, Token::new(kind, TokenText::from_buffer(text)))
        })
        .collect();
    ParserState::new(Line::regroup(stream), ())
}

#[test]
fn kind_dispatch_consumes_on_hit_only() {
    let digit: Parser<(), Tok, LocatedToken<Tok>> = Parser::kind(Tok::Digit);
    let mut state = state_of(vec![(Tok::Word, "abc", 1, 1)]);

    assert!(digit.run(&mut state).is_backtrack());
    // the miss left the token in place
    assert_eq!(state.peek().ok().unwrap().token.kind, Tok::Word);

    let mut state = state_of(vec![(Tok::Digit, "7", 1, 1)]);
    assert_eq!(
        digit.run(&mut state).ok().unwrap().token.kind,
        Tok::Digit
    );
    assert!(state.at_end());
}

#[test]
fn merged_tables_behave_like_ordered_alternation() {
    let by_table: Parser<(), Tok, &'static str> = Parser::kind(Tok::Word)
        .map(|_| "word")
        .or(&Parser::kind(Tok::Digit).map(|_| "digit"))
        .or(&Parser::kind(Tok::Op).map(|_| "op"));
    assert_eq!(by_table.table_width(), Some(3));

    let word_first: Parser<(), Tok, &'static str> = Parser::func(|state| {
        Parser::kind(Tok::Word).map(|_| "word").run(state).or_else(|| {
            Parser::kind(Tok::Digit)
                .map(|_| "digit")
                .run(state)
                .or_else(|| Parser::kind(Tok::Op).map(|_| "op").run(state))
        })
    });

    for tokens in [
        vec![(Tok::Digit, "7", 1, 1)],
        vec![(Tok::Word, "a", 1, 1)],
        vec![(Tok::Op, "+", 1, 1)],
        vec![(Tok::Close, ")", 1, 1)],
        vec![],
    ] {
        let mut a = state_of(tokens.clone());
        let mut b = state_of(tokens);
        assert_eq!(by_table.run(&mut a), word_first.run(&mut b));
    }
}

#[test]
fn colliding_keys_keep_source_order() {
    let first: Parser<(), Tok, &'static str> = Parser::kind(Tok::Word).map(|_| "first");
    let second = Parser::kind(Tok::Word).map(|_| "second");
    let merged = first.or(&second);
    assert_eq!(merged.table_width(), Some(1));

    let mut state = state_of(vec![(Tok::Word, "a", 1, 1)]);
    assert_eq!(merged.run(&mut state), PValue::Ok("first"));
}

#[test]
fn text_dispatch_selects_by_token_text() {
    let op: Parser<(), Tok, &'static str> = Parser::text("+")
        .map(|_| "plus")
        .or(&Parser::text("+=").map(|_| "plus-assign"));
    assert_eq!(op.table_width(), Some(2));

    let mut state = state_of(vec![(Tok::Op, "+=", 1, 1)]);
    assert_eq!(op.run(&mut state), PValue::Ok("plus-assign"));

    let mut state = state_of(vec![(Tok::Op, "*", 1, 1)]);
    assert!(op.run(&mut state).is_backtrack());
}

#[test]
fn expect_converts_backtrack_to_a_located_failure() {
    let digit: Parser<(), Tok, LocatedToken<Tok>> =
        Parser::kind(Tok::Digit).expect("digit");
    let mut state = state_of(vec![(Tok::Word, "abc", 1, 1)]);

    match digit.run(&mut state) {
        PValue::Fail(err) => {
            assert_eq!(err.location, Location::at(Position::new(1, 1)));
            assert_eq!(err.message, "expecting digit");
            assert_eq!(err.found.unwrap().kind, Tok::Word);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn expect_lets_failures_through_unchanged() {
    let failing: Parser<(), Tok, LocatedToken<Tok>> =
        Parser::kind(Tok::Open).then(&Parser::kind(Tok::Digit).expect("digit"));
    let wrapped = failing.expect("group");

    let mut state = state_of(vec![(Tok::Open, "(", 1, 1), (Tok::Word, "x", 1, 2)]);
    match wrapped.run(&mut state) {
        PValue::Fail(err) => assert_eq!(err.message, "expecting digit"),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn marker_widens_the_failure_span() {
    let group: Parser<(), Tok, LocatedToken<Tok>> = Parser::kind(Tok::Open)
        .then(&Parser::kind(Tok::Digit).expect("digit"))
        .marker();

    let mut state = state_of(vec![(Tok::Open, "(", 1, 1), (Tok::Word, "x", 1, 4)]);
    match group.run(&mut state) {
        PValue::Fail(err) => {
            assert_eq!(err.location.start(), Some(Position::new(1, 1)));
            assert_eq!(err.location.end(), Some(Position::new(1, 4)));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn many_and_optional_never_fail_softly() {
    let digits: Parser<(), Tok, Vec<LocatedToken<Tok>>> = Parser::kind(Tok::Digit).many();
    let mut state = state_of(vec![
        (Tok::Digit, "1", 1, 1),
        (Tok::Digit, "2", 1, 2),
        (Tok::Word, "x", 1, 3),
    ]);
    assert_eq!(digits.run(&mut state).ok().unwrap().len(), 2);

    let missing: Parser<(), Tok, Option<LocatedToken<Tok>>> =
        Parser::kind(Tok::Digit).optional();
    assert_eq!(missing.run(&mut state), PValue::Ok(None));
}

#[test]
fn state_mutations_survive_backtracking() {
    let bump = Parser::<u32, Tok, ()>::update_state(|n| *n += 1);
    let attempt: Parser<u32, Tok, ()> = bump
        .then(&Parser::kind(Tok::Digit).ignore())
        .or(&Parser::kind(Tok::Word).ignore());

    let stream = vec![LocatedToken::new(1, 1, Token::new(Tok::Word, TokenText::Char('a')))];
    let mut state = ParserState::new(Line::regroup(stream), 0u32);
    assert!(attempt.run(&mut state).is_ok());
    // the speculative bump was not rolled back
    assert_eq!(*state.user(), 1);
}

#[test]
fn eof_succeeds_only_at_the_end() {
    let eof = Parser::<(), Tok, ()>::eof();
    let mut state = state_of(vec![]);
    assert!(eof.run(&mut state).is_ok());

    let mut state = state_of(vec![(Tok::Word, "a", 1, 1)]);
    assert!(eof.run(&mut state).is_backtrack());
}
