//! A JSON grammar assembled from the lexeme utilities and the
//! dispatch-table parser.

use crate::lexer::{Identifiers, Lexer, Numbers, Operators, QuotedString, Whitespace};
use crate::parser::Parser;
use crate::Grammar;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsonToken {
    Str,
    Radix,
    Int,
    Dec,
    Sci,
    Word,
    Punct,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

fn json_lexer() -> Lexer<JsonToken> {
    Lexer::new(vec![
        Rc::new(Whitespace::skip()),
        Rc::new(QuotedString::new(JsonToken::Str)),
        Rc::new(Numbers::new(
            JsonToken::Radix,
            JsonToken::Int,
            JsonToken::Dec,
            JsonToken::Sci,
        )),
        Rc::new(Identifiers::new(JsonToken::Word)),
        Rc::new(Operators::new(JsonToken::Punct, "{ } [ ] , :")),
    ])
}

/// Strip the quotes and resolve the escapes of a lexed string literal.
fn unquote(literal: &str) -> String {
    let inner = &literal[1..literal.len().saturating_sub(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(escaped) => out.push(escaped),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn json_string() -> Parser<(), JsonToken, JsonValue> {
    Parser::kind(JsonToken::Str)
        .map(|token| JsonValue::String(unquote(&token.token.text.to_string())))
}

fn json_number() -> Parser<(), JsonToken, JsonValue> {
    // hex/binary literals lex fine but are not JSON; leaving Radix out of
    // the table rejects them at the parser
    Parser::kind(JsonToken::Int)
        .or(&Parser::kind(JsonToken::Dec))
        .or(&Parser::kind(JsonToken::Sci))
        .and_then(|token| match token.token.text.to_string().parse::<f64>() {
            Ok(number) => Parser::pure(JsonValue::Number(number)),
            Err(_) => Parser::fail("malformed number"),
        })
}

fn json_word() -> Parser<(), JsonToken, JsonValue> {
    Parser::kind(JsonToken::Word).and_then(|token| {
        if token.token.text.matches("true") {
            Parser::pure(JsonValue::Bool(true))
        } else if token.token.text.matches("false") {
            Parser::pure(JsonValue::Bool(false))
        } else if token.token.text.matches("null") {
            Parser::pure(JsonValue::Null)
        } else {
            Parser::fail("expected true, false or null")
        }
    })
}

fn comma_separated(
    item: Parser<(), JsonToken, JsonValue>,
) -> Parser<(), JsonToken, Vec<JsonValue>> {
    item.and_then(move |first| {
            Parser::text(",")
                .then(&Parser::lazy(json_value).expect("a value"))
                .many()
                .map(move |rest| {
                    let mut items = vec![first.clone()];
                    items.extend(rest);
                    items
                })
        })
        .optional()
        .map(|items| items.unwrap_or_default())
}

fn json_array() -> Parser<(), JsonToken, JsonValue> {
    Parser::text("[")
        .then(&comma_separated(Parser::lazy(json_value)))
        .and_then(|items| {
            Parser::text("]")
                .expect("']'")
                .map(move |_| JsonValue::Array(items.clone()))
        })
        .marker()
}

fn json_object() -> Parser<(), JsonToken, JsonValue> {
    let member = Parser::kind(JsonToken::Str).and_then(|key| {
        Parser::text(":")
            .expect("':'")
            .then(&Parser::lazy(json_value).expect("a value"))
            .map(move |value| (unquote(&key.token.text.to_string()), value))
    });
    let tail = Parser::text(",").then(&member.clone().expect("a member")).many();
    let members = member
        .and_then(move |first| {
            tail.map(move |rest| {
                let mut pairs = vec![first.clone()];
                pairs.extend(rest);
                pairs
            })
        })
        .optional()
        .map(|pairs| pairs.unwrap_or_default());

    Parser::text("{")
        .then(&members)
        .and_then(|pairs| {
            Parser::text("}")
                .expect("'}'")
                .map(move |_| JsonValue::Object(pairs.clone()))
        })
        .marker()
}

/// Any JSON value. The scalar branches share one kind-dispatch table; the
/// bracket branches share a text-dispatch table. Backtracks on a
/// non-value, so wrappers decide whether a value was mandatory.
pub fn json_value() -> Parser<(), JsonToken, JsonValue> {
    json_string()
        .or(&json_number())
        .or(&json_word())
        .or(&json_array().or(&json_object()))
}

pub fn json_grammar() -> Grammar<(), JsonToken, JsonValue> {
    let document = json_value().expect("a value").and_then(|value| {
        Parser::eof()
            .expect("end of input")
            .map(move |_| value.clone())
    });
    Grammar::new(4, json_lexer(), document)
}
