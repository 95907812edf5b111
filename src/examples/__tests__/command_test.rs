use crate::examples::command::{complete, interpret, suggest, Action};

#[test]
fn exact_lines_interpret_to_their_actions() {
    assert_eq!(interpret("show status"), Some(Action::ShowStatus));
    assert_eq!(interpret("show log"), Some(Action::ShowLog));
    assert_eq!(interpret("quit"), Some(Action::Quit));
    assert_eq!(
        interpret("connect db.internal:5432"),
        Some(Action::Connect("db.internal:5432".to_string()))
    );
}

#[test]
fn partial_or_overlong_lines_do_not_interpret() {
    assert_eq!(interpret("show"), None);
    assert_eq!(interpret("show status now"), None);
    assert_eq!(interpret("sho status"), None);
    assert_eq!(interpret(""), None);
}

#[test]
fn abbreviations_suggest_the_closest_command() {
    assert_eq!(suggest("sho log"), Some(Action::ShowLog));
    assert_eq!(suggest("q"), Some(Action::Quit));
    assert_eq!(
        suggest("conn example.org"),
        Some(Action::Connect("example.org".to_string()))
    );
    // full words still win outright
    assert_eq!(suggest("show status"), Some(Action::ShowStatus));
}

#[test]
fn completion_offers_every_first_word() {
    assert_eq!(complete(""), vec!["connect", "help", "quit", "show"]);
}

#[test]
fn completion_narrows_with_the_typed_prefix() {
    assert_eq!(complete("show "), vec!["log", "status"]);
    assert_eq!(complete("show st"), vec!["status"]);
    assert_eq!(complete("q"), vec!["quit"]);
    assert!(complete("show zz").is_empty());
}

#[test]
fn free_form_arguments_offer_no_completion() {
    assert!(complete("connect ").is_empty());
}
