mod logger;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// A leveled debugging label assignable to lexers, grammars and rule
/// queries. Logging is compiled in only under `debug_assertions` and is
/// silent until a label is assigned.
pub enum Log<T> {
    None,
    Failures(T),
    Matches(T),
    Verbose(T),
}
