use std::fmt::{Debug, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The three-state outcome every combinator in this crate produces.
///
/// `Ok` carries a produced value. `Backtrack` is a soft non-match: the
/// branch did not apply, and an alternative may still succeed. `Fail`
/// carries an error payload and is *not* recoverable through alternation;
/// only [catch](PValue::catch) can observe it.
///
/// ```
/// use lang_pk::PValue;
///
/// let hit: PValue<u8, String> = PValue::Backtrack.or_else(|| PValue::Ok(1));
/// assert_eq!(hit, PValue::Ok(1));
///
/// let err: PValue<u8, String> = PValue::Fail("no".into()).or_else(|| PValue::Ok(1));
/// assert_eq!(err, PValue::Fail("no".into()));
/// ```
pub enum PValue<A, E> {
    Ok(A),
    Backtrack,
    Fail(E),
}

impl<A, E> PValue<A, E> {
    pub fn pure(value: A) -> Self {
        PValue::Ok(value)
    }

    pub fn throw(err: E) -> Self {
        PValue::Fail(err)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, PValue::Ok(_))
    }

    pub fn is_backtrack(&self) -> bool {
        matches!(self, PValue::Backtrack)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, PValue::Fail(_))
    }

    pub fn ok(self) -> Option<A> {
        match self {
            PValue::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<B, F: FnOnce(A) -> B>(self, f: F) -> PValue<B, E> {
        match self {
            PValue::Ok(value) => PValue::Ok(f(value)),
            PValue::Backtrack => PValue::Backtrack,
            PValue::Fail(err) => PValue::Fail(err),
        }
    }

    /// Monadic sequencing; anything other than `Ok` short-circuits.
    pub fn and_then<B, F: FnOnce(A) -> PValue<B, E>>(self, f: F) -> PValue<B, E> {
        match self {
            PValue::Ok(value) => f(value),
            PValue::Backtrack => PValue::Backtrack,
            PValue::Fail(err) => PValue::Fail(err),
        }
    }

    /// Alternation. Only `Backtrack` yields to the alternative; `Ok` and
    /// `Fail` are both returned unchanged, so a hard failure cannot be
    /// silently skipped over.
    pub fn or_else<F: FnOnce() -> PValue<A, E>>(self, f: F) -> PValue<A, E> {
        match self {
            PValue::Backtrack => f(),
            other => other,
        }
    }

    /// Handle a `Fail`; a no-op on `Ok` and `Backtrack`.
    pub fn catch<F: FnOnce(E) -> PValue<A, E>>(self, handler: F) -> PValue<A, E> {
        match self {
            PValue::Fail(err) => handler(err),
            other => other,
        }
    }

    pub fn map_fail<F2, F: FnOnce(E) -> F2>(self, f: F) -> PValue<A, F2> {
        match self {
            PValue::Ok(value) => PValue::Ok(value),
            PValue::Backtrack => PValue::Backtrack,
            PValue::Fail(err) => PValue::Fail(f(err)),
        }
    }

    /// Reify the three-way outcome as an `Ok` value, so a caller can
    /// inspect it without leaving the predicate monad.
    pub fn reify(self) -> PValue<PValue<A, E>, E> {
        PValue::Ok(self)
    }
}

impl<A: Display, E: Display> Display for PValue<A, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PValue::Ok(value) => write!(f, "{}", value),
            PValue::Backtrack => write!(f, "<backtrack>"),
            PValue::Fail(err) => write!(f, "{}", err),
        }
    }
}

#[cfg(test)]
mod __tests__ {
    use super::PValue;

    fn inc(n: u32) -> PValue<u32, String> {
        PValue::Ok(n + 1)
    }

    #[test]
    fn bind_applies_on_ok_only() {
        assert_eq!(PValue::Ok(1).and_then(inc), PValue::Ok(2));
        assert_eq!(PValue::Backtrack.and_then(inc), PValue::Backtrack);
        assert_eq!(
            PValue::Fail("bad".to_string()).and_then(inc),
            PValue::Fail("bad".to_string())
        );
    }

    #[test]
    fn alternation_recovers_backtrack_only() {
        let alt = || PValue::<u32, String>::Ok(7);
        assert_eq!(PValue::Backtrack.or_else(alt), PValue::Ok(7));
        assert_eq!(PValue::Ok(1).or_else(alt), PValue::Ok(1));
        assert_eq!(
            PValue::Fail("bad".to_string()).or_else(alt),
            PValue::Fail("bad".to_string())
        );
    }

    #[test]
    fn catch_sees_fail_only() {
        let recover = |_| PValue::<u32, String>::Ok(0);
        assert_eq!(PValue::Fail("bad".to_string()).catch(recover), PValue::Ok(0));
        assert_eq!(PValue::Ok(1).catch(recover), PValue::Ok(1));
        assert_eq!(PValue::Backtrack.catch(recover), PValue::Backtrack);
    }

    #[test]
    fn reify_always_succeeds() {
        let m: PValue<u32, String> = PValue::Backtrack;
        assert_eq!(m.reify(), PValue::Ok(PValue::Backtrack));
    }
}
