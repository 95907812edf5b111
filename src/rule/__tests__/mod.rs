mod partial_test;

use super::Similarity;

pub(crate) fn exact(pattern: &&'static str, token: &&'static str) -> Similarity {
    if pattern == token {
        Similarity::ExactlyEqual
    } else {
        Similarity::Dissimilar
    }
}

/// A predictor that renders a pattern path as the literal token sequence.
pub(crate) fn literally(path: &[&'static str]) -> Vec<Vec<&'static str>> {
    vec![path.to_vec()]
}

pub(crate) type StrRule = super::Rule<
    &'static str,
    &'static str,
    (),
    Vec<&'static str>,
    String,
>;
