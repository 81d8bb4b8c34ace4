use super::CompiledPattern;

use std::cmp::Ordering;

/// Orders patterns from most to least specific.
///
/// `Less` means `lhs` is tried before `rhs`. Deeper templates come first,
/// then templates without a wildcard, then templates with fewer parameters,
/// then templates whose first parameter starts further to the right.
/// Patterns comparing `Equal` keep their registration order.
pub fn specificity(lhs: &CompiledPattern, rhs: &CompiledPattern) -> Ordering {
    rhs.depth
        .cmp(&lhs.depth)
        .then_with(|| lhs.wildcard.cmp(&rhs.wildcard))
        .then_with(|| lhs.params.len().cmp(&rhs.params.len()))
        .then_with(|| rhs.first_param.cmp(&lhs.first_param))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(t: &str) -> CompiledPattern {
        CompiledPattern::compile(t).unwrap()
    }

    #[test]
    fn deeper_first() {
        assert_eq!(specificity(&p("/a/b"), &p("/a")), Ordering::Less);
        assert_eq!(specificity(&p("/{x}/{y}"), &p("/a")), Ordering::Less);
    }

    #[test]
    fn literal_before_param() {
        assert_eq!(specificity(&p("/api/flow"), &p("/api/{prm}")), Ordering::Less);
        assert_eq!(
            specificity(&p("/api/inner/{prm}"), &p("/api/inner/flow")),
            Ordering::Greater
        );
    }

    #[test]
    fn later_param_first() {
        assert_eq!(
            specificity(&p("/a/{x}/c"), &p("/{x}/b/c")),
            Ordering::Less
        );
    }

    #[test]
    fn wildcard_last() {
        assert_eq!(specificity(&p("/s/{*}"), &p("/s/{x}")), Ordering::Greater);
        assert_eq!(specificity(&p("/s/{*}"), &p("/s/a")), Ordering::Greater);
    }

    #[test]
    fn ties() {
        assert_eq!(specificity(&p("/a"), &p("/b")), Ordering::Equal);
        assert_eq!(specificity(&p("/a/{x}"), &p("/b/{y}")), Ordering::Equal);
    }
}
