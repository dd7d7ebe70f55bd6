/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```should_panic
/// # use bandit_sim::assert_interval;
/// let value = 2.0;
/// assert_interval!(value, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`value\`. Must be in the interval \[0.0, 1.0\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}

/// Index of the first maximal value
///
/// Later values only win when strictly greater, so ties resolve to list order. `NaN` never wins.
/// Returns `None` for an empty iterator.
pub(crate) fn argmax_first<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, x) in values.into_iter().enumerate() {
        match best {
            Some((_, b)) if x > b => best = Some((i, x)),
            Some(_) => {}
            None if x.is_nan() => {}
            None => best = Some((i, x)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_first_breaks_ties_by_order() {
        assert_eq!(argmax_first([1.0, 3.0, 2.0, 3.0]), Some(1));
        assert_eq!(argmax_first([0.0, 0.0, 0.0]), Some(0));
        assert_eq!(argmax_first(std::iter::empty()), None);
    }

    #[test]
    fn argmax_first_skips_nan() {
        assert_eq!(argmax_first([f64::NAN, -1.0, f64::NAN]), Some(1));
        assert_eq!(argmax_first([f64::NAN]), None);
    }

    #[test]
    #[should_panic(expected = "Must be in the interval [0, 1]")]
    fn assert_interval_panics_outside() {
        let epsilon = 1.5;
        assert_interval!(epsilon, 0.0, 1.0);
    }
}
