//! Conversion of text tokens into numbers.
//!
//! Parsing uses the standard library's `FromStr` implementations, which are
//! locale independent and correctly rounded. Surrounding whitespace is not
//! trimmed.

use crate::error::CoercionError;

/// Parses a base-10 integer, with an optional leading sign.
pub fn coerce_int(text: &str) -> Result<i64, CoercionError> {
    if text.is_empty() {
        return Err(CoercionError::Empty);
    }
    text.parse::<i64>().map_err(|e| CoercionError::InvalidInt {
        token: text.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses a decimal floating-point number.
///
/// Tokens such as `inf`, `NaN` or `1e400` parse but are rejected with
/// [`CoercionError::NonFinite`]; the output format has no encoding for them.
pub fn coerce_float(text: &str) -> Result<f64, CoercionError> {
    if text.is_empty() {
        return Err(CoercionError::Empty);
    }
    let value = text
        .parse::<f64>()
        .map_err(|e| CoercionError::InvalidFloat {
            token: text.to_owned(),
            reason: e.to_string(),
        })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoercionError::NonFinite(text.to_owned()))
    }
}

/// Result of coercing a fixed-length array of float tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentCoercion<const N: usize> {
    /// Parsed values; components that failed are left at `0.0`.
    pub values: [f64; N],
    /// Failed components by index, in ascending order.
    pub errors: Vec<(usize, CoercionError)>,
    /// Number of tokens beyond `N` that were ignored.
    pub extra: usize,
}

impl<const N: usize> ComponentCoercion<N> {
    /// Returns true if every component parsed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Coerces the first `N` tokens, one component at a time.
///
/// A failure on one component never stops the others. Absent tokens are
/// reported as [`CoercionError::Missing`].
pub fn coerce_components<const N: usize>(tokens: &[String]) -> ComponentCoercion<N> {
    let mut values = [0.0; N];
    let mut errors = Vec::new();

    for (index, slot) in values.iter_mut().enumerate() {
        let Some(token) = tokens.get(index) else {
            errors.push((
                index,
                CoercionError::Missing {
                    index,
                    len: tokens.len(),
                },
            ));
            continue;
        };
        match coerce_float(token) {
            Ok(v) => *slot = v,
            Err(e) => errors.push((index, e)),
        }
    }

    ComponentCoercion {
        values,
        errors,
        extra: tokens.len().saturating_sub(N),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int("42"), Ok(42));
        assert_eq!(coerce_int("-7"), Ok(-7));
        assert_eq!(coerce_int("+7"), Ok(7));
        assert_eq!(coerce_int("007"), Ok(7));
        assert_eq!(coerce_int(""), Err(CoercionError::Empty));
        assert!(matches!(
            coerce_int("abc"),
            Err(CoercionError::InvalidInt { .. })
        ));
        assert!(coerce_int("4.0").is_err());
        assert!(coerce_int(" 4").is_err());
        assert!(coerce_int("99999999999999999999").is_err());
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_float("1"), Ok(1.0));
        assert_eq!(coerce_float("-0.25"), Ok(-0.25));
        assert_eq!(coerce_float("2e-3"), Ok(0.002));
        assert_eq!(coerce_float("1E2"), Ok(100.0));
        assert_eq!(coerce_float(".5"), Ok(0.5));
        assert_eq!(coerce_float(""), Err(CoercionError::Empty));
        assert!(matches!(
            coerce_float("x1"),
            Err(CoercionError::InvalidFloat { .. })
        ));
        assert!(coerce_float("1,5").is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        for token in ["inf", "-inf", "NaN", "infinity", "1e400"] {
            assert_eq!(
                coerce_float(token),
                Err(CoercionError::NonFinite(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn test_components_partial_failure() {
        let result = coerce_components::<3>(&tokens(&["1", "oops", "3"]));
        assert_eq!(result.values, [1.0, 0.0, 3.0]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, 1);
        assert!(!result.is_complete());
        assert_eq!(result.extra, 0);
    }

    #[test]
    fn test_components_short_and_long() {
        let short = coerce_components::<3>(&tokens(&["1"]));
        assert_eq!(short.values, [1.0, 0.0, 0.0]);
        assert_eq!(
            short.errors,
            vec![
                (1, CoercionError::Missing { index: 1, len: 1 }),
                (2, CoercionError::Missing { index: 2, len: 1 }),
            ]
        );

        let long = coerce_components::<3>(&tokens(&["1", "2", "3", "4", "5"]));
        assert!(long.is_complete());
        assert_eq!(long.values, [1.0, 2.0, 3.0]);
        assert_eq!(long.extra, 2);
    }

    proptest! {
        #[test]
        fn prop_int_matches_display(n in any::<i64>()) {
            prop_assert_eq!(coerce_int(&n.to_string()), Ok(n));
        }

        #[test]
        fn prop_float_round_trips_exactly(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
            let parsed = coerce_float(&x.to_string()).unwrap();
            prop_assert_eq!(parsed.to_bits(), x.to_bits());
        }

        #[test]
        fn prop_float_exponent_form(x in -1.0e12f64..1.0e12) {
            prop_assert_eq!(coerce_float(&format!("{x:e}")), Ok(x));
        }

        #[test]
        fn prop_alphabetic_tokens_fail(s in "[g-zG-Z]{1,8}") {
            prop_assume!(!s.eq_ignore_ascii_case("inf") && !s.eq_ignore_ascii_case("infinity"));
            prop_assert!(coerce_int(&s).is_err());
            prop_assert!(coerce_float(&s).is_err());
        }
    }
}
