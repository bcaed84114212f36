use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of axes. Layout and render recurse once per axis.
pub const MAX_RANK: usize = 64;

/// Upper bound on the number of cells. Painting visits every cell once.
pub const MAX_ELEMENTS: u128 = 1 << 16;

/// Splits `text` on whitespace and parses every token as a non-negative integer.
///
/// Tokens must consist of ASCII digits only: no sign, no decimal point, no trailing garbage.
/// Empty input yields an empty vector; use [`Shape::new`] to reject it.
pub fn parse_dims(text: &str) -> Result<Vec<usize>> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| parse_token(token, index))
        .collect()
}

fn parse_token(token: &str, index: usize) -> Result<usize> {
    let invalid = || Error::InvalidShape {
        token: token.to_string(),
        index,
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // Digit-only input can still overflow.
    token.parse::<usize>().map_err(|_| invalid())
}

/// A validated array shape: at least one axis, every extent at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::DegenerateShape {
                reason: "shape has no dimensions".to_string(),
            });
        }
        if dims.len() > MAX_RANK {
            return Err(Error::TooManyDimensions {
                rank: dims.len(),
                max: MAX_RANK,
            });
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(Error::DegenerateShape {
                reason: format!("dimension {axis} has zero length"),
            });
        }
        match checked_element_count(&dims) {
            Some(count) if count <= MAX_ELEMENTS => Ok(Self(dims)),
            _ => Err(Error::TooManyElements { max: MAX_ELEMENTS }),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let shape = Self::new(parse_dims(text)?)?;
        tracing::debug!(shape = %shape, "parsed shape");
        Ok(shape)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Number of cells; at most [`MAX_ELEMENTS`] for any constructed shape.
    pub fn element_count(&self) -> u128 {
        checked_element_count(&self.0).unwrap_or(u128::MAX)
    }
}

fn checked_element_count(dims: &[usize]) -> Option<u128> {
    dims.iter()
        .try_fold(1u128, |acc, &d| acc.checked_mul(d as u128))
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = Error;

    fn try_from(value: Vec<usize>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Shape> for Vec<usize> {
    fn from(value: Shape) -> Self {
        value.0
    }
}

impl std::str::FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for d in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{d}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_tokens() {
        assert_eq!(parse_dims("3 4 5").unwrap(), vec![3, 4, 5]);
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(parse_dims("  3   4 ").unwrap(), vec![3, 4]);
        assert_eq!(parse_dims("2\t\n7").unwrap(), vec![2, 7]);
    }

    #[test]
    fn rejects_non_digit_tokens() {
        let err = parse_dims("3 x 5").unwrap_err();
        match err {
            Error::InvalidShape { token, index } => {
                assert_eq!(token, "x");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_signs_decimals_and_suffixes() {
        for text in ["-3", "+3", "3.0", "3px", "0x10", "٣"] {
            assert!(
                matches!(parse_dims(text), Err(Error::InvalidShape { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflowing_tokens() {
        let text = "99999999999999999999999999999999";
        assert!(matches!(parse_dims(text), Err(Error::InvalidShape { .. })));
    }

    #[test]
    fn empty_input_parses_to_no_dims() {
        assert!(parse_dims("   ").unwrap().is_empty());
        assert!(matches!(
            Shape::parse(""),
            Err(Error::DegenerateShape { .. })
        ));
    }

    #[test]
    fn zero_extent_is_degenerate() {
        let err = Shape::parse("2 0 3").unwrap_err();
        assert!(err.to_string().contains("dimension 1"));
    }

    #[test]
    fn rank_is_bounded() {
        let dims = vec![1; MAX_RANK + 1];
        assert!(matches!(
            Shape::new(dims),
            Err(Error::TooManyDimensions { rank, .. }) if rank == MAX_RANK + 1
        ));
        assert!(Shape::new(vec![1; MAX_RANK]).is_ok());
    }

    #[test]
    fn element_count_is_bounded() {
        assert!(matches!(
            Shape::new(vec![2; 40]),
            Err(Error::TooManyElements { .. })
        ));
        assert!(matches!(
            Shape::parse("100000000000"),
            Err(Error::TooManyElements { .. })
        ));
        assert!(matches!(
            Shape::parse("18446744073709551615 18446744073709551615 4"),
            Err(Error::TooManyElements { .. })
        ));

        let at_limit = Shape::new(vec![256, 256]).unwrap();
        assert_eq!(at_limit.element_count(), MAX_ELEMENTS);
        assert!(Shape::new(vec![256, 257]).is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let shape = Shape::parse(" 2  3 4").unwrap();
        assert_eq!(shape.to_string(), "2 3 4");
        assert_eq!(shape.to_string().parse::<Shape>().unwrap(), shape);
        assert_eq!(shape.element_count(), 24);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Shape = serde_json::from_str("[2,3]").unwrap();
        assert_eq!(ok.dims(), &[2, 3]);
        assert!(serde_json::from_str::<Shape>("[2,0]").is_err());
        assert!(serde_json::from_str::<Shape>("[]").is_err());
    }
}
