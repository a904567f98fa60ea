//! NumericRange handling for array reads (OPC UA Part 4 Section 7.22).
//!
//! Only one-dimensional ranges are supported: `"n"` or `"lo:hi"` with
//! `lo < hi`. Multi-dimensional ranges are rejected as invalid.

use shared_types::{StatusCode, Variant};

/// A parsed one-dimensional index range, bounds inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumericRange {
    low: usize,
    high: usize,
}

impl NumericRange {
    /// Parse `"n"` or `"lo:hi"`.
    pub fn parse(text: &str) -> Result<Self, StatusCode> {
        if text.contains(',') {
            return Err(StatusCode::BAD_INDEX_RANGE_INVALID);
        }

        let bound = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| StatusCode::BAD_INDEX_RANGE_INVALID)
        };

        match text.split_once(':') {
            None => {
                let index = bound(text)?;
                Ok(Self {
                    low: index,
                    high: index,
                })
            }
            Some((low, high)) => {
                let (low, high) = (bound(low)?, bound(high)?);
                if low >= high {
                    return Err(StatusCode::BAD_INDEX_RANGE_INVALID);
                }
                Ok(Self { low, high })
            }
        }
    }

    /// First index.
    pub fn low(&self) -> usize {
        self.low
    }

    /// Last index.
    pub fn high(&self) -> usize {
        self.high
    }

    /// Select the range from an array, string or byte string.
    ///
    /// A range starting past the end yields `BAD_INDEX_RANGE_NO_DATA`; a
    /// range running past the end is truncated. Scalars cannot be indexed.
    pub fn apply(&self, value: &Variant) -> Result<Variant, StatusCode> {
        match value {
            Variant::Array(items) => self.slice(items).map(|s| Variant::Array(s.to_vec())),
            Variant::ByteString(bytes) => self.slice(bytes).map(|s| Variant::ByteString(s.to_vec())),
            Variant::String(text) => {
                let chars: Vec<char> = text.chars().collect();
                self.slice(&chars)
                    .map(|s| Variant::String(s.iter().collect()))
            }
            _ => Err(StatusCode::BAD_INDEX_RANGE_INVALID),
        }
    }

    fn slice<'a, T>(&self, items: &'a [T]) -> Result<&'a [T], StatusCode> {
        if self.low >= items.len() {
            return Err(StatusCode::BAD_INDEX_RANGE_NO_DATA);
        }
        let high = self.high.min(items.len() - 1);
        Ok(&items[self.low..=high])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(NumericRange::parse("3").unwrap().low(), 3);
        let range = NumericRange::parse("1:4").unwrap();
        assert_eq!((range.low(), range.high()), (1, 4));

        for bad in ["", "a", "4:1", "2:2", "1:2,0:1", "-1"] {
            assert_eq!(
                NumericRange::parse(bad),
                Err(StatusCode::BAD_INDEX_RANGE_INVALID),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_apply_array() {
        let value = Variant::from(vec![10i32, 11, 12, 13]);
        let range = NumericRange::parse("1:2").unwrap();
        assert_eq!(range.apply(&value), Ok(Variant::from(vec![11i32, 12])));

        let truncated = NumericRange::parse("2:9").unwrap();
        assert_eq!(truncated.apply(&value), Ok(Variant::from(vec![12i32, 13])));

        let past_end = NumericRange::parse("7").unwrap();
        assert_eq!(past_end.apply(&value), Err(StatusCode::BAD_INDEX_RANGE_NO_DATA));
    }

    #[test]
    fn test_apply_string_and_scalar() {
        let range = NumericRange::parse("0:1").unwrap();
        assert_eq!(range.apply(&Variant::from("pump")), Ok(Variant::from("pu")));
        assert_eq!(
            range.apply(&Variant::Double(1.0)),
            Err(StatusCode::BAD_INDEX_RANGE_INVALID)
        );
    }
}
