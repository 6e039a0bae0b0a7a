//! A single data line split into tokens.

use serde::Serialize;

/// One validated data line of a section.
///
/// `args` and `nums` are parallel: `nums[i]` is `args[i]` parsed as a
/// float, or `None` when the token is not a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub line: String,
    pub args: Vec<String>,
    pub nums: Vec<Option<f32>>,
}

impl Record {
    /// Tokenize a trimmed data line.
    pub fn parse(line: &str) -> Self {
        let args: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        let nums = args.iter().map(|arg| parse_number(arg)).collect();
        Self {
            line: line.to_owned(),
            args,
            nums,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// String token at `index`, or `""` when out of range.
    #[inline]
    pub fn arg(&self, index: usize) -> &str {
        self.args.get(index).map_or("", String::as_str)
    }

    /// Numeric token at `index`; `None` if absent or not numeric.
    #[inline]
    pub fn num(&self, index: usize) -> Option<f32> {
        self.nums.get(index).copied().flatten()
    }

    /// Whether any token from `start` on equals `flag`.
    pub fn has_flag(&self, start: usize, flag: &str) -> bool {
        self.args.iter().skip(start).any(|arg| arg == flag)
    }

    /// Model index stored in token 1, truncated toward zero like an int cast.
    pub fn model_index(&self) -> Option<i32> {
        self.num(1).map(|v| v as i32)
    }

    /// Whether this record is keyed to (`map`, `model_index`, `target_name`).
    ///
    /// The map must match exactly, then either the stored model index
    /// equals `model_index` or the stored target name equals a non-empty
    /// `target_name`.
    pub fn matches_key(&self, map: &str, model_index: i32, target_name: &str) -> bool {
        if self.arg(0) != map {
            return false;
        }
        if self.model_index() == Some(model_index) {
            return true;
        }
        let stored_target = self.arg(1);
        !stored_target.is_empty() && stored_target == target_name
    }
}

/// Strict float parse; NaN is treated as "not a number".
fn parse_number(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|v| !v.is_nan())
}
