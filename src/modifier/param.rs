//! Modifier parameter grammar: defaults, clamping and UI labels.

/// How a parsed value is constrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamRule {
    /// Taken as written.
    Any,
    /// Clamped into `[min, max]`.
    Clamp(f32, f32),
    /// Raised to at least `min`.
    AtLeast(f32),
    /// Non-positive means unlimited, stored as `-1`.
    Unlimited,
    /// Non-positive becomes `1`.
    Positive,
}

impl ParamRule {
    fn apply(self, value: f32) -> f32 {
        match self {
            Self::Any => value,
            Self::Clamp(min, max) => value.clamp(min, max),
            Self::AtLeast(min) => value.max(min),
            Self::Unlimited if value <= 0.0 => UNLIMITED,
            Self::Positive if value <= 0.0 => 1.0,
            Self::Unlimited | Self::Positive => value,
        }
    }
}

/// Stored value of an unlimited parameter.
pub const UNLIMITED: f32 = -1.0;

/// One positional parameter of a modifier (token 1, 2, ... of its line).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub default: f32,
    pub rule: ParamRule,
    /// Value is truncated toward zero before the rule applies.
    pub integer: bool,
    /// UI label; `{}` is replaced by the value. `None` hides the parameter.
    pub label: Option<&'static str>,
}

impl ParamSpec {
    pub const fn int(default: f32, rule: ParamRule, label: &'static str) -> Self {
        Self {
            default,
            rule,
            integer: true,
            label: Some(label),
        }
    }

    pub const fn float(default: f32, rule: ParamRule, label: &'static str) -> Self {
        Self {
            default,
            rule,
            integer: false,
            label: Some(label),
        }
    }

    /// Parameter that is parsed but never shown.
    pub const fn hidden(self) -> Self {
        Self { label: None, ..self }
    }

    /// Resolve a parsed token; `None` (absent or not a number) gives the default.
    pub fn resolve(&self, parsed: Option<f32>) -> f32 {
        let Some(value) = parsed else {
            return self.default;
        };
        let value = if self.integer { value.trunc() } else { value };
        self.rule.apply(value)
    }

    /// UI line for a resolved value, if the parameter is shown.
    pub fn describe(&self, value: f32) -> Option<String> {
        let label = self.label?;
        let shown = if self.rule == ParamRule::Unlimited && value <= 0.0 {
            "Infinite".to_owned()
        } else {
            value.to_string()
        };
        Some(label.replacen("{}", &shown, 1))
    }
}
