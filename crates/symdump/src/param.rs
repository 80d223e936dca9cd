//! Parameter rendering.
//!
//! A `ParamSpec` renders the way the parameter would be written in a PHP
//! signature: `[type ][&][...]$name[ = default]`. Defaults are rendered once, at
//! construction, following `var_export` conventions so the output can be pasted
//! back into source.

use std::fmt::{self, Write};

use itertools::Itertools;

use crate::reflection::{DefaultValue, ParamInfo};

/// One parameter of a described callable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ParamSpec {
    /// Name without the leading `$`.
    pub name: String,
    pub type_hint: Option<String>,
    pub by_ref: bool,
    /// Rendered default value, e.g. `1234`, `'string'`, `array(...)`.
    pub default: Option<String>,
    pub variadic: bool,
}

impl From<&ParamInfo> for ParamSpec {
    fn from(param: &ParamInfo) -> Self {
        Self {
            name: param.name.trim_start_matches('$').to_owned(),
            type_hint: param.type_hint.clone().filter(|hint| !hint.is_empty()),
            by_ref: param.by_ref,
            // variadics can't carry a default in PHP
            default: if param.variadic {
                None
            } else {
                param.default.as_ref().map(ToString::to_string)
            },
            variadic: param.variadic,
        }
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(hint) = &self.type_hint {
            write!(f, "{hint} ")?;
        }
        if self.by_ref {
            f.write_char('&')?;
        }
        if self.variadic {
            f.write_str("...")?;
        }
        write!(f, "${}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// Joins rendered parameters with `, `.
#[must_use]
pub fn render_params(params: &[ParamSpec]) -> String {
    params.iter().join(", ")
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => float_repr(*v, f),
            Self::String(s) => string_repr(s, f),
            Self::Array(0) => f.write_str("array()"),
            Self::Array(_) => f.write_str("array(...)"),
            Self::Constant(name) => f.write_str(name),
        }
    }
}

/// Writes a float like `var_export`: integral values keep a `.0` suffix, and
/// magnitudes outside `[1e-4, 1e15)` use exponent form (`1.0E+15`, `1.5E-7`).
fn float_repr(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NAN");
    }
    if value.is_infinite() {
        return f.write_str(if value.is_sign_positive() { "INF" } else { "-INF" });
    }
    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        return exponent_repr(value, f);
    }
    if value.fract() == 0.0 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

fn exponent_repr(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let shortest = format!("{value:e}");
    let (mantissa, exponent) = shortest.split_once('e').unwrap_or((shortest.as_str(), "0"));
    f.write_str(mantissa)?;
    if !mantissa.contains('.') {
        f.write_str(".0")?;
    }
    match exponent.strip_prefix('-') {
        Some(digits) => write!(f, "E-{digits}"),
        None => write!(f, "E+{exponent}"),
    }
}

/// Writes a single-quoted PHP string literal, escaping `\` and `'`.
fn string_repr(value: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_char('\'')?;
    for c in value.chars() {
        if matches!(c, '\\' | '\'') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('\'')
}
