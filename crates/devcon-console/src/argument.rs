//! Typed argument schema and binding of raw tokens against it.

use std::fmt;

use devcon_types::error::{DevconError, Result};

/// How a `Filter` argument treats its value list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// The value must be one of the listed values.
    Allow,
    /// The value must not be one of the listed values.
    Deny,
}

/// Declared type of a command argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgType {
    String,
    Int,
    Float,
    Bool,
    /// Integer clamped into `[min, max]` and snapped to `min + k*step`.
    IntRange { min: i64, max: i64, step: i64 },
    /// Float clamped into `[min, max]` and snapped to `min + k*step`.
    FloatRange { min: f64, max: f64, step: f64 },
    /// String checked against a value list.
    Filter { values: Vec<String>, mode: FilterMode },
}

/// A bound, normalized argument value handed to a command.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl ArgType {
    /// Convert a raw token into a value of this type.
    ///
    /// Errors carry a short reason; the caller adds the argument name.
    pub fn normalize(&self, raw: &str) -> std::result::Result<ArgValue, String> {
        match self {
            Self::String => Ok(ArgValue::Str(raw.to_string())),
            Self::Int => parse_int(raw).map(ArgValue::Int),
            Self::Float => parse_float(raw).map(ArgValue::Float),
            Self::Bool => parse_bool(raw).map(ArgValue::Bool),
            Self::IntRange { min, max, step } => {
                let v = parse_int(raw)?.clamp(*min, *max);
                let v = if *step > 0 {
                    // i128 so `v - min` cannot overflow on wide ranges.
                    let offset = (i128::from(v) - i128::from(*min)) / i128::from(*step)
                        * i128::from(*step);
                    i64::try_from(i128::from(*min) + offset).unwrap_or(v)
                } else {
                    v
                };
                Ok(ArgValue::Int(v))
            },
            Self::FloatRange { min, max, step } => {
                let v = parse_float(raw)?.clamp(*min, *max);
                let v = if *step > 0.0 {
                    (min + ((v - min) / step).round() * step).clamp(*min, *max)
                } else {
                    v
                };
                Ok(ArgValue::Float(v))
            },
            Self::Filter { values, mode } => {
                let listed = values.iter().any(|v| v == raw);
                match (mode, listed) {
                    (FilterMode::Allow, true) | (FilterMode::Deny, false) => {
                        Ok(ArgValue::Str(raw.to_string()))
                    },
                    (FilterMode::Allow, false) => Err(format!(
                        "expected one of [{}], got `{raw}`",
                        values.join(", ")
                    )),
                    (FilterMode::Deny, true) => Err(format!("`{raw}` is not allowed")),
                }
            },
        }
    }

    /// Whether `value` has the shape this type produces.
    ///
    /// Used to vet declared defaults at registration time.
    pub fn accepts(&self, value: &ArgValue) -> bool {
        match (self, value) {
            (Self::String, ArgValue::Str(_)) => true,
            (Self::Int, ArgValue::Int(_)) => true,
            (Self::Float, ArgValue::Float(_)) => true,
            (Self::Bool, ArgValue::Bool(_)) => true,
            (Self::IntRange { min, max, .. }, ArgValue::Int(v)) => (min..=max).contains(&v),
            (Self::FloatRange { min, max, .. }, ArgValue::Float(v)) => *min <= *v && *v <= *max,
            (Self::Filter { .. }, ArgValue::Str(s)) => self.normalize(s).is_ok(),
            _ => false,
        }
    }

    /// Check the type's own parameters.
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        match self {
            Self::IntRange { min, max, step } if min > max || *step < 0 => {
                Err(format!("bad int range {min}..{max} step {step}"))
            },
            Self::FloatRange { min, max, step }
                if !(min.is_finite() && max.is_finite() && min <= max && *step >= 0.0) =>
            {
                Err(format!("bad float range {min}..{max} step {step}"))
            },
            Self::Filter { values, .. } if values.is_empty() => {
                Err("filter has no values".to_string())
            },
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bool => f.write_str("bool"),
            Self::IntRange { min, max, step } => write!(f, "int({min}..{max}, step {step})"),
            Self::FloatRange { min, max, step } => {
                write!(f, "float({min}..{max}, step {step})")
            },
            Self::Filter { values, mode } => match mode {
                FilterMode::Allow => write!(f, "{}", values.join("|")),
                FilterMode::Deny => write!(f, "not {}", values.join("|")),
            },
        }
    }
}

fn parse_int(raw: &str) -> std::result::Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("expected an integer, got `{raw}`"))
}

fn parse_float(raw: &str) -> std::result::Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("expected a number, got `{raw}`")),
    }
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("expected a boolean, got `{raw}`")),
    }
}

/// One declared argument of a command.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSpec {
    name: String,
    arg_type: ArgType,
    default: Option<ArgValue>,
    required: bool,
}

impl ArgumentSpec {
    /// A required argument.
    pub fn new(name: impl Into<String>, arg_type: ArgType) -> Self {
        Self {
            name: name.into(),
            arg_type,
            default: None,
            required: true,
        }
    }

    /// Mark the argument optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Make the argument optional with a fallback value.
    pub fn with_default(mut self, value: ArgValue) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_type(&self) -> &ArgType {
        &self.arg_type
    }

    pub fn default(&self) -> Option<&ArgValue> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Usage fragment: `<name:type>` or `[name:type=default]`.
    pub fn usage(&self) -> String {
        match (&self.default, self.required) {
            (_, true) => format!("<{}:{}>", self.name, self.arg_type),
            (Some(d), false) => format!("[{}:{}={d}]", self.name, self.arg_type),
            (None, false) => format!("[{}:{}]", self.name, self.arg_type),
        }
    }
}

/// Bind raw tokens positionally against a schema.
///
/// An empty schema is variadic: every token passes through as a string.
pub fn bind_arguments(
    command: &str,
    specs: &[ArgumentSpec],
    raw: &[String],
) -> Result<Vec<ArgValue>> {
    if specs.is_empty() {
        return Ok(raw.iter().cloned().map(ArgValue::Str).collect());
    }
    if raw.len() > specs.len() {
        return Err(DevconError::MalformedArguments(format!(
            "`{command}` takes at most {} argument(s), got {}",
            specs.len(),
            raw.len()
        )));
    }

    let mut bound = Vec::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        match raw.get(i) {
            Some(token) => {
                let value = spec.arg_type.normalize(token).map_err(|reason| {
                    DevconError::MalformedArguments(format!(
                        "`{command}` argument `{}`: {reason}",
                        spec.name
                    ))
                })?;
                bound.push(value);
            },
            None => match (&spec.default, spec.required) {
                (Some(default), _) => bound.push(default.clone()),
                (None, true) => {
                    return Err(DevconError::MalformedArguments(format!(
                        "`{command}` is missing required argument `{}`",
                        spec.name
                    )));
                },
                (None, false) => {},
            },
        }
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_int() {
        assert_eq!(ArgType::Int.normalize("-42"), Ok(ArgValue::Int(-42)));
        assert_eq!(ArgType::Int.normalize("+7"), Ok(ArgValue::Int(7)));
        assert!(ArgType::Int.normalize("4.2").is_err());
    }

    #[test]
    fn normalize_float_rejects_non_finite() {
        assert_eq!(ArgType::Float.normalize("2.5"), Ok(ArgValue::Float(2.5)));
        assert!(ArgType::Float.normalize("inf").is_err());
        assert!(ArgType::Float.normalize("NaN").is_err());
        assert!(ArgType::Float.normalize("abc").is_err());
    }

    #[test]
    fn normalize_bool_spellings() {
        for raw in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(ArgType::Bool.normalize(raw), Ok(ArgValue::Bool(true)), "{raw}");
        }
        for raw in ["false", "0", "No", "off"] {
            assert_eq!(ArgType::Bool.normalize(raw), Ok(ArgValue::Bool(false)), "{raw}");
        }
        assert!(ArgType::Bool.normalize("maybe").is_err());
    }

    #[test]
    fn int_range_clamps_and_snaps() {
        let ty = ArgType::IntRange {
            min: 0,
            max: 100,
            step: 10,
        };
        assert_eq!(ty.normalize("-5"), Ok(ArgValue::Int(0)));
        assert_eq!(ty.normalize("250"), Ok(ArgValue::Int(100)));
        assert_eq!(ty.normalize("37"), Ok(ArgValue::Int(30)));
    }

    #[test]
    fn int_range_spanning_all_of_i64() {
        let full = ArgType::IntRange {
            min: i64::MIN,
            max: i64::MAX,
            step: 1,
        };
        assert_eq!(full.normalize("9223372036854775807"), Ok(ArgValue::Int(i64::MAX)));
        assert_eq!(full.normalize("-9223372036854775808"), Ok(ArgValue::Int(i64::MIN)));
        assert_eq!(full.normalize("0"), Ok(ArgValue::Int(0)));

        let wide = ArgType::IntRange {
            min: -10,
            max: i64::MAX,
            step: 1,
        };
        assert_eq!(wide.normalize("9223372036854775807"), Ok(ArgValue::Int(i64::MAX)));
        assert_eq!(wide.normalize("-50"), Ok(ArgValue::Int(-10)));

        let coarse = ArgType::IntRange {
            min: -10,
            max: i64::MAX,
            step: 1 << 62,
        };
        match coarse.normalize("9223372036854775807") {
            Ok(ArgValue::Int(v)) => assert!((-10..=i64::MAX).contains(&v)),
            other => panic!("expected an int, got {other:?}"),
        }
    }

    #[test]
    fn int_range_zero_step_only_clamps() {
        let ty = ArgType::IntRange {
            min: 1,
            max: 5,
            step: 0,
        };
        assert_eq!(ty.normalize("3"), Ok(ArgValue::Int(3)));
        assert_eq!(ty.normalize("9"), Ok(ArgValue::Int(5)));
    }

    #[test]
    fn float_range_clamps_and_snaps() {
        let ty = ArgType::FloatRange {
            min: 0.0,
            max: 1.0,
            step: 0.25,
        };
        assert_eq!(ty.normalize("0.3"), Ok(ArgValue::Float(0.25)));
        assert_eq!(ty.normalize("7"), Ok(ArgValue::Float(1.0)));
        assert_eq!(ty.normalize("-1"), Ok(ArgValue::Float(0.0)));
    }

    #[test]
    fn filter_allow_and_deny() {
        let allow = ArgType::Filter {
            values: strings(&["low", "high"]),
            mode: FilterMode::Allow,
        };
        assert_eq!(allow.normalize("low"), Ok(ArgValue::Str("low".into())));
        assert!(allow.normalize("mid").is_err());

        let deny = ArgType::Filter {
            values: strings(&["root"]),
            mode: FilterMode::Deny,
        };
        assert!(deny.normalize("root").is_err());
        assert_eq!(deny.normalize("guest"), Ok(ArgValue::Str("guest".into())));
    }

    #[test]
    fn accepts_checks_kind_and_bounds() {
        let range = ArgType::IntRange {
            min: 0,
            max: 10,
            step: 1,
        };
        assert!(range.accepts(&ArgValue::Int(5)));
        assert!(!range.accepts(&ArgValue::Int(11)));
        assert!(!ArgType::Int.accepts(&ArgValue::Str("1".into())));
        assert!(ArgType::Bool.accepts(&ArgValue::Bool(false)));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let ty = ArgType::IntRange {
            min: 5,
            max: 1,
            step: 1,
        };
        assert!(ty.validate().is_err());
        let empty = ArgType::Filter {
            values: Vec::new(),
            mode: FilterMode::Allow,
        };
        assert!(empty.validate().is_err());
        assert!(ArgType::Float.validate().is_ok());
    }

    #[test]
    fn type_display() {
        assert_eq!(ArgType::Int.to_string(), "int");
        let filter = ArgType::Filter {
            values: strings(&["a", "b"]),
            mode: FilterMode::Allow,
        };
        assert_eq!(filter.to_string(), "a|b");
    }

    #[test]
    fn spec_usage() {
        assert_eq!(ArgumentSpec::new("name", ArgType::String).usage(), "<name:string>");
        assert_eq!(
            ArgumentSpec::new("times", ArgType::Int)
                .with_default(ArgValue::Int(1))
                .usage(),
            "[times:int=1]"
        );
        assert_eq!(
            ArgumentSpec::new("topic", ArgType::String).optional().usage(),
            "[topic:string]"
        );
    }

    #[test]
    fn bind_empty_schema_is_variadic() {
        let bound = bind_arguments("echo", &[], &strings(&["a", "b"])).unwrap();
        assert_eq!(bound, vec![ArgValue::Str("a".into()), ArgValue::Str("b".into())]);
    }

    #[test]
    fn bind_typed_values() {
        let specs = vec![
            ArgumentSpec::new("name", ArgType::String),
            ArgumentSpec::new("times", ArgType::Int),
        ];
        let bound = bind_arguments("greet", &specs, &strings(&["bob", "3"])).unwrap();
        assert_eq!(bound, vec![ArgValue::Str("bob".into()), ArgValue::Int(3)]);
    }

    #[test]
    fn bind_uses_default_for_missing_optional() {
        let specs = vec![
            ArgumentSpec::new("name", ArgType::String),
            ArgumentSpec::new("times", ArgType::Int).with_default(ArgValue::Int(1)),
            ArgumentSpec::new("loud", ArgType::Bool).optional(),
        ];
        let bound = bind_arguments("greet", &specs, &strings(&["bob"])).unwrap();
        assert_eq!(bound, vec![ArgValue::Str("bob".into()), ArgValue::Int(1)]);
    }

    #[test]
    fn bind_missing_required_is_malformed() {
        let specs = vec![ArgumentSpec::new("name", ArgType::String)];
        let err = bind_arguments("greet", &specs, &[]).unwrap_err();
        match err {
            DevconError::MalformedArguments(msg) => assert!(msg.contains("`name`")),
            other => panic!("expected malformed arguments, got {other:?}"),
        }
    }

    #[test]
    fn bind_too_many_is_malformed() {
        let specs = vec![ArgumentSpec::new("name", ArgType::String)];
        let err = bind_arguments("greet", &specs, &strings(&["a", "b"])).unwrap_err();
        assert!(matches!(err, DevconError::MalformedArguments(_)));
    }

    #[test]
    fn bind_bad_type_names_argument() {
        let specs = vec![ArgumentSpec::new("times", ArgType::Int)];
        let err = bind_arguments("repeat", &specs, &strings(&["lots"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("repeat"));
        assert!(msg.contains("times"));
        assert!(msg.contains("lots"));
    }

    #[test]
    fn value_accessors() {
        assert_eq!(ArgValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(ArgValue::Int(3).as_float(), Some(3.0));
        assert_eq!(ArgValue::Bool(true).as_int(), None);
        assert_eq!(ArgValue::Float(0.5).to_string(), "0.5");
    }
}
