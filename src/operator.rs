use parse_display::Display;

use crate::VarSpec;
use crate::pct;
use crate::vars::Value;

/// One RFC6570 expansion strategy, selected by the marker character that
/// may lead an expression. `Simple` is the unmarked default.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    #[display("")]
    Simple,
    /// `+`
    #[display("+")]
    Reserved,
    /// `#`
    #[display("#")]
    Fragment,
    /// `.`
    #[display(".")]
    Label,
    /// `/`
    #[display("/")]
    PathSegment,
    /// `;`
    #[display(";")]
    PathStyle,
    /// `?`
    #[display("?")]
    FormQuery,
    /// `&`
    #[display("&")]
    FormContinuation,
}

impl Operator {
    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Reserved),
            '#' => Some(Self::Fragment),
            '.' => Some(Self::Label),
            '/' => Some(Self::PathSegment),
            ';' => Some(Self::PathStyle),
            '?' => Some(Self::FormQuery),
            '&' => Some(Self::FormContinuation),
            _ => None,
        }
    }

    /// Prepended to the whole expression when at least one variable
    /// contributes.
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            Self::Simple | Self::Reserved => "",
            Self::Fragment => "#",
            Self::Label => ".",
            Self::PathSegment => "/",
            Self::PathStyle => ";",
            Self::FormQuery => "?",
            Self::FormContinuation => "&",
        }
    }

    /// Placed between contributions within one expression, and between
    /// exploded elements of one composite value.
    pub(crate) fn joiner(self) -> &'static str {
        match self {
            Self::Simple | Self::Reserved | Self::Fragment => ",",
            Self::Label => ".",
            Self::PathSegment => "/",
            Self::PathStyle => ";",
            Self::FormQuery | Self::FormContinuation => "&",
        }
    }

    /// Whether contributions echo `name=`.
    fn named(self) -> bool {
        matches!(self, Self::PathStyle | Self::FormQuery | Self::FormContinuation)
    }

    /// Whether reserved characters and percent triplets pass through
    /// unencoded.
    fn allow_reserved(self) -> bool {
        matches!(self, Self::Reserved | Self::Fragment)
    }

    fn encode(self, s: &str, out: &mut String) {
        if self.allow_reserved() {
            pct::encode_reserved(s, out);
        } else {
            pct::encode_unreserved(s, out);
        }
    }

    /// Renders one variable's contribution, `None` when the value renders
    /// as undefined (empty lists and assocs). An empty string is a defined
    /// contribution, distinct from `None`.
    pub(crate) fn render(self, spec: &VarSpec, value: &Value) -> Option<String> {
        match value {
            Value::Scalar(s) => Some(self.render_scalar(spec, s)),
            Value::List(items) => self.render_list(spec, items),
            Value::Assoc(pairs) => self.render_assoc(spec, pairs),
        }
    }

    fn render_scalar(self, spec: &VarSpec, value: &str) -> String {
        let value = truncate(value, spec.prefix_len);
        let mut out = String::new();
        if self.named() {
            out.push_str(&spec.name);
            if value.is_empty() && self == Self::PathStyle {
                return out;
            }
            out.push('=');
        }
        self.encode(value, &mut out);
        out
    }

    fn render_list(self, spec: &VarSpec, items: &[String]) -> Option<String> {
        if items.is_empty() {
            return None;
        }
        let mut out = String::new();
        if spec.explode {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(self.joiner());
                }
                if self.named() {
                    out.push_str(&spec.name);
                    if item.is_empty() && self == Self::PathStyle {
                        continue;
                    }
                    out.push('=');
                }
                self.encode(item, &mut out);
            }
        } else {
            if self.named() {
                out.push_str(&spec.name);
                out.push('=');
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.encode(item, &mut out);
            }
        }
        Some(out)
    }

    fn render_assoc(self, spec: &VarSpec, pairs: &[(String, String)]) -> Option<String> {
        if pairs.is_empty() {
            return None;
        }
        let mut out = String::new();
        if spec.explode {
            // exploded pairs render as key=value for every operator
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(self.joiner());
                }
                self.encode(k, &mut out);
                out.push('=');
                self.encode(v, &mut out);
            }
        } else {
            if self.named() {
                out.push_str(&spec.name);
                out.push('=');
            }
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.encode(k, &mut out);
                out.push(',');
                self.encode(v, &mut out);
            }
        }
        Some(out)
    }
}

/// Truncates to the first `len` characters when the value is strictly
/// longer. Applied before encoding, scalars only.
fn truncate(value: &str, len: Option<usize>) -> &str {
    match len {
        Some(n) => match value.char_indices().nth(n) {
            Some((i, _)) => &value[..i],
            None => value,
        },
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lookup() {
        assert_eq!(Operator::from_char('+'), Some(Operator::Reserved));
        assert_eq!(Operator::from_char('#'), Some(Operator::Fragment));
        assert_eq!(Operator::from_char('.'), Some(Operator::Label));
        assert_eq!(Operator::from_char('/'), Some(Operator::PathSegment));
        assert_eq!(Operator::from_char(';'), Some(Operator::PathStyle));
        assert_eq!(Operator::from_char('?'), Some(Operator::FormQuery));
        assert_eq!(Operator::from_char('&'), Some(Operator::FormContinuation));
        assert_eq!(Operator::from_char('a'), None);
        assert_eq!(Operator::from_char('='), None);
    }

    #[test]
    fn truncate_chars() {
        assert_eq!(truncate("value", Some(3)), "val");
        assert_eq!(truncate("value", Some(30)), "value");
        assert_eq!(truncate("value", Some(5)), "value");
        assert_eq!(truncate("value", None), "value");
        assert_eq!(truncate("あいう", Some(2)), "あい"); // chars, not bytes
        assert_eq!(truncate("value", Some(0)), "");
    }

    #[test]
    fn empty_composites_render_as_undefined() {
        let spec = VarSpec {
            name: "list".to_string(),
            explode: true,
            prefix_len: None,
        };
        for op in [
            Operator::Simple,
            Operator::Reserved,
            Operator::Fragment,
            Operator::Label,
            Operator::PathSegment,
            Operator::PathStyle,
            Operator::FormQuery,
            Operator::FormContinuation,
        ] {
            assert_eq!(op.render(&spec, &Value::List(Vec::new())), None, "{op:?}");
            assert_eq!(op.render(&spec, &Value::Assoc(Vec::new())), None, "{op:?}");
        }
    }
}
