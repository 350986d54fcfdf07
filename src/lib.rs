//! RFC6570 URI Templates with the full operator set.
//!
//! Parses templates containing `{...}` expressions, expands them against
//! named variables, and extracts variable bindings back out of a concrete
//! URI matching the template's shape.
//!
//! ```
//! use std::collections::HashMap;
//! use uri_template_full::UriTemplate;
//!
//! let t = UriTemplate::new("http://example.com/search{?q,lang}");
//!
//! let mut vars = HashMap::new();
//! vars.insert("q", "rust");
//! vars.insert("lang", "en");
//! assert_eq!(t.expand(&vars), "http://example.com/search?q=rust&lang=en");
//!
//! let t = UriTemplate::new("http://example.com/{file}");
//! let found = t.extract("http://example.com/test.txt").unwrap();
//! assert_eq!(found["file"], "test.txt");
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::str::FromStr;

use regex::{Regex, escape};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

mod operator;
mod pct;
mod vars;

use operator::Operator;
pub use vars::{Value, Vars};

/// RFC6570 URI Template.
///
/// Any string is a valid template: an unterminated `{` and everything
/// after it is plain literal text. Equality and hashing follow the exact
/// source text.
#[derive(Clone)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
    regex: Option<Regex>,
}
impl fmt::Debug for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self.source)
    }
}
impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
impl PartialEq for UriTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
impl Eq for UriTemplate {}
impl Hash for UriTemplate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}
impl FromStr for UriTemplate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
impl Serialize for UriTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}
impl<'de> Deserialize<'de> for UriTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(&String::deserialize(deserializer)?))
    }
}

#[derive(Debug, Clone)]
enum Part {
    Literal(Range<usize>),
    Expr(Expr),
}

#[derive(Clone)]
struct Expr {
    op: Operator,
    specs: Vec<VarSpec>,
}
impl Expr {
    fn parse(body: &str) -> Self {
        let (op, var_list) = match body.chars().next().and_then(Operator::from_char) {
            Some(op) => (op, &body[1..]),
            None => (Operator::Simple, body),
        };
        Self {
            op,
            specs: var_list.split(',').map(VarSpec::parse).collect(),
        }
    }
    fn to_regex(&self) -> String {
        match self.op {
            // approximates one unreserved or percent-escaped run
            Operator::Simple => format!("([%{}]+)", pct::RE_UNRESERVED),
            _ => "(.*)".to_string(),
        }
    }
    fn expand(&self, vars: &impl Vars, out: &mut String) {
        let mut first = true;
        for spec in &self.specs {
            let Some(value) = vars.var(&spec.name) else {
                continue;
            };
            let Some(rendered) = self.op.render(spec, &value) else {
                continue;
            };
            if first {
                out.push_str(self.op.prefix());
                first = false;
            } else {
                out.push_str(self.op.joiner());
            }
            out.push_str(&rendered);
        }
    }
}
impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}", self.op)?;
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&spec.name)?;
            if let Some(n) = spec.prefix_len {
                write!(f, ":{n}")?;
            }
            if spec.explode {
                f.write_str("*")?;
            }
        }
        f.write_str("}")
    }
}

/// One `name[*][:N]` entry of an expression's variable list.
#[derive(Debug, Clone)]
pub(crate) struct VarSpec {
    pub(crate) name: String,
    pub(crate) explode: bool,
    pub(crate) prefix_len: Option<usize>,
}
impl VarSpec {
    fn parse(s: &str) -> Self {
        let (s, explode) = match s.strip_suffix('*') {
            Some(s) => (s, true),
            None => (s, false),
        };
        let (name, prefix_len) = match s.split_once(':') {
            // an unparseable length leaves the prefix unset
            Some((name, len)) => (name, len.parse().ok()),
            None => (s, None),
        };
        Self {
            name: name.to_string(),
            explode,
            prefix_len,
        }
    }
}

impl UriTemplate {
    /// Parses `s`. Never fails; malformed brace sequences degrade to
    /// literal text.
    pub fn new(s: &str) -> Self {
        let mut parts = Vec::new();
        let mut pos = 0;
        while let Some(open) = s[pos..].find('{') {
            let open = pos + open;
            let Some(close) = s[open..].find('}') else {
                break;
            };
            let close = open + close;
            if open > pos {
                parts.push(Part::Literal(pos..open));
            }
            parts.push(Part::Expr(Expr::parse(&s[open + 1..close])));
            pos = close + 1;
        }
        if pos < s.len() {
            parts.push(Part::Literal(pos..s.len()));
        }
        let regex = build_regex(s, &parts);
        Self {
            source: s.to_string(),
            parts,
            regex,
        }
    }

    /// The template text this value was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Every variable name referenced by every expression, in template
    /// order, duplicates included.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Expr(expr) => Some(expr.specs.iter().map(|spec| spec.name.as_str())),
                Part::Literal(_) => None,
            })
            .flatten()
    }

    /// Expands the template against `vars`. Total: unbound variables are
    /// omitted, literal text passes through unmodified.
    pub fn expand(&self, vars: impl Vars) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(range) => out.push_str(&self.source[range.clone()]),
                Part::Expr(expr) => expr.expand(&vars, &mut out),
            }
        }
        out
    }

    /// Best-effort inverse of [`expand`](Self::expand): matches `candidate`
    /// against the whole template and recovers a percent-decoded binding
    /// per variable. `None` on structural mismatch.
    ///
    /// Each expression matches as a single wildcard, so a marked
    /// expression's capture keeps the operator's prefix text (for
    /// `/s{?q}` and `/s?q=rust`, `q` binds to `?q=rust`). Variable names
    /// are zipped positionally against the per-expression captures: a
    /// repeated name keeps its last capture, and names past the first in
    /// a multi-variable expression go unbound. Both are known limitations
    /// of the positional scheme.
    pub fn extract(&self, candidate: &str) -> Option<HashMap<String, String>> {
        let regex = self.regex.as_ref()?;
        let captures = regex.captures(candidate)?;
        let mut found = HashMap::new();
        for (i, name) in self.variables().enumerate() {
            let Some(m) = captures.get(i + 1) else {
                break;
            };
            found.insert(name.to_string(), pct::decode(m.as_str())?);
        }
        Some(found)
    }
}

fn build_regex(source: &str, parts: &[Part]) -> Option<Regex> {
    let mut re = String::from("^");
    for part in parts {
        match part {
            Part::Literal(range) => re.push_str(&escape(&source[range.clone()])),
            Part::Expr(expr) => re.push_str(&expr.to_regex()),
        }
    }
    re.push('$');
    // literals are escaped and both group forms are fixed, so this compiles
    // for every template; a failure still degrades to "no match"
    Regex::new(&re).ok()
}
