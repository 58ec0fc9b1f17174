use crate::value::Value;

/// A predicate over a runtime [`Value`], used for stub resolution and
/// verification filtering.
///
/// Every built-in matcher is kind-checked: a candidate of a different
/// concrete kind yields no-match, never an error. Matching failure is a
/// silent policy, not a fault.
pub trait Matcher {
    fn matches(&self, candidate: &Value) -> bool;
}

macro_rules! impl_exact {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Matcher for $ty {
                fn matches(&self, candidate: &Value) -> bool {
                    match candidate {
                        Value::$variant(v) => v == self,
                        _ => false,
                    }
                }
            }
        )*
    };
}

impl_exact! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
}

impl Matcher for &'static str {
    fn matches(&self, candidate: &Value) -> bool {
        match candidate {
            Value::Str(s) => s == self,
            _ => false,
        }
    }
}

/// Type-checked equality matcher. Captures the expected value (and with it
/// the concrete kind) at construction; a candidate of a different kind
/// never matches, even when numerically equal.
pub struct Equals {
    expected: Value,
}

impl Matcher for Equals {
    fn matches(&self, candidate: &Value) -> bool {
        self.expected.same_kind(candidate) && self.expected == *candidate
    }
}

pub fn eq(expected: impl Into<Value>) -> Equals {
    Equals { expected: expected.into() }
}

/// Matches any value. Useful to skip a position in the middle of an
/// argument list (trailing positions can simply be left without matchers).
pub struct Wildcard;

impl Matcher for Wildcard {
    fn matches(&self, _candidate: &Value) -> bool {
        true
    }
}

pub fn any() -> Wildcard {
    Wildcard
}

/// Optional composition: two absent values match, absent vs present never
/// matches, two present values match iff the inner matcher matches. A
/// non-optional candidate never matches an optional matcher.
impl<M: Matcher> Matcher for Option<M> {
    fn matches(&self, candidate: &Value) -> bool {
        match (self, candidate) {
            (None, Value::None) => true,
            (Some(inner), Value::Some(v)) => inner.matches(v),
            _ => false,
        }
    }
}

pub fn some<M: Matcher>(inner: M) -> Option<M> {
    Some(inner)
}

pub fn none() -> Option<Wildcard> {
    None
}

/// Positional-prefix rule: matchers are zipped pairwise with arguments and
/// the shorter side bounds the comparison. Fewer matchers than arguments
/// leaves the tail unconstrained; fewer arguments than matchers compares
/// only the overlapping prefix.
pub fn matches_prefix(matchers: &[Box<dyn Matcher>], args: &[Value]) -> bool {
    matchers.iter().zip(args).all(|(m, a)| m.matches(a))
}
