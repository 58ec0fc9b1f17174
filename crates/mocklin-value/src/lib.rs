pub mod matcher;
#[cfg(test)]
mod tests;
pub mod value;

pub use matcher::{any, eq, matches_prefix, none, some, Equals, Matcher, Wildcard};
pub use value::Value;
