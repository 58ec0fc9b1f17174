#[cfg(test)]
mod tests {
    use crate::matcher::*;
    use crate::value::Value;

    #[test]
    fn test_exact_string_match() {
        assert!(Matcher::matches(&"hello", &Value::from("hello")));
        assert!(!Matcher::matches(&"hello", &Value::from("world")));
    }

    #[test]
    fn test_exact_match_rejects_other_kinds() {
        // An i32 matcher never matches an I64 candidate, even when the
        // numeric value agrees.
        assert!(5i32.matches(&Value::I32(5)));
        assert!(!5i32.matches(&Value::I64(5)));
        assert!(!5i32.matches(&Value::U32(5)));
        assert!(!Matcher::matches(&"5", &Value::I32(5)));
    }

    #[test]
    fn test_exact_match_each_width() {
        assert!(1i8.matches(&Value::I8(1)));
        assert!(1i16.matches(&Value::I16(1)));
        assert!(1i64.matches(&Value::I64(1)));
        assert!(1u8.matches(&Value::U8(1)));
        assert!(1u16.matches(&Value::U16(1)));
        assert!(1u32.matches(&Value::U32(1)));
        assert!(1u64.matches(&Value::U64(1)));
        assert!(1.5f32.matches(&Value::F32(1.5)));
        assert!(1.5f64.matches(&Value::F64(1.5)));
        assert!(true.matches(&Value::Bool(true)));
        assert!(!false.matches(&Value::Bool(true)));
    }

    #[test]
    fn test_eq_is_kind_checked() {
        assert!(eq(5i32).matches(&Value::I32(5)));
        assert!(!eq(5i32).matches(&Value::I64(5)));
        assert!(!eq(5i32).matches(&Value::I32(6)));
        assert!(eq("bob").matches(&Value::from("bob")));
        assert!(!eq("bob").matches(&Value::from("alice")));
    }

    #[test]
    fn test_eq_on_compound_values() {
        let list = Value::from(vec![1i64, 2, 3]);
        assert!(eq(vec![1i64, 2, 3]).matches(&list));
        assert!(!eq(vec![1i64, 2]).matches(&list));
    }

    #[test]
    fn test_wildcard_matches_everything() {
        assert!(any().matches(&Value::Unit));
        assert!(any().matches(&Value::from("x")));
        assert!(any().matches(&Value::None));
        assert!(any().matches(&Value::F64(0.0)));
    }

    #[test]
    fn test_optional_absent_vs_absent() {
        assert!(none().matches(&Value::None));
        assert!(!none().matches(&Value::Some(Box::new(Value::I32(1)))));
    }

    #[test]
    fn test_optional_present_uses_inner() {
        let m = some(eq(7i64));
        assert!(m.matches(&Value::Some(Box::new(Value::I64(7)))));
        assert!(!m.matches(&Value::Some(Box::new(Value::I64(8)))));
        assert!(!m.matches(&Value::None));
    }

    #[test]
    fn test_optional_never_matches_bare_value() {
        // A present-value candidate must be wrapped; a bare I64 is a
        // different kind.
        assert!(!some(eq(7i64)).matches(&Value::I64(7)));
        assert!(!none().matches(&Value::Unit));
    }

    #[test]
    fn test_prefix_fewer_matchers_than_args() {
        let matchers: Vec<Box<dyn Matcher>> = vec![Box::new(eq("a"))];
        assert!(matches_prefix(
            &matchers,
            &[Value::from("a"), Value::I64(99)]
        ));
        assert!(!matches_prefix(
            &matchers,
            &[Value::from("b"), Value::I64(99)]
        ));
    }

    #[test]
    fn test_prefix_fewer_args_than_matchers() {
        let matchers: Vec<Box<dyn Matcher>> =
            vec![Box::new(eq("a")), Box::new(eq(1i64))];
        // Only the overlapping prefix is compared.
        assert!(matches_prefix(&matchers, &[Value::from("a")]));
        assert!(matches_prefix(&matchers, &[]));
    }

    #[test]
    fn test_value_same_kind() {
        assert!(Value::I32(1).same_kind(&Value::I32(2)));
        assert!(!Value::I32(1).same_kind(&Value::I64(1)));
        assert!(!Value::None.same_kind(&Value::Some(Box::new(Value::Unit))));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("hi").to_string(), "\"hi\"");
        assert_eq!(Value::from(vec![1i64, 2]).to_string(), "[1, 2]");
        assert_eq!(
            Value::Some(Box::new(Value::Bool(true))).to_string(),
            "Some(true)"
        );
        assert_eq!(Value::Unit.to_string(), "()");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::I16(3).as_i64(), Some(3));
        assert_eq!(Value::U8(3).as_u64(), Some(3));
        assert_eq!(Value::F32(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("s").as_str(), Some("s"));
        assert_eq!(Value::Bool(true).as_i64(), None);
    }

    #[test]
    fn test_from_option_round_trip() {
        assert_eq!(Value::from(Option::<i64>::None), Value::None);
        assert_eq!(
            Value::from(Some(2i64)),
            Value::Some(Box::new(Value::I64(2)))
        );
    }
}
