#![cfg(test)]

macro_rules! assert_query {
    ($actual:expr, $expected_text:expr) => {
        assert_eq!($actual.text.as_str(), $expected_text);
        assert!($actual.parameters.is_empty(), "Extra actual parameters");
    };
    ($actual:expr, $expected_text:expr, $(($name:expr, $value:expr)), *) => {
        assert_eq!($actual.text.as_str(), $expected_text);
        let expected: Vec<(&str, $crate::sql::value::ColumnValue)> = vec![$(($name, $value)), *];
        assert_eq!($actual.parameters.len(), expected.len(), "Parameter count mismatch");
        for (name, value) in expected {
            assert_eq!(
                $actual.parameters.get(name),
                Some(&value),
                "Parameter mismatch for {name}"
            );
        }
    };
}
