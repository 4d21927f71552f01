//! Unit tests for tagged_value components

mod test_value;
