// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These cover the key parser with arbitrary input and check that values
//! survive a save and reload.

use proptest::prelude::*;
use xmlcfg::adapters::XmlConfiguration;
use xmlcfg::domain::{
    parse_attribute_name, parse_element_names, ConfigKey, ConfigValue, Configuration,
};

fn element_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Raw values as a caller might pass them: padded, empty, or holding
/// several comma separated items.
fn raw_value() -> impl Strategy<Value = String> {
    "[ ]{0,2}[A-Za-z0-9<>&'\"/:;!?=+, -]{0,12}[ ]{0,2}"
}

/// One write: element path, optional attribute, value, and whether to
/// replace (`set_property`) or append (`add_property`).
fn write_op() -> impl Strategy<Value = (Vec<String>, Option<String>, String, bool)> {
    (
        prop::collection::vec(element_name(), 1..4),
        prop::option::of(element_name()),
        raw_value(),
        any::<bool>(),
    )
}

proptest! {
    #[test]
    fn test_parse_element_names_never_panics(s in "\\PC*") {
        let _ = parse_element_names(Some(&s));
        let _ = parse_attribute_name(Some(&s));
    }
}

proptest! {
    #[test]
    fn test_element_names_have_no_empty_segments(s in "\\PC*") {
        for name in parse_element_names(Some(&s)) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('.'));
        }
    }
}

proptest! {
    #[test]
    fn test_parse_joined_path(
        names in prop::collection::vec(element_name(), 1..6),
        attribute in prop::option::of(element_name()),
    ) {
        let mut key = names.join(".");
        if let Some(attribute) = &attribute {
            key.push_str(&format!("[@{}]", attribute));
        }

        prop_assert_eq!(parse_element_names(Some(&key)), names);
        prop_assert_eq!(parse_attribute_name(Some(&key)), attribute);
    }
}

proptest! {
    #[test]
    fn test_config_key_display_roundtrip(s in "\\PC*") {
        let key = ConfigKey::from(s.clone());
        prop_assert_eq!(key.to_string(), s);
    }
}

proptest! {
    #[test]
    fn test_config_value_as_string_roundtrip(s in "\\PC*") {
        let value = ConfigValue::from(s.clone());
        prop_assert_eq!(value.as_string(), s);
    }
}

proptest! {
    #[test]
    fn test_i64_roundtrip(n in any::<i64>()) {
        let value = ConfigValue::from(n.to_string());
        prop_assert_eq!(value.as_i64("n").unwrap(), n);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn test_save_and_reload_keeps_values(
        ops in prop::collection::vec(write_op(), 1..10),
    ) {
        let mut config = XmlConfiguration::new();
        for (names, attribute, value, replace) in &ops {
            let mut key = names.join(".");
            if let Some(attribute) = attribute {
                key.push_str(&format!("[@{}]", attribute));
            }
            if *replace {
                config.set_property(&key, value);
            } else {
                config.add_property(&key, value);
            }
        }

        let xml = config.to_xml_string().unwrap();
        let reloaded: XmlConfiguration = xml.parse().unwrap();

        prop_assert_eq!(reloaded.get_keys(), config.get_keys());
        for key in config.get_keys() {
            prop_assert_eq!(
                reloaded.get_list(key.as_str()),
                config.get_list(key.as_str())
            );
        }
    }
}
