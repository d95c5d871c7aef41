use lore_rules::{normalize_text, validate_shard_text_default, RuleCard};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{3,8}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn normalize_is_idempotent(s in any::<String>()) {
        let once = normalize_text(&s);
        prop_assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn normalized_text_has_no_edge_or_double_spaces(s in "[ -~\\t\\n]{0,64}") {
        let n = normalize_text(&s);
        prop_assert!(!n.starts_with(' '));
        prop_assert!(!n.ends_with(' '));
        prop_assert!(!n.contains("  "));
    }

    #[test]
    fn banned_word_in_text_is_reported(
        banned in word(),
        prefix in "[A-Za-z ,.]{0,40}",
        suffix in "[A-Za-z ,.]{0,40}",
    ) {
        let card = RuleCard::new([banned.clone()], Vec::<String>::new(), "any");
        let text = format!("{}{}{}", prefix, banned.to_uppercase(), suffix);
        let result = validate_shard_text_default(&text, &card);
        let expected = format!("Contains banned word: \"{}\"", banned);
        prop_assert!(result.violations.contains(&expected));
        prop_assert!(!result.valid);
    }

    #[test]
    fn text_without_banned_letters_has_no_banned_violation(
        text in "[a-m ]{0,120}",
        banned in "[n-z]{3,6}",
    ) {
        let card = RuleCard::new([banned], Vec::<String>::new(), "any");
        let result = validate_shard_text_default(&text, &card);
        prop_assert!(result.violations.iter().all(|v| !v.starts_with("Contains banned word")));
    }
}
