use crate::prelude::*;

#[test]
fn copy_follows_selectable_or_editable() {
    assert!(Flags::DEFAULT_EDITOR.allows_copy());
    assert!(Flags::DEFAULT_VIEWER.allows_copy());
    assert!(Flags::EDITABLE.allows_copy());
    assert!(!Flags::empty().allows_copy());
    assert!(!Flags::SMART_INDENT.allows_copy());

    assert!(DisplayConfig::default().allows_copy());
    assert!(!DisplayConfig::default().with_flags(Flags::empty()).allows_copy());
}

#[test]
fn defaults() {
    let config = DisplayConfig::default();
    assert_eq!(config.theme, ThemeName::DEFAULT);
    assert_eq!(config.language, None);
    assert_eq!(config.flags, Flags::DEFAULT_EDITOR);
    assert_eq!(config.indent_style, IndentStyle::SoftTab { width: 2 });
    assert_eq!(config.auto_pairs, AutoPairs::brackets());
    assert!(config.allows_undo);
    assert!(config.autoscroll);
}

#[test]
fn viewer_is_read_only() {
    let config = DisplayConfig::viewer();
    assert!(config.flags.contains(Flags::SELECTABLE));
    assert!(!config.flags.contains(Flags::EDITABLE));
    assert!(!config.allows_undo);
    assert!(config.auto_pairs.is_empty());
    assert!(config.allows_copy());
}

#[test]
fn auto_pairs_per_language() {
    let brackets = AutoPairs::brackets();
    assert_eq!(brackets.len(), 3);
    assert_eq!(brackets.closing("{"), Some("}"));
    assert_eq!(brackets.closing("\""), None);

    let rust = AutoPairs::for_language(&Language::RUST);
    assert_eq!(rust.len(), 5);
    assert_eq!(rust.closing("\""), Some("\""));
    assert_eq!(rust.closing("'"), Some("'"));

    assert_eq!(AutoPairs::for_language(&Language::MARKDOWN), brackets);
    assert_eq!(AutoPairs::for_language(&Language::new("lisp")), brackets);
}

#[test]
fn auto_pairs_iterate_in_order() {
    let pairs: AutoPairs = [("<", ">"), ("(", ")")].into_iter().collect();
    let collected: Vec<_> = pairs.iter().collect();
    assert_eq!(collected, [("(", ")"), ("<", ">")]);
}

#[test]
fn with_language_keeps_custom_pairs() {
    let config = DisplayConfig::default().with_language(Language::PYTHON);
    assert_eq!(config.language, Some(Language::PYTHON));
    assert_eq!(config.auto_pairs, AutoPairs::for_language(&Language::PYTHON));

    let custom = AutoPairs::none().with("<", ">");
    let config = DisplayConfig::default().with_auto_pairs(custom.clone()).with_language(Language::PYTHON);
    assert_eq!(config.auto_pairs, custom);
}

#[test]
fn names_display_as_identifiers() {
    assert_eq!(ThemeName::ATELIER_SAVANNA_DARK.to_string(), "atelier-savanna-dark");
    assert_eq!(ThemeName::new("solarized").as_str(), "solarized");
    assert_eq!(Language::TYPESCRIPT.to_string(), "typescript");
}

#[cfg(feature = "serde")]
mod serialization {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let json = r#"{ "theme": "ocean", "language": "rust", "font_size": 13.0 }"#;
        let config: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, ThemeName::OCEAN);
        assert_eq!(config.language, Some(Language::RUST));
        assert_eq!(config.font_size, Some(13.0));
        assert_eq!(config.flags, Flags::DEFAULT_EDITOR);
        assert_eq!(config.auto_pairs, AutoPairs::brackets());
    }

    #[test]
    fn config_survives_json() {
        let config = DisplayConfig::viewer().with_language(Language::GO).with_theme(ThemeName::PAPER);
        let json = serde_json::to_string(&config).unwrap();
        let back: DisplayConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn ranges_serialize_as_structs() {
        let json = serde_json::to_string(&CharRange::new(1, 3)).unwrap();
        assert_eq!(json, r#"{"start":1,"end":3}"#);
    }
}
