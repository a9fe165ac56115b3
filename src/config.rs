//! The display configuration applied to a widget on every reconciliation pass.
//!
//! A [`DisplayConfig`] is a read-only snapshot. The application rebuilds it whenever any of its
//! inputs change and hands it to [`SyncBridge::reconcile`](crate::bridge::SyncBridge::reconcile),
//! which doesn't keep it past the pass.

use std::{borrow::Cow, collections::BTreeMap, fmt};

use bitflags::bitflags;
use kurbo::Insets;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Interaction toggles for the widget.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
    pub struct Flags: u8 {
        /// The user can select (and copy) text.
        const SELECTABLE = 1 << 0;
        /// The user can modify text.
        const EDITABLE = 1 << 1;
        /// New lines inherit the indentation of the previous line.
        const SMART_INDENT = 1 << 2;

        /// Flags for a regular source editor.
        const DEFAULT_EDITOR = Self::SELECTABLE.bits() | Self::EDITABLE.bits() | Self::SMART_INDENT.bits();
        /// Flags for a read-only source viewer.
        const DEFAULT_VIEWER = Self::SELECTABLE.bits();
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::DEFAULT_EDITOR
    }
}

impl Flags {
    /// Returns `true` if copy/paste affordances should be active.
    pub fn allows_copy(self) -> bool {
        self.intersects(Self::SELECTABLE | Self::EDITABLE)
    }
}

/// The name of a highlighting theme understood by the widget's highlighter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ThemeName(Cow<'static, str>);

impl ThemeName {
    pub const DEFAULT: ThemeName = ThemeName(Cow::Borrowed("default"));
    pub const PAPER: ThemeName = ThemeName(Cow::Borrowed("paper"));
    pub const AGATE: ThemeName = ThemeName(Cow::Borrowed("agate"));
    pub const OCEAN: ThemeName = ThemeName(Cow::Borrowed("ocean"));
    pub const POJOAQUE: ThemeName = ThemeName(Cow::Borrowed("pojoaque"));
    pub const ATELIER_SAVANNA_LIGHT: ThemeName = ThemeName(Cow::Borrowed("atelier-savanna-light"));
    pub const ATELIER_SAVANNA_DARK: ThemeName = ThemeName(Cow::Borrowed("atelier-savanna-dark"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ThemeName {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language (grammar) identifier understood by the widget's highlighter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Language(Cow<'static, str>);

impl Language {
    pub const BASH: Language = Language(Cow::Borrowed("bash"));
    pub const C: Language = Language(Cow::Borrowed("c"));
    pub const CPP: Language = Language(Cow::Borrowed("cpp"));
    pub const CSS: Language = Language(Cow::Borrowed("css"));
    pub const GO: Language = Language(Cow::Borrowed("go"));
    pub const JAVA: Language = Language(Cow::Borrowed("java"));
    pub const JAVASCRIPT: Language = Language(Cow::Borrowed("javascript"));
    pub const JSON: Language = Language(Cow::Borrowed("json"));
    pub const MARKDOWN: Language = Language(Cow::Borrowed("markdown"));
    pub const PYTHON: Language = Language(Cow::Borrowed("python"));
    pub const RUST: Language = Language(Cow::Borrowed("rust"));
    pub const SWIFT: Language = Language(Cow::Borrowed("swift"));
    pub const TYPESCRIPT: Language = Language(Cow::Borrowed("typescript"));
    pub const YAML: Language = Language(Cow::Borrowed("yaml"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Languages where typing a quote should also insert the closing quote.
    fn pairs_quotes(&self) -> bool {
        matches!(
            self.as_str(),
            "c" | "cpp" | "css" | "go" | "java" | "javascript" | "json" | "python" | "rust" | "swift" | "typescript"
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the widget inserts indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndentStyle {
    /// Use the widget's native tab handling.
    System,
    /// Insert `width` spaces.
    SoftTab { width: u8 },
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::SoftTab { width: 2 }
    }
}

/// Maps an opening sequence to the closing sequence the widget inserts after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct AutoPairs(BTreeMap<String, String>);

impl AutoPairs {
    /// No automatic pairing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Pairs `{}`, `()` and `[]`.
    pub fn brackets() -> Self {
        Self::none().with("{", "}").with("(", ")").with("[", "]")
    }

    /// The brackets, plus quotes for languages that use them as string delimiters.
    pub fn for_language(language: &Language) -> Self {
        let pairs = Self::brackets();
        if language.pairs_quotes() { pairs.with("\"", "\"").with("'", "'") } else { pairs }
    }

    pub fn with(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.0.insert(open.into(), close.into());
        self
    }

    /// Returns the closing sequence for `open`, if any.
    pub fn closing(&self, open: &str) -> Option<&str> {
        self.0.get(open).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(open, close)| (open.as_str(), close.as_str()))
    }
}

impl<O: Into<String>, C: Into<String>> FromIterator<(O, C)> for AutoPairs {
    fn from_iter<I: IntoIterator<Item = (O, C)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(open, close)| (open.into(), close.into())).collect())
    }
}

/// Everything about the widget's presentation that isn't its text or selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DisplayConfig {
    pub theme: ThemeName,
    pub language: Option<Language>,
    /// When set, applied together with the theme.
    pub font_size: Option<f64>,
    pub flags: Flags,
    pub indent_style: IndentStyle,
    pub auto_pairs: AutoPairs,
    /// Space between the widget's bounds and its text.
    pub insets: Insets,
    pub allows_undo: bool,
    /// Scroll the selection into view whenever the bridge moves it.
    pub autoscroll: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            language: None,
            font_size: None,
            flags: Flags::default(),
            indent_style: IndentStyle::default(),
            auto_pairs: AutoPairs::brackets(),
            insets: Insets::uniform_xy(4.0, 8.0),
            allows_undo: true,
            autoscroll: true,
        }
    }
}

impl DisplayConfig {
    /// A read-only viewer: selectable, not editable, no undo.
    pub fn viewer() -> Self {
        Self {
            flags: Flags::DEFAULT_VIEWER,
            allows_undo: false,
            auto_pairs: AutoPairs::none(),
            ..Self::default()
        }
    }

    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the language and, if no pairs were configured, its default auto-pairs.
    pub fn with_language(mut self, language: Language) -> Self {
        if self.auto_pairs.is_empty() || self.auto_pairs == AutoPairs::brackets() {
            self.auto_pairs = AutoPairs::for_language(&language);
        }
        self.language = Some(language);
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_indent_style(mut self, indent_style: IndentStyle) -> Self {
        self.indent_style = indent_style;
        self
    }

    pub fn with_auto_pairs(mut self, auto_pairs: AutoPairs) -> Self {
        self.auto_pairs = auto_pairs;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_allows_undo(mut self, allows_undo: bool) -> Self {
        self.allows_undo = allows_undo;
        self
    }

    pub fn with_autoscroll(mut self, autoscroll: bool) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    /// Returns `true` if copy/paste affordances should be active.
    pub fn allows_copy(&self) -> bool {
        self.flags.allows_copy()
    }
}
