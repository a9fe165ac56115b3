//! The capability interface a native text-editing widget exposes to the bridge.
//!
//! Host toolkits ship widgets with different shapes (see [`platform`](crate::platform) for the two
//! adapters this crate provides). The bridge only ever talks to [`TextWidget`].
//!
//! ## Units
//! All ranges in this module are in UTF-16 code units, the addressing scheme of native widgets.
//! Character indices never cross this boundary.

use std::borrow::Cow;

use kurbo::Insets;

use crate::{
    config::{AutoPairs, IndentStyle, Language, ThemeName},
    range::Utf16Range,
};

/// A change notification fired by the widget.
///
/// Notifications carry the widget's current text, so handlers never need to borrow the widget
/// while it is in the middle of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent<'a> {
    /// The widget's text changed.
    TextChanged(&'a str),
    /// The widget's selection changed. `range` is relative to `text`.
    SelectionChanged { text: &'a str, range: Utf16Range },
}

/// Receives [`WidgetEvent`]s. Widgets may invoke it synchronously from inside any mutator.
pub type Listener = Box<dyn FnMut(WidgetEvent<'_>)>;

/// The widget's backing text store.
pub trait TextStorage {
    /// Returns the length of the stored text in UTF-16 code units.
    fn len_utf16(&self) -> usize;

    /// Replaces the characters in `range` with `text`, as one edit.
    fn replace_characters(&mut self, range: Utf16Range, text: &str);
}

/// A stateful text-editing widget owned by the host toolkit.
pub trait TextWidget {
    /// Returns the widget's current text.
    fn string(&self) -> Cow<'_, str>;

    /// Returns the current selection or caret position.
    fn selection(&self) -> Utf16Range;

    fn set_selection(&mut self, range: Utf16Range);

    fn scroll_range_to_visible(&mut self, range: Utf16Range);

    /// Returns the widget's text store.
    ///
    /// Returns `None` only if the widget was constructed without one.
    fn text_storage(&mut self) -> Option<&mut dyn TextStorage>;

    /// Replaces the whole text without going through the text store.
    fn set_string(&mut self, text: &str);

    fn is_editable(&self) -> bool;

    fn set_editable(&mut self, editable: bool);

    fn is_selectable(&self) -> bool;

    fn set_selectable(&mut self, selectable: bool);

    fn allows_undo(&self) -> bool;

    fn set_allows_undo(&mut self, allows_undo: bool);

    fn set_theme(&mut self, theme: &ThemeName);

    /// Applies a theme and font size as one step, so derived metrics are computed once.
    fn set_theme_and_font_size(&mut self, theme: &ThemeName, font_size: f64);

    fn set_language(&mut self, language: Option<&Language>);

    fn set_indent_style(&mut self, style: IndentStyle);

    fn set_smart_indent(&mut self, smart_indent: bool);

    fn set_auto_pairs(&mut self, pairs: &AutoPairs);

    fn set_content_insets(&mut self, insets: Insets);

    /// Installs the receiver for change notifications, replacing any previous one.
    fn set_listener(&mut self, listener: Option<Listener>);
}

/// Highlighting controls shared by every widget flavor.
pub trait CodeHighlighting {
    fn set_theme(&mut self, theme: &str, font_size: Option<f64>);

    fn set_language(&mut self, language: Option<&str>);

    /// `None` means the widget's native tab handling.
    fn set_soft_tab_width(&mut self, width: Option<u8>);

    fn set_smart_indent(&mut self, smart_indent: bool);

    fn set_auto_pairs(&mut self, pairs: &[(&str, &str)]);
}
