use std::{borrow::Cow, ops::Range};

use kurbo::Insets;

use crate::{prelude::*, range};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn byte_range(text: &str, chars: CharRange) -> Range<usize> {
    let byte_at = |index: usize| text.char_indices().nth(index).map_or(text.len(), |(byte, _)| byte);
    byte_at(chars.start)..byte_at(chars.end)
}

/// Replaces a UTF-16 range of `text`, returning the caret position after the inserted text.
pub fn replace_utf16(text: &mut String, range: Utf16Range, with: &str) -> Utf16Range {
    let chars = range::to_char_range(text, range);
    let bytes = byte_range(text, chars);
    let caret = range::utf16_len(&text[..bytes.start]) + range::utf16_len(with);
    text.replace_range(bytes, with);
    Utf16Range::caret(caret)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetTheme(String, Option<f64>),
    SetLanguage(Option<String>),
    SetIndentStyle(IndentStyle),
    SetSmartIndent(bool),
    SetAutoPairs(AutoPairs),
    SetContentInsets(Insets),
    ReplaceCharacters(Utf16Range, String),
    SetString(String),
    SetSelection(Utf16Range),
    ScrollRangeToVisible(Utf16Range),
    SetEditable(bool),
    SetSelectable(bool),
    SetAllowsUndo(bool),
}

impl Call {
    /// Calls that touch the text, the selection, the scroll position or the interaction toggles.
    pub fn is_state_mutation(&self) -> bool {
        matches!(
            self,
            Call::ReplaceCharacters(..)
                | Call::SetString(_)
                | Call::SetSelection(_)
                | Call::ScrollRangeToVisible(_)
                | Call::SetEditable(_)
                | Call::SetSelectable(_)
                | Call::SetAllowsUndo(_)
        )
    }
}

/// A widget that records every call and fires notifications synchronously, like native views do.
pub struct RecordingWidget {
    pub text: String,
    pub selection: Utf16Range,
    pub editable: bool,
    pub selectable: bool,
    pub allows_undo: bool,
    pub has_storage: bool,
    pub panic_on_theme: bool,
    pub calls: Vec<Call>,
    listener: Option<Listener>,
}

impl Default for RecordingWidget {
    fn default() -> Self {
        Self {
            text: String::new(),
            selection: Utf16Range::caret(0),
            editable: true,
            selectable: true,
            allows_undo: true,
            has_storage: true,
            panic_on_theme: false,
            calls: Vec::new(),
            listener: None,
        }
    }
}

impl RecordingWidget {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn state_mutations(&self) -> Vec<&Call> {
        self.calls.iter().filter(|call| call.is_state_mutation()).collect()
    }

    fn notify_text(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(WidgetEvent::TextChanged(&self.text));
        }
    }

    fn notify_selection(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(WidgetEvent::SelectionChanged {
                text: &self.text,
                range: self.selection,
            });
        }
    }

    /// Simulates the user typing `text` over the current selection.
    pub fn user_types(&mut self, text: &str) {
        self.selection = replace_utf16(&mut self.text, self.selection, text);
        self.notify_text();
        self.notify_selection();
    }

    /// Simulates the user selecting a range.
    pub fn user_selects(&mut self, range: Utf16Range) {
        self.selection = range;
        self.notify_selection();
    }
}

impl TextStorage for RecordingWidget {
    fn len_utf16(&self) -> usize {
        range::utf16_len(&self.text)
    }

    fn replace_characters(&mut self, range: Utf16Range, text: &str) {
        self.calls.push(Call::ReplaceCharacters(range, text.to_string()));
        self.selection = replace_utf16(&mut self.text, range, text);
        self.notify_text();
        self.notify_selection();
    }
}

impl TextWidget for RecordingWidget {
    fn string(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn selection(&self) -> Utf16Range {
        self.selection
    }

    fn set_selection(&mut self, range: Utf16Range) {
        self.calls.push(Call::SetSelection(range));
        self.selection = range;
        self.notify_selection();
    }

    fn scroll_range_to_visible(&mut self, range: Utf16Range) {
        self.calls.push(Call::ScrollRangeToVisible(range));
    }

    fn text_storage(&mut self) -> Option<&mut dyn TextStorage> {
        if self.has_storage { Some(self as &mut dyn TextStorage) } else { None }
    }

    fn set_string(&mut self, text: &str) {
        self.calls.push(Call::SetString(text.to_string()));
        self.text = text.to_string();
        self.selection = Utf16Range::caret(range::utf16_len(text));
        self.notify_text();
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn set_editable(&mut self, editable: bool) {
        self.calls.push(Call::SetEditable(editable));
        self.editable = editable;
    }

    fn is_selectable(&self) -> bool {
        self.selectable
    }

    fn set_selectable(&mut self, selectable: bool) {
        self.calls.push(Call::SetSelectable(selectable));
        self.selectable = selectable;
    }

    fn allows_undo(&self) -> bool {
        self.allows_undo
    }

    fn set_allows_undo(&mut self, allows_undo: bool) {
        self.calls.push(Call::SetAllowsUndo(allows_undo));
        self.allows_undo = allows_undo;
    }

    fn set_theme(&mut self, theme: &ThemeName) {
        if self.panic_on_theme {
            panic!("theme rejected");
        }
        self.calls.push(Call::SetTheme(theme.to_string(), None));
    }

    fn set_theme_and_font_size(&mut self, theme: &ThemeName, font_size: f64) {
        self.calls.push(Call::SetTheme(theme.to_string(), Some(font_size)));
    }

    fn set_language(&mut self, language: Option<&Language>) {
        self.calls.push(Call::SetLanguage(language.map(Language::to_string)));
    }

    fn set_indent_style(&mut self, style: IndentStyle) {
        self.calls.push(Call::SetIndentStyle(style));
    }

    fn set_smart_indent(&mut self, smart_indent: bool) {
        self.calls.push(Call::SetSmartIndent(smart_indent));
    }

    fn set_auto_pairs(&mut self, pairs: &AutoPairs) {
        self.calls.push(Call::SetAutoPairs(pairs.clone()));
    }

    fn set_content_insets(&mut self, insets: Insets) {
        self.calls.push(Call::SetContentInsets(insets));
    }

    fn set_listener(&mut self, listener: Option<Listener>) {
        self.listener = listener;
    }
}
