//! Adapter for touch-style text views.
//!
//! Touch views have a single selected range and leave undo to the host's undo manager, so the
//! adapter only records the undo toggle.

use std::borrow::Cow;

use kurbo::Insets;

use super::{NsRange, apply_auto_pairs, apply_indent_style};
use crate::{
    config::{AutoPairs, IndentStyle, Language, ThemeName},
    range::Utf16Range,
    widget::{CodeHighlighting, Listener, TextStorage, TextWidget, WidgetEvent},
};

/// A notification from a touch text view's delegate.
#[derive(Debug, Clone, Copy)]
pub enum TouchNotification<'a> {
    DidChange { text: &'a str },
    DidChangeSelection { text: &'a str, selected_range: NsRange },
}

pub type TouchDelegate = Box<dyn FnMut(TouchNotification<'_>)>;

/// The shape of a touch text view.
pub trait TouchTextView: CodeHighlighting {
    fn text(&self) -> Cow<'_, str>;

    fn set_text(&mut self, text: &str);

    fn text_storage(&mut self) -> Option<&mut dyn TextStorage>;

    fn selected_range(&self) -> NsRange;

    fn set_selected_range(&mut self, range: NsRange);

    fn scroll_range_to_visible(&mut self, range: NsRange);

    fn is_editable(&self) -> bool;

    fn set_editable(&mut self, editable: bool);

    fn is_selectable(&self) -> bool;

    fn set_selectable(&mut self, selectable: bool);

    fn set_text_container_inset(&mut self, insets: Insets);

    fn set_delegate(&mut self, delegate: Option<TouchDelegate>);
}

/// Presents a [`TouchTextView`] as a [`TextWidget`].
#[derive(Debug)]
pub struct TouchWidget<V> {
    view: V,
    allows_undo: bool,
}

impl<V: TouchTextView> TouchWidget<V> {
    pub fn new(view: V) -> Self {
        Self { view, allows_undo: true }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_inner(self) -> V {
        self.view
    }
}

impl<V: TouchTextView> TextWidget for TouchWidget<V> {
    fn string(&self) -> Cow<'_, str> {
        self.view.text()
    }

    fn selection(&self) -> Utf16Range {
        self.view.selected_range().to_utf16()
    }

    fn set_selection(&mut self, range: Utf16Range) {
        self.view.set_selected_range(range.into());
    }

    fn scroll_range_to_visible(&mut self, range: Utf16Range) {
        self.view.scroll_range_to_visible(range.into());
    }

    fn text_storage(&mut self) -> Option<&mut dyn TextStorage> {
        self.view.text_storage()
    }

    fn set_string(&mut self, text: &str) {
        self.view.set_text(text);
    }

    fn is_editable(&self) -> bool {
        self.view.is_editable()
    }

    fn set_editable(&mut self, editable: bool) {
        self.view.set_editable(editable);
    }

    fn is_selectable(&self) -> bool {
        self.view.is_selectable()
    }

    fn set_selectable(&mut self, selectable: bool) {
        self.view.set_selectable(selectable);
    }

    fn allows_undo(&self) -> bool {
        self.allows_undo
    }

    fn set_allows_undo(&mut self, allows_undo: bool) {
        if self.allows_undo != allows_undo {
            log::debug!("touch views manage undo through the host; recording allows_undo = {allows_undo}");
        }
        self.allows_undo = allows_undo;
    }

    fn set_theme(&mut self, theme: &ThemeName) {
        CodeHighlighting::set_theme(&mut self.view, theme.as_str(), None);
    }

    fn set_theme_and_font_size(&mut self, theme: &ThemeName, font_size: f64) {
        CodeHighlighting::set_theme(&mut self.view, theme.as_str(), Some(font_size));
    }

    fn set_language(&mut self, language: Option<&Language>) {
        CodeHighlighting::set_language(&mut self.view, language.map(Language::as_str));
    }

    fn set_indent_style(&mut self, style: IndentStyle) {
        apply_indent_style(&mut self.view, style);
    }

    fn set_smart_indent(&mut self, smart_indent: bool) {
        CodeHighlighting::set_smart_indent(&mut self.view, smart_indent);
    }

    fn set_auto_pairs(&mut self, pairs: &AutoPairs) {
        apply_auto_pairs(&mut self.view, pairs);
    }

    fn set_content_insets(&mut self, insets: Insets) {
        self.view.set_text_container_inset(insets);
    }

    fn set_listener(&mut self, listener: Option<Listener>) {
        let delegate = listener.map(|mut listener| -> TouchDelegate {
            Box::new(move |notification: TouchNotification<'_>| match notification {
                TouchNotification::DidChange { text } => listener(WidgetEvent::TextChanged(text)),
                TouchNotification::DidChangeSelection { text, selected_range } => listener(WidgetEvent::SelectionChanged {
                    text,
                    range: selected_range.to_utf16(),
                }),
            })
        });
        self.view.set_delegate(delegate);
    }
}
