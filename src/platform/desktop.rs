//! Adapter for desktop-style text views.

use std::borrow::Cow;

use kurbo::{Insets, Size};
use smallvec::SmallVec;

use super::{NsRange, apply_auto_pairs, apply_indent_style};
use crate::{
    config::{AutoPairs, IndentStyle, Language, ThemeName},
    range::Utf16Range,
    widget::{CodeHighlighting, Listener, TextStorage, TextWidget, WidgetEvent},
};

/// A notification from a desktop text view's delegate.
#[derive(Debug, Clone, Copy)]
pub enum DesktopNotification<'a> {
    TextDidChange { string: &'a str },
    SelectionDidChange { string: &'a str, selected_ranges: &'a [NsRange] },
}

pub type DesktopDelegate = Box<dyn FnMut(DesktopNotification<'_>)>;

/// The shape of a desktop text view.
pub trait DesktopTextView: CodeHighlighting {
    fn string(&self) -> Cow<'_, str>;

    fn set_string(&mut self, string: &str);

    /// Desktop views may be built without a text store.
    fn text_storage(&mut self) -> Option<&mut dyn TextStorage>;

    /// Returns the selected ranges, primary range first.
    fn selected_ranges(&self) -> SmallVec<[NsRange; 1]>;

    fn set_selected_ranges(&mut self, ranges: &[NsRange]);

    fn scroll_range_to_visible(&mut self, range: NsRange);

    fn is_editable(&self) -> bool;

    fn set_editable(&mut self, editable: bool);

    fn is_selectable(&self) -> bool;

    fn set_selectable(&mut self, selectable: bool);

    fn allows_undo(&self) -> bool;

    fn set_allows_undo(&mut self, allows_undo: bool);

    /// The inset is applied symmetrically on both sides of each axis.
    fn set_text_container_inset(&mut self, inset: Size);

    fn set_delegate(&mut self, delegate: Option<DesktopDelegate>);
}

// Only the primary range is modeled.
fn primary_range(ranges: &[NsRange]) -> Utf16Range {
    ranges.first().map(|ns| ns.to_utf16()).unwrap_or_default()
}

/// Presents a [`DesktopTextView`] as a [`TextWidget`].
#[derive(Debug)]
pub struct DesktopWidget<V> {
    view: V,
}

impl<V: DesktopTextView> DesktopWidget<V> {
    pub fn new(view: V) -> Self {
        Self { view }
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

impl<V: DesktopTextView> TextWidget for DesktopWidget<V> {
    fn string(&self) -> Cow<'_, str> {
        self.view.string()
    }

    fn selection(&self) -> Utf16Range {
        primary_range(&self.view.selected_ranges())
    }

    fn set_selection(&mut self, range: Utf16Range) {
        self.view.set_selected_ranges(&[NsRange::from(range)]);
    }

    fn scroll_range_to_visible(&mut self, range: Utf16Range) {
        self.view.scroll_range_to_visible(range.into());
    }

    fn text_storage(&mut self) -> Option<&mut dyn TextStorage> {
        self.view.text_storage()
    }

    fn set_string(&mut self, text: &str) {
        self.view.set_string(text);
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
        self.view.allows_undo()
    }

    fn set_allows_undo(&mut self, allows_undo: bool) {
        self.view.set_allows_undo(allows_undo);
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
        let inset = Size::new(insets.x0.max(insets.x1), insets.y0.max(insets.y1));
        self.view.set_text_container_inset(inset);
    }

    fn set_listener(&mut self, listener: Option<Listener>) {
        let delegate = listener.map(|mut listener| -> DesktopDelegate {
            Box::new(move |notification: DesktopNotification<'_>| match notification {
                DesktopNotification::TextDidChange { string } => listener(WidgetEvent::TextChanged(string)),
                DesktopNotification::SelectionDidChange { string, selected_ranges } => listener(WidgetEvent::SelectionChanged {
                    text: string,
                    range: primary_range(selected_ranges),
                }),
            })
        });
        self.view.set_delegate(delegate);
    }
}
