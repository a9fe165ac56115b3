//! Two-way synchronization between the application's text and selection and a [`TextWidget`].
//!
//! - Model to widget: [`SyncBridge::reconcile`] pushes the current text, selection and
//!   [`DisplayConfig`] into the widget.
//! - Widget to model: [`InboundHandler`] turns the widget's change notifications into writes to
//!   the text and selection [`Binding`]s.
//!
//! Writing to the widget makes it fire change notifications of its own. Those echoes are
//! suppressed by the bridge's [`SyncPhase`]: while a reconciliation pass is running the phase is
//! [`SyncPhase::ApplyingToWidget`], and inbound handlers do nothing outside [`SyncPhase::Idle`].
//!
//! Everything here runs on the UI thread. The phase is a plain [`Cell`] shared between the two
//! directions, so [`SyncBridge`] and [`InboundHandler`] are neither `Send` nor `Sync`.
//!
//! ## Example
//! ```ignore
//! let text = Binding::new(String::from("let a = 5"));
//! let selection = Binding::new(CharRange::caret(0));
//!
//! let bridge = SyncBridge::new(&text, &selection);
//! bridge.attach(&mut widget);
//! bridge.reconcile(&mut widget, &DisplayConfig::default());
//!
//! // Later, when the application sees `text` or `selection` change:
//! if bridge.is_stale() {
//!     bridge.reconcile(&mut widget, &config);
//! }
//! ```

use std::{cell::Cell, fmt, rc::Rc};

use crate::{
    binding::{Binding, WeakBinding},
    config::{DisplayConfig, Flags},
    range::{self, CharRange, Utf16Range},
    widget::{TextWidget, WidgetEvent},
};

/// Which direction the bridge is currently moving state in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPhase {
    /// Waiting. Widget notifications are user edits.
    #[default]
    Idle,
    /// A reconciliation pass is writing to the widget. Widget notifications are echoes.
    ApplyingToWidget,
}

// Holds the phase at `ApplyingToWidget` until dropped, then restores the previous phase.
struct PhaseScope {
    phase: Rc<Cell<SyncPhase>>,
    previous: SyncPhase,
}

impl PhaseScope {
    fn enter(phase: &Rc<Cell<SyncPhase>>) -> Self {
        let previous = phase.replace(SyncPhase::ApplyingToWidget);
        Self {
            phase: Rc::clone(phase),
            previous,
        }
    }
}

impl Drop for PhaseScope {
    fn drop(&mut self) {
        self.phase.set(self.previous);
    }
}

/// Applies widget notifications to the model.
///
/// Cloning is cheap; every clone shares the bridge's phase.
#[derive(Clone)]
pub struct InboundHandler {
    phase: Rc<Cell<SyncPhase>>,
    text: WeakBinding<String>,
    selection: WeakBinding<CharRange>,
}

impl fmt::Debug for InboundHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboundHandler").field("phase", &self.phase.get()).finish_non_exhaustive()
    }
}

impl InboundHandler {
    pub fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    fn is_echo(&self, what: &str) -> bool {
        let echo = self.phase.get() != SyncPhase::Idle;
        if echo {
            log::trace!("ignoring widget {what} change during reconciliation");
        }
        echo
    }

    /// Called when the widget's text changed. Returns `true` if the model text was written.
    ///
    /// The write is expected to reach the application, which then schedules a reconciliation pass.
    pub fn on_widget_text_changed(&self, widget_text: &str) -> bool {
        if self.is_echo("text") {
            return false;
        }

        let Some(text) = self.text.upgrade() else {
            log::trace!("text binding dropped, ignoring widget text change");
            return false;
        };

        if *text.read() == widget_text {
            return false;
        }
        text.set(widget_text.to_owned());

        // The old selection may point past the end of the new text.
        self.selection.update(|selection| *selection = range::clamp_char_range(widget_text, *selection));
        true
    }

    /// Called when the widget's selection changed. `range` is relative to `widget_text`.
    ///
    /// The converted selection is clamped to the model text, which may still be behind the widget.
    /// Returns `true` if the model selection was written.
    pub fn on_widget_selection_changed(&self, widget_text: &str, range: Utf16Range) -> bool {
        if self.is_echo("selection") {
            return false;
        }

        let selection = range::checked_to_char_range(widget_text, range).unwrap_or_else(|err| {
            log::warn!("widget selection {range:?}: {err}, clamping");
            range::to_char_range(widget_text, range)
        });

        // Widgets may report the new caret before the text it belongs to.
        let selection = match self.text.upgrade() {
            Some(text) => {
                let text = text.read();
                range::clamp_char_range(&text, selection)
            }
            None => selection,
        };

        self.selection.set(selection).unwrap_or(false)
    }

    /// Dispatches a [`WidgetEvent`] to the matching handler.
    pub fn handle(&self, event: WidgetEvent<'_>) -> bool {
        match event {
            WidgetEvent::TextChanged(text) => self.on_widget_text_changed(text),
            WidgetEvent::SelectionChanged { text, range } => self.on_widget_selection_changed(text, range),
        }
    }
}

/// Keeps a text [`Binding`] and a selection [`Binding`] in sync with a [`TextWidget`].
///
/// The bridge doesn't own the bindings. Once the application drops them, reconciliation and
/// inbound notifications become no-ops.
pub struct SyncBridge {
    text: WeakBinding<String>,
    selection: WeakBinding<CharRange>,
    inbound: InboundHandler,
    synced_versions: Cell<Option<(u64, u64)>>,
}

impl fmt::Debug for SyncBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncBridge")
            .field("phase", &self.phase())
            .field("synced_versions", &self.synced_versions.get())
            .finish_non_exhaustive()
    }
}

impl SyncBridge {
    pub fn new(text: &Binding<String>, selection: &Binding<CharRange>) -> Self {
        let phase = Rc::new(Cell::new(SyncPhase::Idle));
        Self {
            text: text.downgrade(),
            selection: selection.downgrade(),
            inbound: InboundHandler {
                phase,
                text: text.downgrade(),
                selection: selection.downgrade(),
            },
            synced_versions: Cell::new(None),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.inbound.phase()
    }

    /// Returns a handler for widget notifications that shares this bridge's phase.
    pub fn inbound(&self) -> InboundHandler {
        self.inbound.clone()
    }

    /// Routes the widget's change notifications to this bridge.
    pub fn attach<W: TextWidget + ?Sized>(&self, widget: &mut W) {
        let inbound = self.inbound();
        widget.set_listener(Some(Box::new(move |event: WidgetEvent<'_>| {
            inbound.handle(event);
        })));
    }

    /// Stops listening to the widget.
    pub fn detach<W: TextWidget + ?Sized>(&self, widget: &mut W) {
        widget.set_listener(None);
    }

    /// See [`InboundHandler::on_widget_text_changed`].
    pub fn on_widget_text_changed(&self, widget_text: &str) -> bool {
        self.inbound.on_widget_text_changed(widget_text)
    }

    /// See [`InboundHandler::on_widget_selection_changed`].
    pub fn on_widget_selection_changed(&self, widget_text: &str, range: Utf16Range) -> bool {
        self.inbound.on_widget_selection_changed(widget_text, range)
    }

    /// Returns `true` if copy/paste affordances should be active for `config`.
    pub fn allows_copy(config: &DisplayConfig) -> bool {
        config.allows_copy()
    }

    /// Returns `true` if the text or selection changed since the last reconciliation pass,
    /// or if there hasn't been one yet.
    ///
    /// Changes to the [`DisplayConfig`] aren't tracked.
    pub fn is_stale(&self) -> bool {
        let current = self.text.version().zip(self.selection.version());
        current.is_some() && current != self.synced_versions.get()
    }

    /// Pushes the model and `config` into `widget`.
    ///
    /// Text, selection and the interaction toggles are compared first and only written when they
    /// differ, so a pass over an up-to-date widget doesn't touch them. A selection that no longer
    /// fits the text is clamped, and the clamped value is written back to the selection binding.
    pub fn reconcile<W: TextWidget + ?Sized>(&self, widget: &mut W, config: &DisplayConfig) {
        let (Some(text), Some(selection)) = (self.text.upgrade(), self.selection.upgrade()) else {
            log::debug!("model dropped, skipping reconciliation");
            return;
        };

        let _scope = PhaseScope::enter(&self.inbound.phase);

        match config.font_size {
            Some(font_size) => widget.set_theme_and_font_size(&config.theme, font_size),
            None => widget.set_theme(&config.theme),
        }

        widget.set_language(config.language.as_ref());
        widget.set_indent_style(config.indent_style);
        widget.set_smart_indent(config.flags.contains(Flags::SMART_INDENT));
        widget.set_auto_pairs(&config.auto_pairs);
        widget.set_content_insets(config.insets);

        let model_text = text.get();
        let stored_selection = selection.get();
        let model_selection = range::clamp_char_range(&model_text, stored_selection);
        if model_selection != stored_selection {
            log::debug!("clamping stale selection {stored_selection:?} to {model_selection:?}");
            selection.set(model_selection);
        }

        if widget.string() != model_text.as_str() {
            log::debug!("replacing widget text ({} chars)", range::char_count(&model_text));
            replace_content(widget, &model_text);
        }

        // Convert against what the widget holds now, not against the model.
        let widget_text = widget.string().into_owned();
        let target = range::checked_to_code_unit_range(&widget_text, model_selection).unwrap_or_else(|err| {
            log::warn!("model selection {model_selection:?}: {err}, clamping");
            range::to_code_unit_range(&widget_text, model_selection)
        });

        if widget.selection() != target {
            log::debug!("moving widget selection to {target:?}");
            widget.set_selection(target);
            if config.autoscroll {
                widget.scroll_range_to_visible(target);
            }
        }

        let editable = config.flags.contains(Flags::EDITABLE);
        if widget.is_editable() != editable {
            widget.set_editable(editable);
        }

        let selectable = config.flags.contains(Flags::SELECTABLE);
        if widget.is_selectable() != selectable {
            widget.set_selectable(selectable);
        }

        if widget.allows_undo() != config.allows_undo {
            widget.set_allows_undo(config.allows_undo);
        }

        self.synced_versions.set(Some((text.version(), selection.version())));
    }
}

// Replaces everything the widget holds with `text` as a single edit.
fn replace_content<W: TextWidget + ?Sized>(widget: &mut W, text: &str) {
    match widget.text_storage() {
        Some(storage) => {
            let extent = Utf16Range::new(0, storage.len_utf16());
            storage.replace_characters(extent, text);
        }
        None => {
            log::error!("widget has no text storage, replacing its string directly");
            debug_assert!(false, "widget has no text storage");
            widget.set_string(text);
        }
    }
}
