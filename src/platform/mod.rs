//! Adapters from native widget flavors to [`TextWidget`](crate::widget::TextWidget).
//!
//! - [`desktop`]: views with a list of selected ranges, an optional text store, a symmetric
//!   container inset and their own undo toggle.
//! - [`touch`]: views with a single selected range, edge insets and no undo toggle.
//!
//! Pick the adapter matching the host widget when constructing it; the bridge doesn't care which.

use std::ops::Range;

use smallvec::SmallVec;

use crate::{
    config::{AutoPairs, IndentStyle},
    range::Utf16Range,
    widget::CodeHighlighting,
};

pub mod desktop;
pub mod touch;

/// A native range, as a UTF-16 location and length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NsRange {
    pub location: usize,
    pub length: usize,
}

impl NsRange {
    /// The location native views report when there is no selection.
    pub const NOT_FOUND: usize = isize::MAX as usize;

    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    pub fn is_not_found(&self) -> bool {
        self.location == Self::NOT_FOUND
    }

    /// Returns the range in UTF-16 offsets. A not-found range maps to `0..0`.
    pub fn to_utf16(self) -> Utf16Range {
        if self.is_not_found() {
            return Utf16Range::caret(0);
        }
        Utf16Range::new(self.location, self.location.saturating_add(self.length))
    }
}

impl From<Utf16Range> for NsRange {
    fn from(range: Utf16Range) -> Self {
        let range = range.ordered();
        Self::new(range.start, range.len())
    }
}

impl From<NsRange> for Range<usize> {
    fn from(ns: NsRange) -> Self {
        ns.to_utf16().to_range()
    }
}

fn apply_indent_style(view: &mut impl CodeHighlighting, style: IndentStyle) {
    match style {
        IndentStyle::System => view.set_soft_tab_width(None),
        IndentStyle::SoftTab { width } => view.set_soft_tab_width(Some(width)),
    }
}

fn apply_auto_pairs(view: &mut impl CodeHighlighting, pairs: &AutoPairs) {
    let pairs: SmallVec<[(&str, &str); 8]> = pairs.iter().collect();
    view.set_auto_pairs(&pairs);
}
