#![forbid(unsafe_code)]

//! The item source contract.
//!
//! The presentation layer implements [`ItemSource`] to tell the engine how
//! many items exist and to build (or rebind) the item for an index. The
//! engine holds it as `Box<dyn ItemSource<Item = T>>` and never needs the
//! concrete type.

use scatter_core::geometry::Size;

/// Supplies item count and per-index content.
pub trait ItemSource {
    /// The item instance type (a view, a widget handle, plain data, ...).
    type Item;

    /// Number of items currently available.
    fn count(&self) -> usize;

    /// Produce the item for `index`.
    ///
    /// `recycled` holds a detached instance the source may rebind. Taking it
    /// out of the option (`recycled.take()`) is reuse; leaving it in place
    /// hands it back to the engine's recycle pool.
    fn content(&mut self, index: usize, recycled: &mut Option<Self::Item>) -> Self::Item;

    /// Declared size of `item`. Placement treats it as fixed.
    fn declared_size(&self, item: &Self::Item) -> Size;
}

impl<S: ItemSource + ?Sized> ItemSource for Box<S> {
    type Item = S::Item;

    fn count(&self) -> usize {
        (**self).count()
    }

    fn content(&mut self, index: usize, recycled: &mut Option<Self::Item>) -> Self::Item {
        (**self).content(index, recycled)
    }

    fn declared_size(&self, item: &Self::Item) -> Size {
        (**self).declared_size(item)
    }
}
