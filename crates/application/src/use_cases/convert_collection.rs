//! Convert collection use case.

use crate::error::{AdapterError, AdapterResult};
use crate::ports::{CollectionAdapter, CollectionFormat, ContainerAdapter, ContainerView, EntryView};

/// Replays a collection tree, node by node, into another format.
pub struct ConvertCollection<'f> {
    target: &'f dyn CollectionFormat,
}

impl<'f> ConvertCollection<'f> {
    /// Creates a new `ConvertCollection` use case writing to `target`.
    #[must_use]
    pub const fn new(target: &'f dyn CollectionFormat) -> Self {
        Self { target }
    }

    /// Builds a committed copy of `source` in the target format.
    ///
    /// Each node's authorization is copied only after its subtree has been
    /// appended, since appending may reset it on some formats.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` if the target cannot be written; any error of
    /// the source or target adapters. A target that failed half way is
    /// dropped.
    pub fn execute<S>(&self, source: &S) -> AdapterResult<Box<dyn CollectionAdapter>>
    where
        S: ContainerView + ?Sized,
    {
        if !self.target.can_write() {
            return Err(AdapterError::unsupported(format!(
                "{} collections are read-only",
                self.target.format_id()
            )));
        }

        tracing::info!(
            source = source.id(),
            target = self.target.format_id(),
            "converting collection"
        );

        let mut converted = self.target.create_collection(source.name())?;
        copy_children(source, converted.as_mut())?;
        converted.set_authorization(source.authorization())?;
        converted.commit()?;
        Ok(converted)
    }
}

fn copy_children<S, T>(source: &S, target: &mut T) -> AdapterResult<()>
where
    S: ContainerView + ?Sized,
    T: ContainerAdapter + ?Sized,
{
    for id in source.child_entry_ids() {
        match source.entry(&id)? {
            EntryView::Container(folder) => {
                let mut copy = target.append_container_entry(folder.name())?;
                copy_children(folder.as_ref(), copy.as_mut())?;
                copy.set_authorization(folder.authorization())?;
            }
            EntryView::Item(item) => {
                let mut copy = target.append_item_entry(&item.request())?;
                copy.set_authorization(item.authorization())?;
            }
        }
    }
    Ok(())
}
