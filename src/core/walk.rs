//! Composition helpers for walking nested directories lazily
//!
//! Each level of the repository lists its children eagerly but walks into them
//! only when the consumer reaches them. A child whose listing fails contributes
//! a single `Err` item in its place instead of ending the walk.

use crate::error::Result;

/// Flatten a child's fallible listing of plain items into the parent's stream
pub(crate) fn descend<I, T>(listing: Result<I>) -> impl Iterator<Item = Result<T>>
where
    I: Iterator<Item = T>,
{
    flatten(listing.map(|items| items.map(Ok)))
}

/// Flatten a child's fallible listing of fallible items into the parent's stream
pub(crate) fn flatten<I, T>(listing: Result<I>) -> impl Iterator<Item = Result<T>>
where
    I: Iterator<Item = Result<T>>,
{
    let (items, error) = match listing {
        Ok(items) => (Some(items), None),
        Err(e) => (None, Some(Err(e))),
    };
    items.into_iter().flatten().chain(error)
}
