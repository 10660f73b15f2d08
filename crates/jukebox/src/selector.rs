//! Resolve a user-typed token to a single catalog item
//!
//! Resolution order, stopping at the first hit:
//!
//! 1. A letter code (`b`, `c.`) indexing into the session's result set
//! 2. The first item in the result set whose rendering starts with the token
//! 3. A fresh catalog search, whose full results replace the session's result set
//!
//! Steps 1 and 2 only apply when the result set holds items of the requested kind. A letter
//! past the end of the set is treated as literal text for step 2.

use crate::{
    catalog::{CatalogItem, ItemKind},
    format::{format_item, is_letter_code, letter_to_index},
    ports::catalog::{self, CatalogError, CatalogProvider},
    session::SessionHandle,
};

/// Outcome of resolving a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Found(CatalogItem),
    /// The token was empty; nothing was looked up
    NothingSpecified,
    /// Neither the result set nor a fresh search produced a match
    NotFound,
}

/// Resolve `token` to an item of `kind`, searching `catalog` if the session has no match
///
/// # Errors
///
/// Only the fresh search can fail; its [`CatalogError`] is returned unchanged and the session's
/// result set is left as it was.
#[tracing::instrument(skip(catalog, session), fields(channel = session.key()))]
pub async fn resolve<C>(
    catalog: &C,
    session: &SessionHandle,
    kind: ItemKind,
    token: &str,
) -> Result<Selection, CatalogError>
where
    C: CatalogProvider + ?Sized,
{
    let token = token.trim();
    if token.is_empty() {
        return Ok(Selection::NothingSpecified);
    }

    if let Some(item) = select_from(&session.results_of(kind), token) {
        tracing::debug!(uri = item.uri(), "resolved from result set");
        return Ok(Selection::Found(item));
    }

    let fresh = catalog::search(catalog, kind, token).await?;
    let first = fresh.first().cloned();
    session.replace_results(kind, fresh);

    Ok(match first {
        Some(item) => {
            tracing::debug!(uri = item.uri(), "resolved from fresh search");
            Selection::Found(item)
        }
        None => Selection::NotFound,
    })
}

/// Letter code first, then case-insensitive prefix match of the rendered item
fn select_from(items: &[CatalogItem], token: &str) -> Option<CatalogItem> {
    if items.is_empty() {
        return None;
    }

    if is_letter_code(token) {
        if let Some(item) = letter_to_index(token).and_then(|idx| items.get(idx)) {
            return Some(item.clone());
        }
    }

    let needle = token.to_lowercase();
    items
        .iter()
        .find(|item| format_item(item).to_lowercase().starts_with(&needle))
        .cloned()
}
