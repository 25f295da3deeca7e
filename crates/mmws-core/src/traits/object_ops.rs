// # Object Operations Trait
//
// One capability surface per object family (DNS records, DNS zones, DHCP
// reservations). Whatever orchestrates desired vs. observed state talks to
// this trait only.
//
// ## Semantics
//
// - `create` returns the server-assigned reference, the object's durable id
// - `read` maps the server's "not found" code to `Ok(None)`; every other
//   error propagates
// - `update` resends the whole object (the API has no field patch)
// - `delete` always forces removal and does not hide "not found"
// - `find` returns every match; `find_one` insists on exactly one

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::traits::transport::Filter;

/// Create/read/update/delete/find for one object family
#[async_trait]
pub trait ObjectOperations: Send + Sync {
    /// Domain object handled by this family
    type Object: Send + Sync;

    /// Plural family name used in messages, e.g. "DNS zones"
    fn kind(&self) -> &'static str;

    /// Create the object and return its server-assigned reference
    async fn create(&self, object: &Self::Object) -> Result<String>;

    /// Fetch an object by reference; `Ok(None)` if the server reports it missing
    async fn read(&self, reference: &str) -> Result<Option<Self::Object>>;

    /// Replace the object stored at `reference`
    async fn update(&self, object: &Self::Object, reference: &str) -> Result<()>;

    /// Force-delete the object stored at `reference`
    async fn delete(&self, reference: &str) -> Result<()>;

    /// All objects matching `filter`
    async fn find(&self, filter: &Filter) -> Result<Vec<Self::Object>>;

    /// The single object matching `filter`
    ///
    /// # Returns
    ///
    /// - `Err(Error::NoMatch)` if nothing matches
    /// - `Err(Error::AmbiguousMatch)` if more than one object matches
    async fn find_one(&self, filter: &Filter) -> Result<Self::Object> {
        let found = self.find(filter).await?;
        expect_single(found, self.kind())
    }
}

/// Take the only element of `items`
///
/// Zero elements is [`Error::NoMatch`], more than one is
/// [`Error::AmbiguousMatch`].
pub fn expect_single<T>(items: Vec<T>, kind: &str) -> Result<T> {
    let count = items.len();
    let mut items = items.into_iter();
    match (items.next(), count) {
        (Some(item), 1) => Ok(item),
        (None, _) => Err(Error::no_match(kind)),
        (Some(_), _) => Err(Error::ambiguous_match(kind, count)),
    }
}
