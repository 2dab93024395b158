use crate::model::{Athlete, Coach, Collection, Entity, Event, Group, School};
use crate::store::StoreSnapshot;
use std::sync::Arc;

/// Read and wholesale replacement of one collection.
///
/// No validation happens at this layer; schema conformance is the caller's
/// job (see `logic::Gateway`).
pub trait CollectionStore<E: Entity>: Send + Sync {
    /// Current rows in insertion order. The returned snapshot is never
    /// mutated; a later `replace_all` swaps in a new one instead.
    fn get(&self) -> Arc<Vec<E>>;

    /// Replace every row of the collection and notify subscribers
    fn replace_all(&self, rows: Vec<E>);
}

/// Callback invoked with the collection that was just replaced
pub type Listener = Arc<dyn Fn(Collection) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

pub trait Store:
    CollectionStore<School>
    + CollectionStore<Coach>
    + CollectionStore<Athlete>
    + CollectionStore<Group>
    + CollectionStore<Event>
    + Send
    + Sync
{
    /// Typed `get(collection)`: `store.rows::<Athlete>()`
    fn rows<E: Entity>(&self) -> Arc<Vec<E>>
    where
        Self: CollectionStore<E>,
    {
        CollectionStore::<E>::get(self)
    }

    /// All five collections captured together, indexed by id
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot::new(
            self.rows::<School>(),
            self.rows::<Coach>(),
            self.rows::<Athlete>(),
            self.rows::<Group>(),
            self.rows::<Event>(),
        )
    }

    /// Number of times a collection has been replaced
    fn generation(&self, collection: Collection) -> u64;

    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    /// Returns false if the subscription was already gone
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Returns true exactly once per store; the caller that gets true seeds it
    fn begin_seed(&self) -> bool;
}
