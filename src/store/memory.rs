use crate::model::{Athlete, Coach, Collection, Entity, Event, Group, School};
use crate::store::{CollectionStore, Listener, Store, SubscriptionId};
use log::debug;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Process-lifetime store holding all five collections.
///
/// Each collection sits behind its own lock as an `Arc<Vec<_>>`, so readers
/// get a cheap immutable snapshot and writers swap the whole vector.
pub struct MemoryStore {
    schools: RwLock<Arc<Vec<School>>>,
    coaches: RwLock<Arc<Vec<Coach>>>,
    athletes: RwLock<Arc<Vec<Athlete>>>,
    groups: RwLock<Arc<Vec<Group>>>,
    events: RwLock<Arc<Vec<Event>>>,
    generations: [AtomicU64; 5],
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
    seeded: AtomicBool,
}

impl MemoryStore {
    /// All collections start empty
    pub fn new() -> Self {
        Self {
            schools: RwLock::new(Arc::new(Vec::new())),
            coaches: RwLock::new(Arc::new(Vec::new())),
            athletes: RwLock::new(Arc::new(Vec::new())),
            groups: RwLock::new(Arc::new(Vec::new())),
            events: RwLock::new(Arc::new(Vec::new())),
            generations: Default::default(),
            listeners: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
            seeded: AtomicBool::new(false),
        }
    }

    fn generation_slot(&self, collection: Collection) -> &AtomicU64 {
        let index = match collection {
            Collection::School => 0,
            Collection::Coach => 1,
            Collection::Athlete => 2,
            Collection::Group => 3,
            Collection::Event => 4,
        };
        &self.generations[index]
    }

    fn swap<E: Entity>(&self, slot: &RwLock<Arc<Vec<E>>>, rows: Vec<E>) {
        let len = rows.len();
        *slot.write() = Arc::new(rows);
        let generation = self.generation_slot(E::COLLECTION).fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "replaced {} collection: {} rows (generation {})",
            E::COLLECTION,
            len,
            generation
        );
        self.notify(E::COLLECTION);
    }

    fn notify(&self, collection: Collection) {
        // Listeners run outside the lock so they may read the store or unsubscribe
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(collection);
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("schools", &self.schools.read().len())
            .field("coaches", &self.coaches.read().len())
            .field("athletes", &self.athletes.read().len())
            .field("groups", &self.groups.read().len())
            .field("events", &self.events.read().len())
            .field("seeded", &self.seeded.load(Ordering::SeqCst))
            .finish()
    }
}

macro_rules! collection_slot {
    ($entity:ty, $field:ident) => {
        impl CollectionStore<$entity> for MemoryStore {
            fn get(&self) -> Arc<Vec<$entity>> {
                self.$field.read().clone()
            }

            fn replace_all(&self, rows: Vec<$entity>) {
                self.swap(&self.$field, rows);
            }
        }
    };
}

collection_slot!(School, schools);
collection_slot!(Coach, coaches);
collection_slot!(Athlete, athletes);
collection_slot!(Group, groups);
collection_slot!(Event, events);

impl Store for MemoryStore {
    fn generation(&self, collection: Collection) -> u64 {
        self.generation_slot(collection).load(Ordering::SeqCst)
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::SeqCst));
        self.listeners.write().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    fn begin_seed(&self) -> bool {
        self.seeded
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}
