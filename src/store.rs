//! In-memory task store partitioned by status.
//!
//! `TaskStore` owns one append-only partition per [`Status`] together with the
//! per-tab counts. All mutation goes through [`TaskStore::insert`], which keeps
//! counts equal to partition lengths, rejects duplicate ids and notifies
//! subscribers exactly once per successful insert.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::{debug, info, warn};

use crate::fields::Status;
use crate::task::Task;

/// Initial tasks keyed by the status tab they belong to.
pub type Seed = BTreeMap<Status, Vec<Task>>;

/// Error type for store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("a task with id {0} already exists")]
    DuplicateId(String),
    #[error("task {0} has no name")]
    BlankName(String),
}

/// Number of tasks per status tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabCounts {
    counts: [usize; 4],
}

impl TabCounts {
    pub fn get(&self, status: Status) -> usize {
        self.counts[status.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn bump(&mut self, status: Status) {
        self.counts[status.index()] += 1;
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Inserted { id: String, status: Status },
}

/// Handle returned by [`TaskStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

pub struct TaskStore {
    partitions: [Vec<Task>; 4],
    counts: TabCounts,
    ids: HashSet<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("partitions", &self.partitions)
            .field("counts", &self.counts)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl TaskStore {
    /// Build a store from seed data.
    ///
    /// The seed key decides which partition a task lands in; a disagreeing
    /// `status` on the task itself is overwritten. Ids must be unique across
    /// the whole seed.
    pub fn initialize(seed: Seed) -> Result<Self, StoreError> {
        let mut store = TaskStore {
            partitions: Default::default(),
            counts: TabCounts::default(),
            ids: HashSet::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        for (status, tasks) in seed {
            for mut task in tasks {
                if task.status != status {
                    warn!(id = %task.id, from = task.status.label(), to = status.label(), "seed task status overridden by its tab");
                    task.status = status;
                }
                store.push(task)?;
            }
        }
        info!(
            open = store.counts.get(Status::Open),
            pending = store.counts.get(Status::Pending),
            in_progress = store.counts.get(Status::InProgress),
            completed = store.counts.get(Status::Completed),
            "task store initialised"
        );
        Ok(store)
    }

    /// Tasks for a tab that is being opened. All partitions are resident, so
    /// this never fetches anything.
    pub fn load_partition(&self, status: Status) -> &[Task] {
        debug!(status = status.label(), len = self.partitions[status.index()].len(), "partition loaded");
        &self.partitions[status.index()]
    }

    /// Tasks currently held for `status`, in arrival order.
    pub fn active_partition(&self, status: Status) -> &[Task] {
        &self.partitions[status.index()]
    }

    /// Append a task to the partition of its status.
    pub fn insert(&mut self, task: Task) -> Result<(), StoreError> {
        let event = StoreEvent::Inserted {
            id: task.id.clone(),
            status: task.status,
        };
        if let Err(e) = self.push(task) {
            warn!(error = %e, "insert rejected");
            return Err(e);
        }
        info!(?event, count = self.counts.get(event_status(&event)), "task inserted");
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
        Ok(())
    }

    pub fn counts(&self) -> TabCounts {
        self.counts
    }

    /// Register a listener for store changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn push(&mut self, task: Task) -> Result<(), StoreError> {
        if task.name.trim().is_empty() {
            return Err(StoreError::BlankName(task.id));
        }
        if !self.ids.insert(task.id.clone()) {
            return Err(StoreError::DuplicateId(task.id));
        }
        let status = task.status;
        self.partitions[status.index()].push(task);
        self.counts.bump(status);
        debug_assert_eq!(self.counts.get(status), self.partitions[status.index()].len());
        Ok(())
    }
}

fn event_status(event: &StoreEvent) -> Status {
    match event {
        StoreEvent::Inserted { status, .. } => *status,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::Priority;
    use crate::seed::sample_seed;

    fn task(id: &str, status: Status) -> Task {
        Task {
            id: id.to_string(),
            priority: Priority::Medium,
            created_by: "Mohamed Rifthy".to_string(),
            task_type: "Bug".to_string(),
            sub_type: "-".to_string(),
            name: "Fix bug".to_string(),
            status,
        }
    }

    fn assert_counts_match(store: &TaskStore) {
        for s in Status::ALL {
            assert_eq!(store.counts().get(s), store.active_partition(s).len(), "count drift for {:?}", s);
        }
    }

    #[test]
    fn test_initialize_from_sample_seed() {
        let store = TaskStore::initialize(sample_seed()).unwrap();
        assert_eq!(store.counts().get(Status::Open), 2);
        assert_eq!(store.counts().get(Status::Pending), 1);
        assert_eq!(store.counts().get(Status::InProgress), 3);
        assert_eq!(store.counts().get(Status::Completed), 1);
        assert_eq!(store.counts().total(), 7);
        assert_counts_match(&store);
    }

    #[test]
    fn test_insert_pending_task_updates_count_and_partition() {
        let mut store = TaskStore::initialize(sample_seed()).unwrap();
        assert_eq!(store.counts().get(Status::Pending), 1);

        store.insert(task("T100", Status::Pending)).unwrap();

        assert_eq!(store.counts().get(Status::Pending), 2);
        let pending = store.load_partition(Status::Pending);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending.last().map(|t| t.id.as_str()), Some("T100"));
        assert_counts_match(&store);
    }

    #[test]
    fn test_insert_preserves_arrival_order() {
        let mut store = TaskStore::initialize(Seed::new()).unwrap();
        for id in ["T3", "T1", "T2"] {
            store.insert(task(id, Status::Open)).unwrap();
        }
        let ids: Vec<&str> = store.active_partition(Status::Open).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T3", "T1", "T2"]);
    }

    #[test]
    fn test_duplicate_id_is_rejected_across_partitions() {
        let mut store = TaskStore::initialize(sample_seed()).unwrap();
        let before = store.counts();

        let err = store.insert(task("T001", Status::Completed)).unwrap_err();

        assert_eq!(err, StoreError::DuplicateId("T001".to_string()));
        assert_eq!(store.counts(), before);
        assert_eq!(store.active_partition(Status::Completed).len(), 1);
        assert_counts_match(&store);
    }

    #[test]
    fn test_duplicate_id_in_seed_fails_initialize() {
        let mut seed = Seed::new();
        seed.insert(Status::Open, vec![task("T1", Status::Open)]);
        seed.insert(Status::Pending, vec![task("T1", Status::Pending)]);
        assert_eq!(
            TaskStore::initialize(seed).unwrap_err(),
            StoreError::DuplicateId("T1".to_string())
        );
    }

    #[test]
    fn test_blank_name_rejected_by_initialize_and_insert() {
        let mut seed = Seed::new();
        seed.insert(Status::Open, vec![Task { name: "  ".to_string(), ..task("T1", Status::Open) }]);
        assert_eq!(TaskStore::initialize(seed).unwrap_err(), StoreError::BlankName("T1".to_string()));

        let mut store = TaskStore::initialize(sample_seed()).unwrap();
        let before = store.counts();
        let err = store.insert(Task { name: String::new(), ..task("T9", Status::Open) }).unwrap_err();
        assert_eq!(err, StoreError::BlankName("T9".to_string()));
        assert_eq!(store.counts(), before);

        // the rejected id stays free
        store.insert(task("T9", Status::Open)).unwrap();
    }

    #[test]
    fn test_seed_key_decides_partition() {
        let mut seed = Seed::new();
        seed.insert(Status::Completed, vec![task("T7", Status::Open)]);
        let store = TaskStore::initialize(seed).unwrap();
        assert!(store.active_partition(Status::Open).is_empty());
        assert_eq!(store.active_partition(Status::Completed)[0].status, Status::Completed);
    }

    #[test]
    fn test_every_task_in_exactly_one_partition() {
        let mut store = TaskStore::initialize(sample_seed()).unwrap();
        let statuses = [Status::Open, Status::InProgress, Status::Open, Status::Completed, Status::Pending];
        for (i, s) in statuses.into_iter().enumerate() {
            store.insert(task(&format!("N{i}"), s)).unwrap();
        }
        let mut seen = HashSet::new();
        let mut total = 0;
        for s in Status::ALL {
            for t in store.active_partition(s) {
                assert_eq!(t.status, s);
                assert!(seen.insert(t.id.clone()), "{} appears twice", t.id);
                total += 1;
            }
        }
        assert_eq!(total, 7 + statuses.len());
        assert_eq!(store.counts().total(), total);
        assert_counts_match(&store);
    }

    #[test]
    fn test_subscribers_notified_once_per_successful_insert() {
        let mut store = TaskStore::initialize(sample_seed()).unwrap();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let sub = store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        store.insert(task("T200", Status::Open)).unwrap();
        let _ = store.insert(task("T200", Status::Open));

        assert_eq!(
            *events.borrow(),
            vec![StoreEvent::Inserted { id: "T200".to_string(), status: Status::Open }]
        );

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.insert(task("T201", Status::Open)).unwrap();
        assert_eq!(events.borrow().len(), 1);
    }
}
