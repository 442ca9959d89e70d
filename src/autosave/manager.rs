use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::autosave::debounce::Debouncer;
use crate::docs::types::{Document, Snapshot};
use crate::store::{DocumentStore, StoreError};

/// Quiet period between the last editor change and the write it triggers
pub const SAVE_DEBOUNCE_WINDOW: Duration = Duration::from_millis(1000);

/// How long change notifications stay muted after a load resolves, so the
/// editor can finish replaying restored content without re-arming autosave
pub const POST_LOAD_SETTLE: Duration = Duration::from_millis(100);

type SaveErrorHandler = Arc<dyn Fn(StoreError) + Send + Sync>;

/// The single live editing session
#[derive(Default)]
struct Session {
    active_id: Option<String>,
    name: String,
    created_at: i64,
    pending: Option<Snapshot>,
    loading: bool,
}

struct ManagerInner {
    store: Arc<dyn DocumentStore>,
    session: Mutex<Session>,
    on_save_error: Mutex<Option<SaveErrorHandler>>,
}

/// Coordinates one active document's save/load lifecycle.
///
/// Editor change notifications land in [`on_state_change`], which stages the
/// snapshot and arms a debounced write. While a load is in progress (and for
/// [`POST_LOAD_SETTLE`] after it resolves) notifications are dropped: state
/// restoration replays the loaded content through the same notification
/// path, and those echoes must not overwrite the document that was just
/// read.
///
/// Writes are full-record overwrites keyed by id. A flush racing a natural
/// timer can issue two back-to-back writes for the same id; the last write
/// to commit wins and `updated_at` reflects it.
///
/// [`on_state_change`]: PersistenceManager::on_state_change
pub struct PersistenceManager {
    inner: Arc<ManagerInner>,
    debouncer: Debouncer,
}

impl PersistenceManager {
    /// Manage `store` with the default debounce window
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_window(store, SAVE_DEBOUNCE_WINDOW)
    }

    /// Same as [`new`](PersistenceManager::new) with a custom quiet period
    pub fn with_window(store: Arc<dyn DocumentStore>, window: Duration) -> Self {
        let inner = Arc::new(ManagerInner {
            store,
            session: Mutex::new(Session::default()),
            on_save_error: Mutex::new(None),
        });

        let save_target = inner.clone();
        let debouncer = Debouncer::new(window, move || {
            let inner = save_target.clone();
            async move { inner.run_save().await }
        });

        PersistenceManager { inner, debouncer }
    }

    /// Register a callback for write failures. Failed autosaves are logged
    /// and reported here; they are never surfaced through
    /// [`on_state_change`](PersistenceManager::on_state_change).
    pub fn on_save_error<F>(&self, handler: F)
    where
        F: Fn(StoreError) + Send + Sync + 'static,
    {
        *self.inner.on_save_error.lock().unwrap() = Some(Arc::new(handler));
    }

    /// Start a fresh session and return its new document id.
    ///
    /// Nothing is written until the first change notification arrives.
    pub fn create_session(&self, name: Option<String>) -> String {
        let id = self.inner.store.generate_id();

        let mut session = self.inner.session.lock().unwrap();
        *session = Session {
            active_id: Some(id.clone()),
            name: name.unwrap_or_else(|| "Untitled".to_string()),
            created_at: now_millis(),
            pending: None,
            loading: false,
        };

        id
    }

    /// Load `id` and make it the active session.
    ///
    /// Change notifications are muted from the moment the read is issued
    /// until [`POST_LOAD_SETTLE`] after it resolves. A missing id returns
    /// `Ok(None)` and leaves the current session in place; a storage error
    /// propagates without mutating session state.
    pub async fn load_session(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.session.lock().unwrap().loading = true;

        let result = self.inner.store.load(id).await;

        if let Ok(Some(doc)) = &result {
            let mut session = self.inner.session.lock().unwrap();
            session.active_id = Some(doc.id.clone());
            session.name = doc.name.clone();
            session.created_at = doc.created_at;
            session.pending = Some(Snapshot {
                content: doc.content.clone(),
            });
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(POST_LOAD_SETTLE).await;
            inner.session.lock().unwrap().loading = false;
        });

        result
    }

    /// Record a change notification from the editor and arm the debounced
    /// save. Dropped while a load is settling or when no session is active.
    pub fn on_state_change(&self, snapshot: Snapshot) {
        {
            let mut session = self.inner.session.lock().unwrap();
            if session.loading || session.active_id.is_none() {
                return;
            }
            session.pending = Some(snapshot);
        }

        self.debouncer.schedule();
    }

    /// Rename the active document. The new name is persisted with the next
    /// write; a write still requires staged content.
    pub fn rename_session(&self, name: impl Into<String>) {
        let dirty = {
            let mut session = self.inner.session.lock().unwrap();
            if session.loading || session.active_id.is_none() {
                return;
            }
            session.name = name.into();
            session.pending.is_some()
        };

        if dirty {
            self.debouncer.schedule();
        }
    }

    /// Write the staged snapshot now, skipping the quiet period, and wait
    /// for the write to settle. A no-op when there is nothing to write.
    pub async fn force_save(&self) {
        let _ = self.debouncer.flush().await;
    }

    /// Abandon the current session without saving. A debounce timer that
    /// fires afterwards hits the save guards and writes nothing.
    pub fn close_session(&self) {
        let mut session = self.inner.session.lock().unwrap();
        *session = Session::default();
    }

    /// Id of the active document, if a session is live
    pub fn active_id(&self) -> Option<String> {
        self.inner.session.lock().unwrap().active_id.clone()
    }

    /// True while a load (plus its settle window) is in progress
    pub fn is_loading(&self) -> bool {
        self.inner.session.lock().unwrap().loading
    }
}

impl ManagerInner {
    /// The debounced effect: write the staged snapshot as a full record.
    ///
    /// Guarded rather than rejecting: no session, no staged content, or a
    /// load in flight all make this a silent no-op. The staged snapshot is
    /// not consumed; repeating the write is an idempotent overwrite.
    async fn run_save(&self) {
        let record = {
            let session = self.session.lock().unwrap();
            if session.loading {
                return;
            }
            let (Some(id), Some(pending)) = (&session.active_id, &session.pending) else {
                return;
            };

            Document {
                id: id.clone(),
                name: session.name.clone(),
                content: pending.content.clone(),
                created_at: session.created_at,
                updated_at: now_millis(),
            }
        };

        if let Err(err) = self.store.save(&record).await {
            log::warn!("autosave for {} failed: {}", record.id, err);
            let handler = self.on_save_error.lock().unwrap().clone();
            if let Some(handler) = handler {
                handler(err);
            }
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
