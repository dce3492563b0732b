use std::future::Future;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use models::{AuthenticatedSession, ValidationError};
use service::SessionError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// What a screen shows. `Idle` is the initial state and the only one `reset` reaches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Idle,
    Loading,
    Success(AuthenticatedSession),
    Error(String),
}

impl ScreenState {
    /// For views that disable their submit button while a call is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }

    fn label(&self) -> &'static str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::Loading => "loading",
            ScreenState::Success(_) => "success",
            ScreenState::Error(_) => "error",
        }
    }
}

/// Result of a submit call
#[derive(Debug)]
pub enum Submission {
    /// Input was valid; the task drives the state to `Success` or `Error`.
    Started(JoinHandle<()>),
    /// Input failed local validation; the state is now `Error`.
    Invalid(ValidationError),
    /// A request is already in flight or finished; nothing changed.
    Ignored,
}

impl Submission {
    /// Wait for the remote call, if one was started.
    pub async fn finish(self) {
        if let Submission::Started(handle) = self {
            if let Err(e) = handle.await {
                debug!(error = %e, "submit task aborted");
            }
        }
    }
}

enum Admission {
    Accepted(u64),
    Rejected(ValidationError),
    Busy,
}

/// Owns one screen's state sender. Transitions are serialized on the sender,
/// so two submits can never both leave `Idle` or `Error`.
pub struct ScreenMachine {
    screen: &'static str,
    shared: Arc<Shared>,
}

/// Only mutated inside the sender's modify closures, so a generation check
/// and the write it guards are one step.
struct Shared {
    tx: watch::Sender<ScreenState>,
    /// Bumped by `reset` and by every accepted submit. A call publishes only
    /// while its generation is still current.
    generation: AtomicU64,
}

impl ScreenMachine {
    pub fn new(screen: &'static str) -> Self {
        let (tx, _rx) = watch::channel(ScreenState::Idle);
        Self { screen, shared: Arc::new(Shared { tx, generation: AtomicU64::new(0) }) }
    }

    pub fn state(&self) -> watch::Receiver<ScreenState> {
        self.shared.tx.subscribe()
    }

    pub fn current(&self) -> ScreenState {
        self.shared.tx.borrow().clone()
    }

    /// Back to `Idle`. A call still in flight loses its right to publish.
    pub fn reset(&self) {
        let mut prev = ScreenState::Idle;
        self.shared.tx.send_modify(|state| {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            prev = mem::replace(state, ScreenState::Idle);
        });
        debug!(screen = self.screen, from = prev.label(), to = "idle", "screen_transition");
    }

    /// Validate and start `call` unless the screen is busy.
    ///
    /// Must be called inside a tokio runtime. The spawned task keeps only a
    /// weak handle on the state, so dropping the machine discards the result.
    pub fn submit<V, C, Fut>(&self, validate: V, call: C, fallback: &'static str) -> Submission
    where
        V: FnOnce() -> Result<(), ValidationError>,
        C: FnOnce() -> Fut,
        Fut: Future<Output = Result<AuthenticatedSession, SessionError>> + Send + 'static,
    {
        let mut admission = Admission::Busy;
        self.shared.tx.send_if_modified(|state| match state {
            ScreenState::Loading | ScreenState::Success(_) => false,
            ScreenState::Idle | ScreenState::Error(_) => {
                match validate() {
                    Ok(()) => {
                        *state = ScreenState::Loading;
                        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
                        admission = Admission::Accepted(generation);
                    }
                    Err(e) => {
                        *state = ScreenState::Error(e.to_string());
                        admission = Admission::Rejected(e);
                    }
                }
                true
            }
        });

        match admission {
            Admission::Busy => {
                debug!(screen = self.screen, "submit ignored while busy");
                Submission::Ignored
            }
            Admission::Rejected(e) => {
                debug!(screen = self.screen, error = %e, "submit rejected by validation");
                Submission::Invalid(e)
            }
            Admission::Accepted(generation) => {
                debug!(screen = self.screen, to = "loading", generation, "screen_transition");
                let weak = Arc::downgrade(&self.shared);
                let screen = self.screen;
                let fut = call();
                Submission::Started(tokio::spawn(async move {
                    let next = match fut.await {
                        Ok(session) => ScreenState::Success(session),
                        Err(e) => ScreenState::Error(e.user_message().unwrap_or_else(|| fallback.to_string())),
                    };
                    let Some(shared) = weak.upgrade() else {
                        debug!(screen, "screen dropped, result discarded");
                        return;
                    };
                    let to = next.label();
                    let published = shared.tx.send_if_modified(|state| {
                        if shared.generation.load(Ordering::SeqCst) != generation {
                            return false;
                        }
                        *state = next;
                        true
                    });
                    if published {
                        debug!(screen, to, "screen_transition");
                    } else {
                        debug!(screen, generation, "stale result discarded");
                    }
                }))
            }
        }
    }
}
