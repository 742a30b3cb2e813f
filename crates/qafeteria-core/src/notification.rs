// ── Notification presenter ──
//
// One transient message per view. `show` replaces whatever is on screen and
// arms a fresh dismiss timer; the previous timer is released at that moment,
// so at most one timer is ever live. Teardown cancels the presenter's scope:
// pending timers die with it and later calls become no-ops.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::sync::lock;

/// Category of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

/// What the notification surface renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationState {
    pub message: String,
    pub level: NotificationLevel,
    pub visible: bool,
}

type HideCallback = Arc<dyn Fn() + Send + Sync>;

/// Cloneable handle to one view's notification slot.
#[derive(Clone)]
pub struct NotificationPresenter {
    inner: Arc<PresenterInner>,
}

struct PresenterInner {
    element_id: &'static str,
    duration: Duration,
    state: watch::Sender<NotificationState>,
    slot: Mutex<Slot>,
    on_hide: Mutex<Option<HideCallback>>,
    scope: CancellationToken,
}

#[derive(Default)]
struct Slot {
    /// Bumped on every `show`; a timer only hides its own generation.
    generation: u64,
    timer: Option<DismissTimer>,
}

/// Pending auto-dismiss. Dropping the handle cancels the timer.
struct DismissTimer {
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl NotificationPresenter {
    /// A presenter for the toast element `element_id`.
    pub fn new(element_id: &'static str, duration: Duration) -> Self {
        let (state, _) = watch::channel(NotificationState::default());
        Self {
            inner: Arc::new(PresenterInner {
                element_id,
                duration,
                state,
                slot: Mutex::new(Slot::default()),
                on_hide: Mutex::new(None),
                scope: CancellationToken::new(),
            }),
        }
    }

    pub fn element_id(&self) -> &'static str {
        self.inner.element_id
    }

    pub fn current(&self) -> NotificationState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationState> {
        self.inner.state.subscribe()
    }

    /// Register the callback invoked once per dismissal.
    pub fn set_on_hide(&self, callback: impl Fn() + Send + Sync + 'static) {
        *lock(&self.inner.on_hide) = Some(Arc::new(callback));
    }

    /// Replace the current notification and restart the dismiss timer.
    ///
    /// Must be called from within a tokio runtime for the timer to arm;
    /// outside one the notification stays until dismissed.
    pub fn show(&self, message: impl Into<String>, level: NotificationLevel) {
        if self.inner.scope.is_cancelled() {
            debug!(element = self.inner.element_id, "presenter torn down, dropping notification");
            return;
        }

        let message = message.into();
        debug!(element = self.inner.element_id, %level, %message, "showing notification");

        let mut slot = lock(&self.inner.slot);
        slot.generation = slot.generation.wrapping_add(1);
        // Assigning drops the previous handle, which cancels its timer.
        slot.timer = self.arm(slot.generation);
        self.inner.state.send_replace(NotificationState {
            message,
            level,
            visible: true,
        });
    }

    /// Hide the current notification.
    ///
    /// Returns `false` when nothing was visible; the callback only runs
    /// when something was actually hidden.
    pub fn dismiss(&self) -> bool {
        self.hide(None)
    }

    /// Release the timer and refuse further notifications.
    pub fn teardown(&self) {
        self.inner.scope.cancel();
        let timer = lock(&self.inner.slot).timer.take();
        drop(timer);
        self.inner.state.send_if_modified(|state| {
            let was_visible = state.visible;
            state.visible = false;
            was_visible
        });
        debug!(element = self.inner.element_id, "notification presenter torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.scope.is_cancelled()
    }

    /// Lifetime of the view that owns this presenter. Cancelled on teardown.
    pub(crate) fn view_scope(&self) -> CancellationToken {
        self.inner.scope.clone()
    }

    fn arm(&self, generation: u64) -> Option<DismissTimer> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(element = self.inner.element_id, "no runtime, notification will not auto-dismiss");
            return None;
        };

        let cancel = self.inner.scope.child_token();
        let token = cancel.clone();
        let weak: Weak<PresenterInner> = Arc::downgrade(&self.inner);
        let duration = self.inner.duration;

        let task = handle.spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(duration) => {
                    if let Some(inner) = weak.upgrade() {
                        NotificationPresenter { inner }.hide(Some(generation));
                    }
                }
            }
        });

        Some(DismissTimer {
            cancel,
            _task: task,
        })
    }

    fn hide(&self, generation: Option<u64>) -> bool {
        let mut slot = lock(&self.inner.slot);
        if generation.is_some_and(|g| g != slot.generation) {
            return false;
        }

        let hidden = self.inner.state.send_if_modified(|state| {
            let was_visible = state.visible;
            state.visible = false;
            was_visible
        });
        let timer = slot.timer.take();
        drop(slot);
        drop(timer);

        if hidden {
            debug!(element = self.inner.element_id, "notification dismissed");
            let callback = lock(&self.inner.on_hide).clone();
            if let Some(callback) = callback {
                callback();
            }
        }
        hidden
    }
}

impl std::fmt::Debug for NotificationPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPresenter")
            .field("element_id", &self.inner.element_id)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn presenter_with_counter() -> (NotificationPresenter, Arc<AtomicUsize>) {
        let presenter = NotificationPresenter::new("login-toast", Duration::from_millis(3000));
        let hidden = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hidden);
        presenter.set_on_hide(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (presenter, hidden)
    }

    #[tokio::test(start_paused = true)]
    async fn auto_dismisses_after_duration() {
        let (presenter, hidden) = presenter_with_counter();
        presenter.show("Login realizado com sucesso!", NotificationLevel::Success);
        assert!(presenter.current().visible);

        sleep(Duration::from_millis(2999)).await;
        assert!(presenter.current().visible);

        sleep(Duration::from_millis(2)).await;
        let state = presenter.current();
        assert!(!state.visible);
        assert_eq!(state.message, "Login realizado com sucesso!");
        assert_eq!(hidden.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reshow_replaces_message_and_restarts_timer() {
        let (presenter, hidden) = presenter_with_counter();
        presenter.show("first", NotificationLevel::Error);
        sleep(Duration::from_millis(1000)).await;
        presenter.show("second", NotificationLevel::Warning);

        let state = presenter.current();
        assert_eq!(state.message, "second");
        assert_eq!(state.level, NotificationLevel::Warning);

        // The first timer would have fired at t=3000.
        sleep(Duration::from_millis(2500)).await;
        assert!(presenter.current().visible);
        assert_eq!(hidden.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(1000)).await;
        assert!(!presenter.current().visible);
        assert_eq!(hidden.load(Ordering::SeqCst), 1);

        sleep(Duration::from_millis(10_000)).await;
        assert_eq!(hidden.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_dismiss_fires_callback_once() {
        let (presenter, hidden) = presenter_with_counter();
        presenter.show("hello", NotificationLevel::Info);

        assert!(presenter.dismiss());
        assert!(!presenter.dismiss());

        sleep(Duration::from_millis(5000)).await;
        assert_eq!(hidden.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_timer_and_ignores_later_shows() {
        let (presenter, hidden) = presenter_with_counter();
        presenter.show("pending", NotificationLevel::Info);
        presenter.teardown();
        assert!(!presenter.current().visible);

        presenter.show("after teardown", NotificationLevel::Error);
        assert_eq!(presenter.current().message, "pending");
        assert!(!presenter.current().visible);

        sleep(Duration::from_millis(5000)).await;
        assert_eq!(hidden.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_replacement() {
        let (presenter, _) = presenter_with_counter();
        let mut rx = presenter.subscribe();
        presenter.show("one", NotificationLevel::Info);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().message, "one");
    }

    #[test]
    fn show_without_runtime_stays_visible() {
        let presenter = NotificationPresenter::new("home-toast", Duration::from_millis(10));
        presenter.show("no runtime", NotificationLevel::Info);
        assert!(presenter.current().visible);
        assert!(presenter.dismiss());
    }
}
