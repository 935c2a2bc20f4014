// ============================================================================
// NOTIFICATIONS - Single-slot toast with auto-hide
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{Duration, Utc};

use crate::models::{Toast, ToastKind};
use crate::services::{ScheduledTask, Scheduler};
use crate::state::ChangeNotifier;

#[derive(Default)]
struct NotificationInner {
    toast: Option<Toast>,
    hide_timer: Option<ScheduledTask>,
}

#[derive(Clone)]
pub struct NotificationEmitter {
    scheduler: Rc<dyn Scheduler>,
    duration_ms: u32,
    inner: Rc<RefCell<NotificationInner>>,
    changes: ChangeNotifier,
}

impl NotificationEmitter {
    pub fn new(scheduler: Rc<dyn Scheduler>, duration_ms: u32, changes: ChangeNotifier) -> Self {
        Self {
            scheduler,
            duration_ms,
            inner: Rc::new(RefCell::new(NotificationInner::default())),
            changes,
        }
    }

    /// Replace the active toast and re-arm the hide timer
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        let message = message.into();
        match kind {
            ToastKind::Success => log::info!("[TOAST] {}", message),
            ToastKind::Error => log::warn!("[TOAST] {}", message),
        }

        let toast = Toast {
            message,
            kind,
            visible: true,
            visible_until: Utc::now() + Duration::milliseconds(i64::from(self.duration_ms)),
        };

        let weak: Weak<RefCell<NotificationInner>> = Rc::downgrade(&self.inner);
        let changes = self.changes.clone();
        let timer = self.scheduler.schedule(
            self.duration_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    Self::hide_inner(&inner);
                    changes.notify();
                }
            }),
        );

        let previous_timer = {
            let mut inner = self.inner.borrow_mut();
            inner.toast = Some(toast);
            inner.hide_timer.replace(timer)
        };
        // Cancel outside the borrow
        drop(previous_timer);
        self.changes.notify();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }

    /// Visibility flip only; the text stays until the next toast
    pub fn hide(&self) {
        Self::hide_inner(&self.inner);
        self.changes.notify();
    }

    fn hide_inner(inner: &RefCell<NotificationInner>) {
        if let Some(toast) = inner.borrow_mut().toast.as_mut() {
            toast.visible = false;
        }
    }

    pub fn current(&self) -> Option<Toast> {
        self.inner.borrow().toast.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().toast.as_ref().is_some_and(|t| t.visible)
    }
}
