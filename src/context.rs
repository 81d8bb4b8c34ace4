use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Ambient per-request state passed through middleware into handlers.
///
/// The mux never reads it. Middleware may derive a new context with
/// [`Context::with_value`] or [`Context::with_deadline`] and hand that to
/// `next` instead.
#[derive(Clone, Default)]
pub struct Context {
    cancel: CancelToken,
    deadline: Option<Instant>,
    values: Option<Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>,
}

/// A shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release)
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self {
            cancel,
            ..Self::default()
        }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancelled explicitly or past the deadline.
    pub fn is_cancelled(&self) -> bool {
        if self.cancel.is_cancelled() {
            return true;
        }
        match self.deadline {
            Some(d) => Instant::now() >= d,
            None => false,
        }
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(d) => d.min(deadline),
            None => deadline,
        };
        Self {
            deadline: Some(deadline),
            ..self.clone()
        }
    }

    /// Returns a copy of this context carrying `value`, replacing any value
    /// of the same type.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut map = match self.values {
            Some(ref m) => HashMap::clone(m),
            None => HashMap::new(),
        };
        map.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            values: Some(Arc::new(map)),
            ..self.clone()
        }
    }

    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        let v = self.values.as_ref()?.get(&TypeId::of::<T>())?;
        (**v).downcast_ref::<T>()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("deadline", &self.deadline)
            .field("values", &self.values.as_ref().map_or(0, |m| m.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn values_are_scoped() {
        let root = Context::new();
        let child = root.with_value(7_u32).with_value("user");
        assert_eq!(root.value::<u32>(), None);
        assert_eq!(child.value::<u32>(), Some(&7));
        assert_eq!(child.value::<&str>(), Some(&"user"));

        let replaced = child.with_value(8_u32);
        assert_eq!(replaced.value::<u32>(), Some(&8));
        assert_eq!(child.value::<u32>(), Some(&7));
    }

    #[test]
    fn cancellation_is_shared() {
        let token = CancelToken::new();
        let cx = Context::with_cancel(token.clone()).with_value(1_u8);
        assert!(!cx.is_cancelled());
        token.cancel();
        assert!(cx.is_cancelled());
    }

    #[test]
    fn deadline_only_shrinks() {
        let now = Instant::now();
        let cx = Context::new().with_deadline(now + Duration::from_secs(60));
        let cx = cx.with_deadline(now + Duration::from_secs(120));
        assert_eq!(cx.deadline(), Some(now + Duration::from_secs(60)));

        let expired = Context::new().with_deadline(now);
        assert!(expired.is_cancelled());
    }
}
