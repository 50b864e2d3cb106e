//! Opaque request context attached to a logger

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased context handle.
///
/// The logger never inspects it; callers get it back through
/// [`Logger::context`](crate::Logger::context) and downcast to their own type.
#[derive(Clone)]
pub struct Context {
    inner: Arc<dyn Any + Send + Sync>,
}

impl Context {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    pub fn from_arc(inner: Arc<dyn Any + Send + Sync>) -> Self {
        Self { inner }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// True when both handles point at the same value.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct RequestId(String);

    #[test]
    fn test_downcast() {
        let ctx = Context::new(RequestId("abc-123".to_string()));
        assert!(ctx.is::<RequestId>());
        assert_eq!(
            ctx.downcast_ref::<RequestId>(),
            Some(&RequestId("abc-123".to_string()))
        );
        assert!(ctx.downcast_ref::<u32>().is_none());
    }

    #[test]
    fn test_clone_shares_value() {
        let ctx = Context::new(7_u32);
        let other = ctx.clone();
        assert!(ctx.ptr_eq(&other));
        assert!(!ctx.ptr_eq(&Context::new(7_u32)));
    }
}
