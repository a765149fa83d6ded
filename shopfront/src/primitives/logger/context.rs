use std::cell::RefCell;

thread_local! {
    static LOG_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Scope guard that prefixes log lines on the current thread with `[name]`.
///
/// The previous context is restored on drop, so guards nest.
///
/// # Examples
///
/// ```rust
/// use shopfront::primitives::logger::{get_context, LogContext};
///
/// {
///     let _ctx = LogContext::new("RegistrationFlow");
///     assert_eq!(get_context().as_deref(), Some("[RegistrationFlow]"));
/// }
/// assert_eq!(get_context(), None);
/// ```
pub struct LogContext {
    previous: Option<String>,
}

impl LogContext {
    /// Activates `[name]` until the returned guard is dropped.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let previous = LOG_CONTEXT.with(|ctx| ctx.borrow_mut().replace(format!("[{name}]")));
        Self { previous }
    }
}

impl Drop for LogContext {
    fn drop(&mut self) {
        LOG_CONTEXT.with(|ctx| {
            (*ctx.borrow_mut()).clone_from(&self.previous);
        });
    }
}

/// Gets the current logging context, if any.
#[must_use]
pub fn get_context() -> Option<String> {
    LOG_CONTEXT.with(|ctx| ctx.borrow().clone())
}
