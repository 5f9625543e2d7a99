use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use crate::{CheckKind, CheckRecord, Location, TestFailure, Unwind, context};

type HookFn = dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static;

/// Scoped interception of panics during a test run.
///
/// While installed, the default panic hook's backtrace printing is
/// suppressed entirely — the scheduler loop already turns every panic into a
/// structured result, so raw backtraces on stderr would just be noise
/// alongside the framework's own report. A panic whose payload is neither
/// [`Unwind`] nor [`TestFailure`] — i.e. one raised by a dependency's own
/// `assert!` rather than by this crate's macros — is additionally folded
/// into a `require`-kind [`CheckRecord`] on the active context before the
/// unwind continues. The previous hook is restored on drop regardless of how
/// the scope exits.
///
/// The interception slot is process-wide (`std::panic::set_hook` has no
/// thread-local variant), so only one guard should be installed at a time.
pub struct HardAssertGuard {
    previous: Option<Arc<HookFn>>,
}

impl HardAssertGuard {
    /// Installs the interception, saving the currently installed hook.
    pub fn install() -> Self {
        let previous: Arc<HookFn> = Arc::from(panic::take_hook());
        panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<Unwind>().is_none()
                && info.payload().downcast_ref::<TestFailure>().is_none()
            {
                record_platform_assertion(info);
            }
        }));
        Self { previous: Some(previous) }
    }
}

impl Drop for HardAssertGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(Box::new(move |info| previous(info)));
        }
    }
}

fn record_platform_assertion(info: &PanicHookInfo<'_>) {
    let message = panic_message(info);
    // `PanicHookInfo::location` borrows from the panic machinery rather than
    // returning `&'static str`, even though the underlying data is baked
    // into the binary; we don't have a way to reclaim `'static` here without
    // leaking, so the line number is kept and the file name is not.
    let location = Location { file: "<platform assertion>", line: info.location().map_or(0, |l| l.line()) };
    context::try_with_current(|ctx| {
        // `publish_check` is used directly rather than going through
        // `context::publish`: we are already unwinding, and panicking again
        // here (the normal path for a failed require) would abort the
        // process instead of finishing the current unwind.
        ctx.publish_check(CheckRecord {
            kind: CheckKind::Require,
            op: None,
            expr_text: "<platform assertion>".into(),
            passed: false,
            location,
            extra_lines: vec![message],
            expanded: "'<platform assertion>' failed".into(),
        });
    });
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "platform assertion failed".to_string()
    }
}
