// crates/sample-harness-core/src/runtime/capture.rs
// ============================================================================
// Module: Output Capture
// Description: Scoped redirection of the harness stdout into memory.
// Purpose: Collect everything a sample prints during one invocation.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Samples write through [`stdout`] (or the `sample_print!` macros). While a
//! [`CaptureScope`] is open on the current thread, those writes land in the
//! scope's buffer; otherwise they pass through to the process stdout.
//!
//! Scopes nest: the innermost open scope receives writes, and closing it
//! resumes the enclosing one. Scopes are per-thread, so concurrent threads
//! never observe each other's output.
//!
//! Invariants:
//! - Every scope is released on drop, including during unwinding.
//! - A finished scope yields an immutable [`CapturedOutput`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::Cell;
use std::cell::RefCell;
use std::io;
use std::io::Write;
use std::marker::PhantomData;

use crate::core::CapturedOutput;

// ============================================================================
// SECTION: Thread State
// ============================================================================

thread_local! {
    /// Open capture buffers for this thread, innermost last.
    static CAPTURE_STACK: RefCell<Vec<(u64, Vec<u8>)>> = const { RefCell::new(Vec::new()) };
    /// Number of scopes opened on this thread; doubles as the id source.
    static SCOPES_OPENED: Cell<u64> = const { Cell::new(0) };
}

// ============================================================================
// SECTION: Capture Scope
// ============================================================================

/// RAII guard for one capture scope.
///
/// # Invariants
/// - Bound to the thread that opened it (`!Send`).
/// - Its buffer is removed from the thread stack exactly once.
#[derive(Debug)]
pub struct CaptureScope {
    /// Identifier of this scope's buffer on the thread stack.
    id: u64,
    /// Set once the buffer has been taken by [`CaptureScope::finish`].
    finished: bool,
    /// Keeps the guard on its opening thread.
    _not_send: PhantomData<*const ()>,
}

impl CaptureScope {
    /// Opens a new scope; writes to [`stdout`] are buffered until it ends.
    #[must_use]
    pub fn begin() -> Self {
        let id = SCOPES_OPENED.with(|opened| {
            let next = opened.get().wrapping_add(1);
            opened.set(next);
            next
        });
        CAPTURE_STACK.with(|stack| stack.borrow_mut().push((id, Vec::new())));
        Self {
            id,
            finished: false,
            _not_send: PhantomData,
        }
    }

    /// Ends the scope and returns everything written while it was innermost.
    #[must_use]
    pub fn finish(mut self) -> CapturedOutput {
        self.finished = true;
        CapturedOutput::from_bytes(release(self.id))
    }
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        if !self.finished {
            let _ = release(self.id);
        }
    }
}

/// Removes the buffer with `id` from the thread stack and returns its bytes.
fn release(id: u64) -> Vec<u8> {
    CAPTURE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack
            .iter()
            .rposition(|(scope_id, _)| *scope_id == id)
            .map(|index| stack.remove(index).1)
            .unwrap_or_default()
    })
}

// ============================================================================
// SECTION: Harness Stdout
// ============================================================================

/// Write handle for sample output.
///
/// Routes to the innermost open capture scope on the current thread, or to
/// the process stdout when no scope is open.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarnessStdout;

/// Returns the harness stdout handle.
#[must_use]
pub const fn stdout() -> HarnessStdout {
    HarnessStdout
}

impl Write for HarnessStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let captured = CAPTURE_STACK.with(|stack| {
            stack.borrow_mut().last_mut().map(|(_, buffer)| buffer.extend_from_slice(buf)).is_some()
        });
        if captured { Ok(buf.len()) } else { io::stdout().write(buf) }
    }

    fn flush(&mut self) -> io::Result<()> {
        if is_capturing() { Ok(()) } else { io::stdout().flush() }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when a capture scope is open on the current thread.
#[must_use]
pub fn is_capturing() -> bool {
    capture_depth() > 0
}

/// Returns the number of open capture scopes on the current thread.
#[must_use]
pub fn capture_depth() -> usize {
    CAPTURE_STACK.with(|stack| stack.borrow().len())
}

/// Returns how many capture scopes have been opened on the current thread.
#[must_use]
pub fn scopes_opened() -> u64 {
    SCOPES_OPENED.with(Cell::get)
}

/// Runs `action` inside a fresh capture scope.
///
/// The scope is released even if `action` panics.
pub fn with_captured_output<T>(action: impl FnOnce() -> T) -> (T, CapturedOutput) {
    let scope = CaptureScope::begin();
    let value = action();
    (value, scope.finish())
}

/// Runs a fallible `action` inside a fresh capture scope.
///
/// The scope is released before an error is returned; output written before
/// the failure is discarded.
///
/// # Errors
///
/// Returns the error produced by `action`.
pub fn try_with_captured_output<T, E>(
    action: impl FnOnce() -> Result<T, E>,
) -> Result<(T, CapturedOutput), E> {
    let scope = CaptureScope::begin();
    match action() {
        Ok(value) => Ok((value, scope.finish())),
        Err(err) => {
            drop(scope);
            Err(err)
        }
    }
}
