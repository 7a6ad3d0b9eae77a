//! Collection and rendering of diagnostics raised while parsing and mangling
//! signatures.

pub extern crate error_snippet_derive;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use error_snippet::{Diagnostic, Error, GraphicalRenderer, IntoDiagnostic, Result, SimpleDiagnostic};
use error_snippet::{Renderer, Severity};
pub use error_snippet_derive::Diagnostic;

#[derive(Default)]
struct DiagCtxInner {
    /// All diagnostics which have been pushed to the context, in the order
    /// they were pushed.
    emitted: Vec<Error>,
}

impl DiagCtxInner {
    fn push(&mut self, diag: Error) {
        self.emitted.push(diag);
    }

    fn render_buffer(&self, renderer: &mut impl Renderer) -> Option<String> {
        if self.emitted.is_empty() {
            return None;
        }

        let buffer = self
            .emitted
            .iter()
            .map(|diagnostic| renderer.render(diagnostic.as_ref()).unwrap_or_default())
            .collect::<String>();

        Some(buffer)
    }

    fn count(&self, severity: Severity) -> usize {
        self.emitted.iter().filter(|diag| diag.severity() == severity).count()
    }
}

/// A context which collects diagnostics for the entire lifespan of a single
/// invocation, so they can be rendered together once it finishes.
///
/// Collecting an error does not stop anything by itself; callers decide when
/// to halt by checking [`DiagCtx::is_tainted`].
#[derive(Clone, Default)]
pub struct DiagCtx {
    inner: Arc<Mutex<DiagCtxInner>>,
}

impl DiagCtx {
    pub fn new() -> Self {
        DiagCtx::default()
    }

    fn inner(&self) -> MutexGuard<'_, DiagCtxInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Emits the given diagnostic to the context directly.
    pub fn emit(&self, diag: Error) {
        self.inner().push(diag);
    }

    /// Creates a handle for the context, which buffers diagnostics until it is
    /// pushed.
    pub fn handle(&self) -> DiagCtxHandle {
        DiagCtxHandle {
            inner: Arc::clone(&self.inner),
            emitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Gets the amount of diagnostics with error severity in the context.
    pub fn error_count(&self) -> usize {
        self.inner().count(Severity::Error)
    }

    /// Determines whether the context has been tainted with one-or-more
    /// errors.
    pub fn is_tainted(&self) -> bool {
        self.error_count() > 0
    }

    /// Renders all the stored diagnostics to the standard error output
    /// (`stderr`).
    pub fn render_stderr(&self, renderer: &mut impl Renderer) {
        if let Some(buffer) = self.render_buffer(renderer) {
            eprint!("{buffer}");
        }
    }

    /// Renders all the stored diagnostics into a [`String`].
    pub fn render_buffer(&self, renderer: &mut impl Renderer) -> Option<String> {
        self.inner().render_buffer(renderer)
    }

    /// Invokes the given closure with a fresh handle, pushing everything it
    /// emitted into the context once the closure returns.
    pub fn with_none(&self, f: impl FnOnce(DiagCtxHandle)) {
        let handle = self.handle();
        f(handle.clone());

        handle.push();
    }
}

/// A buffering handle to a parent [`DiagCtx`].
///
/// Diagnostics emitted through the handle are only visible in the parent once
/// the handle has been pushed.
#[derive(Clone)]
pub struct DiagCtxHandle {
    inner: Arc<Mutex<DiagCtxInner>>,
    emitted: Arc<Mutex<Vec<Error>>>,
}

impl DiagCtxHandle {
    /// Emits the given diagnostic into the buffer of the handle.
    pub fn emit(&self, diag: Error) {
        self.emitted.lock().unwrap_or_else(PoisonError::into_inner).push(diag);
    }

    /// Moves all the buffered diagnostics into the parent context.
    pub fn push(&self) {
        let mut emitted = self.emitted.lock().unwrap_or_else(PoisonError::into_inner);
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        for diag in emitted.drain(..) {
            inner.push(diag);
        }
    }
}

pub trait MapDiagnostic<T> {
    /// If the instance is a [`std::result::Result::Err`], maps it into
    /// an instance of [`Diagnostic`] (via
    /// [`IntoDiagnostic::into_diagnostic`]).
    fn map_diagnostic(self) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync> MapDiagnostic<T> for std::result::Result<T, E> {
    fn map_diagnostic(self) -> Result<T> {
        self.map_err(IntoDiagnostic::into_diagnostic)
    }
}
