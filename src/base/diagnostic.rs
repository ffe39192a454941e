use std::{
    cell::{Cell, RefCell},
    fmt::Display,
    sync::Arc,
};

use super::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::SourceFile,
    Error,
};

/// Represents a trait responsible for handling diagnostics in the scanner.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive(&self, error: T);
}

impl<T, H: Handler<T> + ?Sized> Handler<T> for &H {
    fn receive(&self, error: T) {
        (**self).receive(error);
    }
}

/// Prints every received error to stderr.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
    source_file: Option<Arc<SourceFile>>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`] that prints bare messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`PrintHandler`] that also shows where in `source_file` an error happened.
    #[must_use]
    pub fn with_source(source_file: Arc<SourceFile>) -> Self {
        Self {
            printed: Cell::new(false),
            source_file: Some(source_file),
        }
    }

    /// Whether the handler has printed anything yet.
    #[must_use]
    pub fn has_printed(&self) -> bool {
        self.printed.get()
    }
}

impl Handler<Error> for PrintHandler {
    fn receive(&self, error: Error) {
        match (&self.source_file, error.offset()) {
            (Some(source_file), Some(offset)) => {
                eprintln!(
                    "{}\n{}",
                    Message::new(Severity::Error, &error),
                    SourceCodeDisplay::new(source_file, offset, Option::<&str>::None)
                );
            }
            _ => eprintln!("{}", Message::new(Severity::Error, &error)),
        }
        self.printed.set(true);
    }
}

impl Handler<crate::lexical::Error> for PrintHandler {
    fn receive(&self, error: crate::lexical::Error) {
        Handler::<Error>::receive(self, error.into());
    }
}

/// Counts received errors without printing them.
#[derive(Debug, Default)]
pub struct SilentHandler {
    received: Cell<usize>,
}

impl SilentHandler {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors received so far.
    #[must_use]
    pub fn received(&self) -> usize {
        self.received.get()
    }

    /// Whether any error was received.
    #[must_use]
    pub fn has_received(&self) -> bool {
        self.received.get() > 0
    }
}

impl<T> Handler<T> for SilentHandler {
    fn receive(&self, _error: T) {
        self.received.set(self.received.get() + 1);
    }
}

/// Discards every error.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive(&self, _error: T) {}
}

/// Collects every received error in order.
#[derive(Debug)]
pub struct CollectHandler<T> {
    errors: RefCell<Vec<T>>,
}

impl<T> Default for CollectHandler<T> {
    fn default() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }
}

impl<T> CollectHandler<T> {
    /// Creates a new, empty [`CollectHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Whether no error was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Consumes the handler and returns the collected errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<T> {
        self.errors.into_inner()
    }
}

impl<T: Clone> CollectHandler<T> {
    /// Returns a copy of the collected errors.
    #[must_use]
    pub fn errors(&self) -> Vec<T> {
        self.errors.borrow().clone()
    }
}

impl<T> Handler<T> for CollectHandler<T> {
    fn receive(&self, error: T) {
        self.errors.borrow_mut().push(error);
    }
}

impl<T: Display> Display for CollectHandler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for error in self.errors.borrow().iter() {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::error::IllegalNul;

    #[test]
    fn test_silent_handler_counts() {
        let handler = SilentHandler::new();
        assert!(!handler.has_received());

        handler.receive("first");
        handler.receive("second");

        assert_eq!(handler.received(), 2);
    }

    #[test]
    fn test_collect_handler_keeps_order() {
        let handler = CollectHandler::new();
        handler.receive(1);
        handler.receive(2);

        assert_eq!(handler.len(), 2);
        assert_eq!(handler.into_errors(), vec![1, 2]);
    }

    #[test]
    fn test_print_handler_records_printing() {
        let handler = PrintHandler::new();
        assert!(!handler.has_printed());

        Handler::<crate::lexical::Error>::receive(&handler, IllegalNul { offset: 0 }.into());

        assert!(handler.has_printed());
    }
}
