//! Exclusive editing of the shared program model.
//!
//! Responsibilities:
//! - Own the host's mutable model (any [`TargetLocation`]) behind a lock.
//! - Hand out scoped [`WriteSession`]s; a session is released when it goes out of scope,
//!   whether the edit succeeded, failed or panicked.
//! - Serialize concurrent generation requests against the same model.

mod error;

pub use error::{EditError, EditResult};

use buildergen_domain::TargetLocation;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, TryLockError};
use std::time::Instant;
use tracing::{debug, warn};

/// The shared, mutable program model a generation request edits.
#[derive(Debug)]
pub struct ProgramModel<L> {
    name: String,
    location: Mutex<L>,
}

impl<L: TargetLocation> ProgramModel<L> {
    pub fn new(location: L) -> Self {
        Self {
            name: location.describe(),
            location: Mutex::new(location),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block until exclusive access is granted.
    pub fn begin_write(&self, label: &str) -> EditResult<WriteSession<'_, L>> {
        let guard = self.location.lock().map_err(|_| self.poisoned())?;
        Ok(WriteSession::open(guard, label, &self.name))
    }

    /// Like [`begin_write`](Self::begin_write) but fails with [`EditError::Busy`] instead
    /// of waiting.
    pub fn try_begin_write(&self, label: &str) -> EditResult<WriteSession<'_, L>> {
        match self.location.try_lock() {
            Ok(guard) => Ok(WriteSession::open(guard, label, &self.name)),
            Err(TryLockError::WouldBlock) => Err(EditError::Busy {
                model: self.name.clone(),
            }),
            Err(TryLockError::Poisoned(_)) => Err(self.poisoned()),
        }
    }

    /// Run `edit` inside a write session.
    pub fn write<T, E>(
        &self,
        label: &str,
        edit: impl FnOnce(&mut L) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<EditError>,
    {
        let mut session = self.begin_write(label)?;
        let out = edit(&mut session);
        if out.is_err() {
            session.mark_failed();
        }
        out
    }

    /// Shared read access, e.g. to inspect the model after a request.
    pub fn read<T>(&self, inspect: impl FnOnce(&L) -> T) -> EditResult<T> {
        let guard = self.location.lock().map_err(|_| self.poisoned())?;
        Ok(inspect(&guard))
    }

    pub fn into_inner(self) -> EditResult<L> {
        let name = self.name;
        self.location
            .into_inner()
            .map_err(|_| EditError::Poisoned { model: name })
    }

    fn poisoned(&self) -> EditError {
        EditError::Poisoned {
            model: self.name.clone(),
        }
    }
}

/// Exclusive access to a [`ProgramModel`]; dereferences to the model's location.
pub struct WriteSession<'a, L> {
    guard: MutexGuard<'a, L>,
    label: String,
    model: &'a str,
    started: Instant,
    failed: bool,
}

impl<'a, L> WriteSession<'a, L> {
    fn open(guard: MutexGuard<'a, L>, label: &str, model: &'a str) -> Self {
        debug!(model, label, "write session acquired");
        Self {
            guard,
            label: label.to_string(),
            model,
            started: Instant::now(),
            failed: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Record that the edit failed; only affects logging on release.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }
}

impl<L> Deref for WriteSession<'_, L> {
    type Target = L;

    fn deref(&self) -> &L {
        &self.guard
    }
}

impl<L> DerefMut for WriteSession<'_, L> {
    fn deref_mut(&mut self) -> &mut L {
        &mut self.guard
    }
}

impl<L> Drop for WriteSession<'_, L> {
    fn drop(&mut self) {
        let elapsed_us = self.started.elapsed().as_micros() as u64;
        if std::thread::panicking() {
            warn!(
                model = self.model,
                label = self.label.as_str(),
                "write session released during panic"
            );
        } else {
            debug!(
                model = self.model,
                label = self.label.as_str(),
                failed = self.failed,
                elapsed_us,
                "write session released"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildergen_domain::{CreationFailure, InMemoryLocation};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::thread;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Edit(EditError),
        Creation(CreationFailure),
    }

    impl From<EditError> for TestError {
        fn from(e: EditError) -> Self {
            TestError::Edit(e)
        }
    }

    fn model() -> ProgramModel<InMemoryLocation> {
        ProgramModel::new(InMemoryLocation::new("src/main/java"))
    }

    #[test]
    fn session_grants_exclusive_access() {
        let model = model();
        let mut session = model.begin_write("create").unwrap();
        session.create_class("PersonBuilder").unwrap();

        assert_eq!(
            model.try_begin_write("second").err(),
            Some(EditError::Busy {
                model: "src/main/java".to_string()
            })
        );
        drop(session);

        assert!(model.try_begin_write("third").is_ok());
        assert_eq!(model.read(|loc| loc.contains("PersonBuilder")).unwrap(), true);
    }

    #[test]
    fn failed_edit_releases_the_model() {
        let model = model();
        let out: Result<(), TestError> = model.write("fail", |loc| {
            loc.create_class("class").map(|_| ()).map_err(TestError::Creation)
        });
        assert!(matches!(out, Err(TestError::Creation(CreationFailure::InvalidIdentifier { .. }))));
        assert!(model.try_begin_write("after").is_ok());
    }

    #[test]
    fn panicking_edit_releases_and_poisons() {
        let model = model();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _session = model.begin_write("boom").unwrap();
            panic!("edit blew up");
        }));
        assert!(result.is_err());

        assert!(matches!(
            model.begin_write("after"),
            Err(EditError::Poisoned { .. })
        ));
    }

    #[test]
    fn concurrent_requests_are_serialized() {
        let model = Arc::new(model());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let model = Arc::clone(&model);
                thread::spawn(move || {
                    model.write("thread", |loc| -> Result<(), TestError> {
                        loc.create_class(&format!("Builder{i}"))
                            .map_err(TestError::Creation)?;
                        Ok(())
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }

        let model = Arc::try_unwrap(model).unwrap();
        let loc = model.into_inner().unwrap();
        assert_eq!(loc.classes().count(), 4);
    }
}
