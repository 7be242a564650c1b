use crate::error::CreationFailure;
use crate::naming::is_valid_identifier;
use buildergen_types::{GeneratedClass, GeneratedMember};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Handle to a class created at a [`TargetLocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A place that can receive new class declarations (a package, a directory).
///
/// The synthesizer only ever holds `&mut` access for one request, so implementations need
/// no locking of their own.
pub trait TargetLocation {
    /// Short description used in failure messages.
    fn describe(&self) -> String;

    /// Create an empty class. Fails without side effects.
    fn create_class(&mut self, name: &str) -> Result<ClassId, CreationFailure>;

    /// Append a member to a class created here.
    fn add_member(&mut self, class: ClassId, member: GeneratedMember)
    -> Result<(), CreationFailure>;

    fn class(&self, class: ClassId) -> Option<&GeneratedClass>;
}

/// In-memory `TargetLocation`.
///
/// Knows the names already declared at the location so collisions are detected, and can be
/// marked read-only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocation {
    name: String,
    package: Option<String>,
    existing: BTreeSet<String>,
    classes: BTreeMap<ClassId, GeneratedClass>,
    next_id: usize,
    read_only: bool,
}

impl InMemoryLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Declarations already present at the location.
    pub fn with_existing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.existing.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.existing.contains(name) || self.classes.values().any(|c| c.name == name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &GeneratedClass> {
        self.classes.values()
    }

    pub fn class_named(&self, name: &str) -> Option<&GeneratedClass> {
        self.classes.values().find(|c| c.name == name)
    }

    fn ensure_writable(&self) -> Result<(), CreationFailure> {
        if self.read_only {
            return Err(CreationFailure::ReadOnlyLocation {
                location: self.name.clone(),
            });
        }
        Ok(())
    }
}

impl TargetLocation for InMemoryLocation {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn create_class(&mut self, name: &str) -> Result<ClassId, CreationFailure> {
        self.ensure_writable()?;
        if !is_valid_identifier(name) {
            return Err(CreationFailure::InvalidIdentifier {
                name: name.to_string(),
            });
        }
        if self.contains(name) {
            return Err(CreationFailure::NameCollision {
                name: name.to_string(),
            });
        }

        let id = ClassId(self.next_id);
        self.next_id += 1;
        let mut class = GeneratedClass::new(name);
        class.package = self.package.clone();
        self.classes.insert(id, class);
        Ok(id)
    }

    fn add_member(
        &mut self,
        class: ClassId,
        member: GeneratedMember,
    ) -> Result<(), CreationFailure> {
        self.ensure_writable()?;
        let target = self
            .classes
            .get_mut(&class)
            .ok_or(CreationFailure::UnknownClass { id: class })?;
        target.members.push(member);
        Ok(())
    }

    fn class(&self, class: ClassId) -> Option<&GeneratedClass> {
        self.classes.get(&class)
    }
}
