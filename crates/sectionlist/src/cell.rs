//! Type-safe cell registration and retrieval.
//!
//! A cell kind is any type implementing [`CellIdentifiable`]: it names a
//! stable reuse identifier and says how the host must learn about it before
//! the first dequeue ([`RegistrationMethod`]). Kinds that can display a model
//! also implement [`CellBindable`].
//!
//! Hosts only ever see type-erased [`CellHandle`]s. The [`CellRetriever`]
//! registers a set of kinds with a [`TableHost`] and downcasts what the host
//! hands back to the concrete cell type.
//!
//! # Example
//!
//! ```ignore
//! use parking_lot::RwLock;
//! use sectionlist::cell::{CellBindable, CellIdentifiable, RegistrationMethod};
//!
//! #[derive(Default)]
//! struct PersonCell {
//!     name: RwLock<String>,
//! }
//!
//! impl CellIdentifiable for PersonCell {
//!     fn reuse_identifier() -> &'static str {
//!         "PersonCell"
//!     }
//!
//!     fn registration_method() -> RegistrationMethod {
//!         RegistrationMethod::standard::<Self>()
//!     }
//! }
//!
//! impl CellBindable for PersonCell {
//!     type Model = Person;
//!
//!     fn bind(&self, person: &Person) {
//!         *self.name.write() = person.name.clone();
//!     }
//! }
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::{Arc, Weak};

use sectionlist_core::logging::targets;

use crate::contents::IndexPath;
use crate::error::{ListSourceError, Result};
use crate::traits::TableHost;

/// A type-erased, shared cell instance as stored and recycled by hosts.
pub type CellHandle = Arc<dyn Any + Send + Sync>;

/// Constructs a fresh cell instance.
pub type CellFactory = Arc<dyn Fn() -> CellHandle + Send + Sync>;

/// A reference to an externally defined cell template (a layout resource).
///
/// The host knows how to instantiate cells from it; the data source only
/// passes it along at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellTemplate {
    name: String,
    bundle: Option<String>,
}

impl CellTemplate {
    /// Creates a template reference by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bundle: None,
        }
    }

    /// Sets the resource bundle the template lives in.
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }

    /// The template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bundle the template lives in, if any.
    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }
}

/// How a cell kind must be made known to the host.
#[derive(Clone)]
pub enum RegistrationMethod {
    /// Register a constructor; the host calls it when its pool is empty.
    Standard(CellFactory),
    /// Register an external template the host instantiates.
    Template(CellTemplate),
    /// The host already knows this kind (e.g. configured at design time).
    None,
}

impl RegistrationMethod {
    /// Standard registration using `C::default()` as the constructor.
    pub fn standard<C>() -> Self
    where
        C: CellIdentifiable + Default,
    {
        Self::Standard(Arc::new(|| Arc::new(C::default()) as CellHandle))
    }

    /// Template registration.
    pub fn template(template: CellTemplate) -> Self {
        Self::Template(template)
    }

    fn registration(&self) -> Option<CellRegistration> {
        match self {
            Self::Standard(factory) => Some(CellRegistration::Factory(factory.clone())),
            Self::Template(template) => Some(CellRegistration::Template(template.clone())),
            Self::None => None,
        }
    }
}

impl fmt::Debug for RegistrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(_) => f.write_str("Standard"),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::None => f.write_str("None"),
        }
    }
}

/// What a host receives in [`TableHost::register_cell`].
#[derive(Clone)]
pub enum CellRegistration {
    /// Build instances with this constructor.
    Factory(CellFactory),
    /// Build instances from this template.
    Template(CellTemplate),
}

impl fmt::Debug for CellRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory"),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
        }
    }
}

/// A renderable cell kind with a stable identifier.
pub trait CellIdentifiable: Any + Send + Sync {
    /// The identifier the host pools instances under.
    fn reuse_identifier() -> &'static str
    where
        Self: Sized;

    /// How the host must learn about this kind.
    fn registration_method() -> RegistrationMethod
    where
        Self: Sized;
}

/// A cell kind that displays one model value.
pub trait CellBindable: CellIdentifiable {
    /// The model type this cell displays.
    type Model;

    /// Updates the cell's visual state from `model`.
    fn bind(&self, model: &Self::Model);
}

/// A cell kind descriptor: identifier plus registration method.
#[derive(Debug, Clone)]
pub struct CellKind {
    identifier: String,
    method: RegistrationMethod,
}

impl CellKind {
    /// Describes the cell type `C`.
    pub fn of<C: CellIdentifiable>() -> Self {
        Self {
            identifier: C::reuse_identifier().to_string(),
            method: C::registration_method(),
        }
    }

    /// Describes a cell kind by hand.
    pub fn new(identifier: impl Into<String>, method: RegistrationMethod) -> Self {
        Self {
            identifier: identifier.into(),
            method,
        }
    }

    /// The reuse identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The registration method.
    pub fn method(&self) -> &RegistrationMethod {
        &self.method
    }
}

/// Registers cell kinds with a host and retrieves typed instances.
///
/// Holds the host weakly: the widget owns the data source, not the other way
/// round.
pub struct CellRetriever {
    host: Weak<dyn TableHost>,
    kinds: Vec<CellKind>,
}

impl CellRetriever {
    /// Creates a retriever and registers every kind with `host`.
    ///
    /// Kinds using [`RegistrationMethod::None`] are recorded but not
    /// registered; the host is expected to know them already.
    pub fn new(host: &Arc<dyn TableHost>, kinds: Vec<CellKind>) -> Self {
        for kind in &kinds {
            match kind.method.registration() {
                Some(registration) => {
                    tracing::debug!(
                        target: targets::CELL,
                        identifier = %kind.identifier,
                        method = ?kind.method,
                        "registering cell kind"
                    );
                    host.register_cell(&kind.identifier, registration);
                }
                None => {
                    tracing::trace!(
                        target: targets::CELL,
                        identifier = %kind.identifier,
                        "cell kind pre-registered by host"
                    );
                }
            }
        }

        Self {
            host: Arc::downgrade(host),
            kinds,
        }
    }

    /// Whether `identifier` belongs to one of the registered kinds.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.kinds.iter().any(|kind| kind.identifier == identifier)
    }

    /// Identifiers of all known kinds, in registration order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.kinds.iter().map(CellKind::identifier)
    }

    /// Retrieves a ready-to-bind cell of type `C`.
    ///
    /// # Panics
    ///
    /// Panics on any of the failures described by
    /// [`try_retrieve`](Self::try_retrieve). They indicate a mismatch between
    /// the kinds passed to `link` and the cells the configurator asks for.
    pub fn retrieve<C: CellIdentifiable>(&self, index_path: Option<IndexPath>) -> Arc<C> {
        self.try_retrieve(index_path).unwrap_or_else(|err| {
            tracing::error!(target: targets::CELL, error = %err, "cell retrieval failed");
            panic!("{err}")
        })
    }

    /// Retrieves a cell of type `C`, reporting misconfiguration as an error.
    pub fn try_retrieve<C: CellIdentifiable>(&self, index_path: Option<IndexPath>) -> Result<Arc<C>> {
        let identifier = C::reuse_identifier();
        if !self.is_registered(identifier) {
            return Err(ListSourceError::CellNotRegistered {
                identifier: identifier.to_string(),
            });
        }

        let host = self.host.upgrade().ok_or(ListSourceError::HostReleased)?;
        let handle = host.dequeue_cell(identifier, index_path).ok_or_else(|| {
            ListSourceError::CellNotRegistered {
                identifier: identifier.to_string(),
            }
        })?;

        handle
            .downcast::<C>()
            .map_err(|_| ListSourceError::IncompatibleCell {
                identifier: identifier.to_string(),
                expected: type_name::<C>(),
            })
    }
}

impl fmt::Debug for CellRetriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellRetriever")
            .field("kinds", &self.kinds)
            .field("host_alive", &(self.host.strong_count() > 0))
            .finish()
    }
}
