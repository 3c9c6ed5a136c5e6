//! # Fibre Beans
//!
//! A declarative, singleton-scoped bean container for Rust.
//!
//! Beans are declared as [`ComponentDefinition`]s: an identity, a type name
//! and an ordered list of property assignments, each either a literal string
//! or a reference to another bean. Loading a container constructs every bean
//! exactly once and wires its properties, in declaration order.
//!
//! ## Core Concepts
//!
//! - **TypeRegistry**: a capability table mapping a type name to a
//!   [`TypeDescriptor`] that knows how to default-construct the type and how to
//!   assign each of its fields by name. No runtime reflection is involved.
//! - **Container**: owns the definitions and the finished beans. It exists only
//!   once loading has fully succeeded.
//! - **Circular references**: a bean that is still being populated can be handed
//!   out as an *early reference*. It is the right object, but fields it had not
//!   reached yet are filled in afterwards, through the same shared handle.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_beans::{ComponentDefinition, Container, Shared, TypeDescriptor, TypeRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct User {
//!   name: String,
//!   role: Option<Shared<Role>>,
//! }
//!
//! #[derive(Default)]
//! struct Role {
//!   name: String,
//!   user: Option<Shared<User>>,
//! }
//!
//! let types = TypeRegistry::new()
//!   .with(
//!     TypeDescriptor::builder::<User>("User")
//!       .default_constructor()
//!       .literal("name", |u, v| u.name = v)
//!       .reference("role", |u: &mut User, r: Shared<Role>| u.role = Some(r))
//!       .build(),
//!   )
//!   .with(
//!     TypeDescriptor::builder::<Role>("Role")
//!       .default_constructor()
//!       .literal("name", |r, v| r.name = v)
//!       .reference("user", |r: &mut Role, u: Shared<User>| r.user = Some(u))
//!       .build(),
//!   );
//!
//! let container = Container::load(
//!   vec![
//!     ComponentDefinition::new("user", "User")
//!       .literal("name", "alice")
//!       .reference("role", "role"),
//!     ComponentDefinition::new("role", "Role")
//!       .literal("name", "admin")
//!       .reference("user", "user"),
//!   ],
//!   types,
//! )
//! .unwrap();
//!
//! let user = container.get::<User>("user").unwrap();
//! let role = container.get::<Role>("role").unwrap();
//! assert!(Arc::ptr_eq(user.read().role.as_ref().unwrap(), &role));
//! assert_eq!(role.read().user.as_ref().unwrap().read().name, "alice");
//! ```

mod cache;
pub mod config;
mod container;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod loader;
mod macros;
mod populate;
pub mod registry;
mod resolver;

pub use config::ContainerConfig;
pub use container::{Container, ContainerBuilder};
pub use definition::{ComponentDefinition, PropertyAssignment, PropertyValue};
pub use descriptor::{DescriptorBuilder, Instance, Shared, TypeDescriptor, TypeRegistry};
pub use error::{Error, Origin, Result};
pub use loader::Declarations;
pub use registry::DefinitionRegistry;
