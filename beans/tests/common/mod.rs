#![allow(dead_code)]

use fibre_beans::{Shared, TypeDescriptor, TypeRegistry};

// --- Test Fixtures ---

#[derive(Debug, Default)]
pub struct User {
  pub id: String,
  pub name: String,
  pub role: Option<Shared<Role>>,
}

#[derive(Debug, Default)]
pub struct Role {
  pub id: String,
  pub name: String,
  pub user: Option<Shared<User>>,
}

#[derive(Debug, Default)]
pub struct Department {
  pub name: String,
  pub head: Option<Shared<User>>,
}

pub fn user_descriptor() -> TypeDescriptor {
  TypeDescriptor::builder::<User>("example.User")
    .default_constructor()
    .literal("id", |u, v| u.id = v)
    .literal("name", |u, v| u.name = v)
    .reference("role", |u: &mut User, r: Shared<Role>| u.role = Some(r))
    .build()
}

pub fn role_descriptor() -> TypeDescriptor {
  TypeDescriptor::builder::<Role>("example.Role")
    .default_constructor()
    .literal("id", |r, v| r.id = v)
    .literal("name", |r, v| r.name = v)
    .reference("user", |r: &mut Role, u: Shared<User>| r.user = Some(u))
    .build()
}

pub fn department_descriptor() -> TypeDescriptor {
  TypeDescriptor::builder::<Department>("example.Department")
    .default_constructor()
    .literal("name", |d, v| d.name = v)
    .reference("head", |d: &mut Department, u: Shared<User>| d.head = Some(u))
    .build()
}

pub fn types() -> TypeRegistry {
  TypeRegistry::new()
    .with(user_descriptor())
    .with(role_descriptor())
    .with(department_descriptor())
}
