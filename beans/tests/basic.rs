mod common;

use common::{types, Department, Role, User};
use fibre_beans::{bean, ComponentDefinition, Container};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;

#[test]
fn test_every_declared_bean_is_ready_after_load() {
  // Arrange
  let definitions = vec![
    ComponentDefinition::new("alice", "example.User").literal("name", "Alice"),
    ComponentDefinition::new("admin", "example.Role").literal("name", "Administrator"),
    ComponentDefinition::new("ops", "example.Department").literal("name", "Operations"),
  ];

  // Act
  let container = Container::load(definitions, types()).unwrap();

  // Assert
  assert_eq!(container.len(), 3);
  assert!(container.get::<User>("alice").is_some());
  assert!(container.get::<Role>("admin").is_some());
  assert!(container.get::<Department>("ops").is_some());
  assert_eq!(container.get_bean("alice").unwrap().type_name(), "example.User");
}

#[test]
fn test_acyclic_references_are_fully_populated() {
  // Arrange: the department is declared before the user it references.
  let definitions = vec![
    ComponentDefinition::new("ops", "example.Department")
      .literal("name", "Operations")
      .reference("head", "alice"),
    ComponentDefinition::new("alice", "example.User")
      .literal("id", "1")
      .literal("name", "Alice")
      .reference("role", "admin"),
    ComponentDefinition::new("admin", "example.Role")
      .literal("id", "10")
      .literal("name", "Administrator"),
  ];

  // Act
  let container = Container::load(definitions, types()).unwrap();

  // Assert
  let ops = bean!(container, Department, "ops");
  let ops = ops.read();
  assert_eq!(ops.name, "Operations");

  let head = ops.head.as_ref().unwrap();
  assert!(Arc::ptr_eq(head, &bean!(container, User, "alice")));
  assert_eq!(head.read().id, "1");
  assert_eq!(head.read().name, "Alice");

  let role = head.read().role.clone().unwrap();
  assert_eq!(role.read().name, "Administrator");
  assert!(role.read().user.is_none());
}

#[test]
fn test_get_bean_returns_the_same_instance_every_time() {
  let container = Container::load(
    vec![ComponentDefinition::new("alice", "example.User").literal("name", "Alice")],
    types(),
  )
  .unwrap();

  let first = container.get_bean("alice").unwrap();
  let second = container.get_bean("alice").unwrap();

  assert!(first.ptr_eq(&second));
  assert!(Arc::ptr_eq(
    &container.get::<User>("alice").unwrap(),
    &container.get::<User>("alice").unwrap()
  ));
}

#[test]
fn test_shared_referent_is_constructed_once() {
  // Two departments reference the same user.
  let definitions = vec![
    ComponentDefinition::new("ops", "example.Department").reference("head", "alice"),
    ComponentDefinition::new("dev", "example.Department").reference("head", "alice"),
    ComponentDefinition::new("alice", "example.User"),
  ];

  let container = Container::load(definitions, types()).unwrap();

  let ops_head = bean!(container, Department, "ops").read().head.clone().unwrap();
  let dev_head = bean!(container, Department, "dev").read().head.clone().unwrap();
  assert!(Arc::ptr_eq(&ops_head, &dev_head));
}

#[test]
fn test_unknown_id_and_wrong_type_yield_none() {
  let container = Container::load(
    vec![ComponentDefinition::new("alice", "example.User")],
    types(),
  )
  .unwrap();

  assert!(container.get_bean("ghost").is_none());
  assert!(!container.contains_bean("ghost"));
  assert!(container.get::<Role>("alice").is_none());
}

#[test]
fn test_bean_ids_follow_declaration_order() {
  let container = Container::builder()
    .types(types())
    .definition(ComponentDefinition::new("b", "example.Role"))
    .definition(ComponentDefinition::new("a", "example.User").reference("role", "b"))
    .instance("clock", String::from("utc"))
    .build()
    .unwrap();

  let ids: Vec<&str> = container.bean_ids().collect();
  assert_eq!(ids, vec!["b", "a", "clock"]);
  assert!(container.definition("a").is_some());
  assert!(container.definition("clock").is_none());
  assert_eq!(*container.get::<String>("clock").unwrap().read(), "utc");
}

#[test]
fn test_seeded_instance_can_be_referenced() {
  // Arrange
  let admin = Arc::new(parking_lot::RwLock::new(Role {
    name: "Seeded".to_string(),
    ..Role::default()
  }));

  // Act
  let container = Container::builder()
    .types(types())
    .shared_instance("admin", admin.clone())
    .definition(ComponentDefinition::new("alice", "example.User").reference("role", "admin"))
    .build()
    .unwrap();

  // Assert
  let alice = bean!(container, User, "alice");
  assert!(Arc::ptr_eq(alice.read().role.as_ref().unwrap(), &admin));
  assert!(Arc::ptr_eq(&bean!(container, Role, "admin"), &admin));
}

#[test]
fn test_ready_beans_can_be_read_from_many_threads() {
  let container = Container::load(
    vec![ComponentDefinition::new("alice", "example.User").literal("name", "Alice")],
    types(),
  )
  .unwrap();
  let expected = container.get::<User>("alice").unwrap();

  thread::scope(|s| {
    for _ in 0..8 {
      s.spawn(|| {
        let seen = container.get::<User>("alice").unwrap();
        assert!(Arc::ptr_eq(&seen, &expected));
        assert_eq!(seen.read().name, "Alice");
      });
    }
  });
}

#[test]
#[should_panic(expected = "Failed to resolve required bean 'ghost'")]
fn test_bean_macro_panics_on_missing_bean() {
  let container = Container::load(Vec::new(), types()).unwrap();
  bean!(container, User, "ghost");
}
