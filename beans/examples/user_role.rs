use fibre_beans::{loader, Container, Shared, TypeDescriptor, TypeRegistry};
use tracing_subscriber::EnvFilter;

const DECLARATIONS: &str = r#"
beans:
  - id: user
    class: example.User
    properties:
      - { name: id, value: "1" }
      - { name: name, value: alice }
      - { name: role, ref: role }
  - id: role
    class: example.Role
    properties:
      - { name: id, value: "10" }
      - { name: name, value: admin }
      - { name: user, ref: user }
"#;

#[derive(Default)]
struct User {
  id: String,
  name: String,
  role: Option<Shared<Role>>,
}

#[derive(Default)]
struct Role {
  id: String,
  name: String,
  user: Option<Shared<User>>,
}

fn types() -> TypeRegistry {
  TypeRegistry::new()
    .with(
      TypeDescriptor::builder::<User>("example.User")
        .default_constructor()
        .literal("id", |u, v| u.id = v)
        .literal("name", |u, v| u.name = v)
        .reference("role", |u: &mut User, r: Shared<Role>| u.role = Some(r))
        .build(),
    )
    .with(
      TypeDescriptor::builder::<Role>("example.Role")
        .default_constructor()
        .literal("id", |r, v| r.id = v)
        .literal("name", |r, v| r.name = v)
        .reference("user", |r: &mut Role, u: Shared<User>| r.user = Some(u))
        .build(),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  // RUST_LOG=fibre_beans=trace shows every cache hit and early handout.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let declarations = loader::parse_yaml(DECLARATIONS)?;
  let container = Container::builder()
    .types(types())
    .config(declarations.config)
    .definitions(declarations.definitions)
    .build()?;

  for id in container.bean_ids() {
    let Some(bean) = container.get_bean(id) else {
      continue;
    };
    if let Some(user) = bean.downcast::<User>() {
      let user = user.read();
      println!("userId: {}", user.id);
      println!("userName: {}", user.name);
      if let Some(role) = &user.role {
        println!("userRoleName: {}", role.read().name);
      }
    } else if let Some(role) = bean.downcast::<Role>() {
      let role = role.read();
      println!("roleId: {}", role.id);
      println!("roleName: {}", role.name);
      if let Some(user) = &role.user {
        println!("roleUserName: {}", user.read().name);
      }
    }
    println!("-----------------");
  }

  Ok(())
}
