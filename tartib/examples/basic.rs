//! Basic example of wiring an application with Tartib.

use std::sync::Arc;

use tartib::prelude::*;

// === Application components ===

struct AppConfig {
    database_url: String,
    pool_size: usize,
}

struct Database {
    config: Arc<AppConfig>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        format!(
            "[{} pool={}] {sql}",
            self.config.database_url, self.config.pool_size
        )
    }
}

struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    fn find_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

struct AuditLog {
    db: Arc<Database>,
}

impl AuditLog {
    fn record(&self, event: &str) -> String {
        self.db.query(&format!("INSERT INTO audit VALUES ('{event}')"))
    }
}

struct UserService {
    repo: Arc<UserRepository>,
    audit: Arc<AuditLog>,
}

impl UserService {
    fn get_user(&self, id: u64) -> String {
        self.audit.record(&format!("get_user {id}"));
        self.repo.find_user(id)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("tartib=debug")
        .init();

    let registry = Resolver::new()
        // Config builds from literal defaults alone.
        .register(
            ComponentDescriptor::new::<AppConfig>(|args| {
                Ok(AppConfig {
                    database_url: args.value(0)?,
                    pool_size: args.value(1)?,
                })
            })
            .literal("database_url", String::from("postgres://localhost/myapp"))
            .literal("pool_size", 8usize),
        )
        .register(
            ComponentDescriptor::new::<Database>(|args| {
                Ok(Database {
                    config: args.shared(0)?,
                })
            })
            .dependency::<AppConfig>("config"),
        )
        .register(
            ComponentDescriptor::new::<UserRepository>(|args| {
                Ok(UserRepository {
                    db: args.shared(0)?,
                })
            })
            .dependency::<Database>("db"),
        )
        .register(
            ComponentDescriptor::new::<AuditLog>(|args| {
                Ok(AuditLog {
                    db: args.shared(0)?,
                })
            })
            .dependency::<Database>("db"),
        )
        .register(
            ComponentDescriptor::new::<UserService>(|args| {
                Ok(UserService {
                    repo: args.shared(0)?,
                    audit: args.shared(1)?,
                })
            })
            .dependency::<UserRepository>("repo")
            .dependency::<AuditLog>("audit"),
        )
        .resolve()?;

    println!("Resolved {} components", registry.len());

    let service: Arc<UserService> = registry.get().expect("UserService resolved");
    println!("{}", service.get_user(42));

    // The repository and the audit log share one Database instance.
    let repo: Arc<UserRepository> = registry.get().expect("UserRepository resolved");
    let audit: Arc<AuditLog> = registry.get().expect("AuditLog resolved");
    assert!(Arc::ptr_eq(&repo.db, &audit.db));
    println!("Repository and audit log share the same database");

    Ok(())
}
