//! Demonstrates keying a tiny service locator by `TypeIdentity`.
//!
//! The locator itself is deliberately naive; the point is that the type IS the
//! key, and that binding errors read well because identities know their names.
//!
//! Run with: cargo run --example service_locator

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use type_identity::{TypeIdentity, TypeIdentityRegistry};

fn main() {
    let identities = TypeIdentityRegistry::new();
    let mut locator = Locator::new(identities.clone());

    // Register services - type is the key, no strings needed
    locator.register(DatabaseConfig {
        host: "localhost".to_string(),
        port: 5432,
        database: "myapp".to_string(),
    });
    locator.register(Logger::new("app"));

    // Resolve what was registered
    let logger = locator.resolve::<Logger>().expect("logger is registered");
    logger.log("services registered");

    match locator.resolve::<DatabaseConfig>() {
        Ok(db) => logger.log(&format!("database at {}:{}/{}", db.host, db.port, db.database)),
        Err(err) => eprintln!("{}", err),
    }

    // AppConfig was never registered, so this produces a binding error
    if let Err(err) = locator.resolve::<AppConfig>() {
        println!("{}", err);
    }

    println!("\nKnown identities:");
    for identity in identities.identities() {
        println!("  {}", identity);
    }
}

// ============================================================================
// Locator - a map from type identity to a shared instance
// ============================================================================

struct Locator {
    identities: TypeIdentityRegistry,
    services: HashMap<Arc<TypeIdentity>, Arc<dyn Any + Send + Sync>>,
}

impl Locator {
    fn new(identities: TypeIdentityRegistry) -> Self {
        Self {
            identities,
            services: HashMap::new(),
        }
    }

    fn register<T: Any + Send + Sync>(&mut self, service: T) {
        let identity = self.identities.identity::<T>();
        self.services.insert(identity, Arc::new(service));
    }

    fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>, String> {
        let identity = self.identities.identity::<T>();
        let service = self
            .services
            .get(&identity)
            .ok_or_else(|| format!("no service registered for {}", identity))?;
        Arc::clone(service)
            .downcast::<T>()
            .map_err(|_| format!("service registered for {} has the wrong type", identity))
    }
}

// ============================================================================
// Services
// ============================================================================

#[derive(Clone, Debug)]
struct DatabaseConfig {
    host: String,
    port: u16,
    database: String,
}

#[derive(Clone, Debug)]
#[allow(dead_code)]
struct AppConfig {
    name: String,
    debug: bool,
}

#[derive(Clone, Debug)]
struct Logger {
    prefix: String,
}

impl Logger {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn log(&self, message: &str) {
        println!("[{}] {}", self.prefix, message);
    }
}
