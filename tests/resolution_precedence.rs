//! Integration tests for source precedence and the three construction
//! strategies: callable factories, constructed factory types, and invokables.

use service_container::{
    BoxError, Container, ContainerConfig, Instance, ServiceFactory,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts how many times `ConnectionFactory` was default-constructed.
static CONNECTION_FACTORY_BUILDS: AtomicUsize = AtomicUsize::new(0);

struct ConnectionFactory {
    invocations: AtomicUsize,
}

impl Default for ConnectionFactory {
    fn default() -> Self {
        CONNECTION_FACTORY_BUILDS.fetch_add(1, Ordering::SeqCst);
        Self {
            invocations: AtomicUsize::new(0),
        }
    }
}

impl ServiceFactory for ConnectionFactory {
    fn create(&self, _container: &Container, id: &str) -> Result<Instance, BoxError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(format!("connection for {id}")))
    }
}

#[test]
fn test_service_returns_the_exact_registered_instance() {
    let original: Arc<String> = Arc::new("postgres://localhost".to_string());
    let container =
        Container::new(ContainerConfig::new().service_arc("db.url", original.clone()));

    let first = container.get("db.url").unwrap();
    let second = container.get("db.url").unwrap();

    let erased: Instance = original;
    assert!(Arc::ptr_eq(&erased, &first));
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_service_is_never_cached_through_the_instance_map() {
    // Services bypass the shared flags entirely; flagging one changes nothing.
    let container = Container::new(
        ContainerConfig::new()
            .service("db.url", "postgres://localhost".to_string())
            .shared("db.url", true),
    );

    let first = container.get("db.url").unwrap();
    let second = container.get("db.url").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_factory_closure_receives_container_and_resolved_id() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let container = Container::new(ContainerConfig::new().factory("mailer", move |_, id| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(format!("mailer::{id}")))
    }));

    let mailer: Arc<String> = container.get_as("mailer").unwrap();
    assert_eq!(&*mailer, "mailer::mailer");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_factory_closure_runs_once_per_construction_event() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let container = Container::new(ContainerConfig::new().factory("job", move |_, _| {
        seen.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(0u8))
    }));

    // Not shared: every lookup is a fresh construction event.
    container.get("job").unwrap();
    container.get("job").unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factory_resolves_sub_dependencies_through_the_container() {
    let container = Container::new(
        ContainerConfig::new()
            .service("config.host", "localhost".to_string())
            .factory("client", |container, _| {
                let host: Arc<String> = container.get_as("config.host")?;
                Ok(Arc::new(format!("client@{host}")))
            }),
    );

    let client: Arc<String> = container.get_as("client").unwrap();
    assert_eq!(&*client, "client@localhost");
}

#[test]
fn test_factory_type_is_constructed_then_invoked() {
    CONNECTION_FACTORY_BUILDS.store(0, Ordering::SeqCst);

    let container =
        Container::new(ContainerConfig::new().factory_type::<ConnectionFactory>("db.conn"));

    let conn: Arc<String> = container.get_as("db.conn").unwrap();
    assert_eq!(&*conn, "connection for db.conn");
    assert_eq!(CONNECTION_FACTORY_BUILDS.load(Ordering::SeqCst), 1);

    // A second construction event builds a second factory instance.
    container.get("db.conn").unwrap();
    assert_eq!(CONNECTION_FACTORY_BUILDS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factory_value_is_invoked_without_reconstruction() {
    CONNECTION_FACTORY_BUILDS.store(0, Ordering::SeqCst);

    let container = Container::new(
        ContainerConfig::new().factory_value("db.conn", ConnectionFactory::default()),
    );
    assert_eq!(CONNECTION_FACTORY_BUILDS.load(Ordering::SeqCst), 1);

    container.get("db.conn").unwrap();
    container.get("db.conn").unwrap();

    // Registered once at config time, never rebuilt per lookup.
    assert_eq!(CONNECTION_FACTORY_BUILDS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_invokable_default_constructs_the_type() {
    #[derive(Default)]
    struct AuditLog {
        entries: Vec<String>,
    }

    let container = Container::new(ContainerConfig::new().invokable::<AuditLog>("audit"));

    let log: Arc<AuditLog> = container.get_as("audit").unwrap();
    assert!(log.entries.is_empty());
}

#[test]
fn test_service_takes_precedence_over_factory() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let container = Container::new(
        ContainerConfig::new()
            .service("cache", "eager".to_string())
            .factory("cache", move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new("lazy".to_string()))
            }),
    );

    let cache: Arc<String> = container.get_as("cache").unwrap();
    assert_eq!(&*cache, "eager");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_factory_takes_precedence_over_invokable() {
    let container = Container::new(
        ContainerConfig::new()
            .factory("value", |_, _| Ok(Arc::new("from factory".to_string())))
            .invokable::<String>("value"),
    );

    let value: Arc<String> = container.get_as("value").unwrap();
    assert_eq!(&*value, "from factory");
}

#[test]
fn test_cached_instance_short_circuits_the_factory() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();

    let container = Container::new(
        ContainerConfig::new()
            .factory("session", move |_, _| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new("session-1".to_string()))
            })
            .shared("session", true),
    );

    let first = container.get("session").unwrap();
    let second = container.get("session").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
