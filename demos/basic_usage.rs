//! Basic usage example for service-container.
//!
//! Demonstrates:
//! - Registering eager services, factories and invokables
//! - Alias indirection
//! - Singleton caching with the `shared` flag
//!
//! Run with: `cargo run --example basic_usage`

use service_container::{Container, ContainerConfig};
use std::sync::Arc;

#[derive(Debug, Default)]
struct RequestCounter {
    served: u64,
}

fn main() {
    println!("=== service-container: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. Build the configuration snapshot
    // -------------------------------------------------------------------------
    println!("1. Building the configuration...");

    let container = Container::new(
        ContainerConfig::new()
            // Eager service: handed out as-is on every lookup.
            .service("config.listen", "127.0.0.1:8080".to_string())
            // Factory: runs per construction event, may resolve sub-dependencies.
            .factory("server.banner", |container, id| {
                let listen: Arc<String> = container.get_as("config.listen")?;
                Ok(Arc::new(format!("[{id}] listening on {listen}")))
            })
            // Invokable: zero-argument construction of a concrete type.
            .invokable::<RequestCounter>("metrics.requests")
            .alias("banner", "server.banner")
            .shared("server.banner", true),
    );

    println!("   {container:?}");

    // -------------------------------------------------------------------------
    // 2. Resolve through an alias
    // -------------------------------------------------------------------------
    println!("\n2. Resolving \"banner\" (alias of \"server.banner\")...");

    let banner: Arc<String> = container.get_as("banner").expect("banner should resolve");
    println!("   {banner}");

    // -------------------------------------------------------------------------
    // 3. Shared entries come back identical
    // -------------------------------------------------------------------------
    println!("\n3. Resolving the banner again...");

    let again: Arc<String> = container.get_as("server.banner").expect("cached lookup");
    println!("   identical instance: {}", Arc::ptr_eq(&banner, &again));

    // -------------------------------------------------------------------------
    // 4. Invokables construct fresh values while unshared
    // -------------------------------------------------------------------------
    println!("\n4. Constructing the request counter...");

    let counter: Arc<RequestCounter> = container
        .get_as("metrics.requests")
        .expect("counter should construct");
    println!("   {counter:?} (served so far: {})", counter.served);

    // -------------------------------------------------------------------------
    // 5. Missing ids are a distinguishable error kind
    // -------------------------------------------------------------------------
    println!("\n5. Looking up an unknown id...");

    match container.get("database") {
        Err(err) if err.is_not_found() => println!("   as expected: {err}"),
        Err(err) => println!("   unexpected error: {err}"),
        Ok(_) => println!("   unexpectedly resolved"),
    }
}
