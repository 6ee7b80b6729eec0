//! Fallback-resolver example for service-container.
//!
//! Demonstrates:
//! - Attaching a caller-owned `FallbackResolver` after construction
//! - Delegation only when no local source matches
//! - Verbatim propagation of resolver results and errors
//!
//! Run with: `cargo run --example fallback_resolver`

use service_container::{
    Container, ContainerConfig, ContainerError, FallbackResolver, Instance,
};
use std::sync::Arc;

/// Resolves `plugin.*` ids by "loading" the plugin on demand; declines
/// everything else so missing ids still surface as not-found.
struct PluginResolver {
    prefix: &'static str,
}

impl FallbackResolver for PluginResolver {
    fn resolve(&self, _container: &Container, id: &str) -> Result<Instance, ContainerError> {
        match id.strip_prefix(self.prefix) {
            Some(name) => Ok(Arc::new(format!("plugin <{name}> loaded"))),
            None => Err(ContainerError::not_found(id)),
        }
    }
}

fn main() {
    println!("=== service-container: Fallback Resolver ===\n");

    let container = Container::new(
        ContainerConfig::new()
            .service("core.version", "1.4.2".to_string())
            .alias("markdown", "plugin.markdown"),
    );

    // -------------------------------------------------------------------------
    // 1. Without a resolver, unknown ids fail fast
    // -------------------------------------------------------------------------
    println!("1. No resolver attached...");
    println!("   {}", container.get("plugin.markdown").unwrap_err());

    // -------------------------------------------------------------------------
    // 2. Attach the capability after construction
    // -------------------------------------------------------------------------
    println!("\n2. Attaching PluginResolver...");
    container.set_fallback(PluginResolver { prefix: "plugin." });

    let plugin: Arc<String> = container
        .get_as("markdown") // alias resolves first, then the resolver runs
        .expect("resolver should load the plugin");
    println!("   {plugin}");

    // -------------------------------------------------------------------------
    // 3. Local sources still win
    // -------------------------------------------------------------------------
    println!("\n3. Local entries are untouched...");
    let version: Arc<String> = container.get_as("core.version").expect("local service");
    println!("   core.version = {version}");

    // -------------------------------------------------------------------------
    // 4. Resolver errors pass through unmodified
    // -------------------------------------------------------------------------
    println!("\n4. The resolver declines non-plugin ids...");
    println!("   {}", container.get("database").unwrap_err());
}
