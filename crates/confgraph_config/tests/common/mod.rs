//! Shared fixtures for `confgraph_config` integration tests.
//!
//! Import via `mod common;` in test files.

#![allow(
    dead_code,
    missing_docs,
    reason = "shared test fixtures, not all items used in every test binary"
)]

use confgraph_config::Config;
use confgraph_types::{Resource, ResourceMetadata, TYPE_OUTPUT, TypeRegistry};

pub const TYPE_CONTAINER: &str = "container";
pub const TYPE_NETWORK: &str = "network";
pub const TYPE_TEMPLATE: &str = "template";

#[derive(Debug, Default)]
pub struct Container {
    pub meta: ResourceMetadata,
    pub image: String,
    pub networks: Vec<String>,
}

impl Resource for Container {
    fn metadata(&self) -> &ResourceMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.meta
    }
}

#[derive(Debug, Default)]
pub struct Network {
    pub meta: ResourceMetadata,
    pub subnet: String,
}

impl Resource for Network {
    fn metadata(&self) -> &ResourceMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.meta
    }
}

#[derive(Debug, Default)]
pub struct Template {
    pub meta: ResourceMetadata,
    pub source: String,
    pub destination: String,
}

impl Resource for Template {
    fn metadata(&self) -> &ResourceMetadata {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut ResourceMetadata {
        &mut self.meta
    }
}

/// Registry with the built-in types plus the fixture types.
pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_default::<Container>(TYPE_CONTAINER);
    registry.register_default::<Network>(TYPE_NETWORK);
    registry.register_default::<Template>(TYPE_TEMPLATE);
    registry
}

/// Creates a resource of `resource_type` named `name` inside `module`.
pub fn resource(
    registry: &TypeRegistry,
    resource_type: &str,
    name: &str,
    module: &str,
    depends_on: &[&str],
) -> Box<dyn Resource> {
    let mut resource = registry.create(resource_type, name).unwrap();
    let meta = resource.metadata_mut();
    meta.module = module.to_string();
    meta.depends_on = depends_on.iter().map(ToString::to_string).collect();
    resource
}

/// Builds the reference store:
///
/// | resource | address |
/// |----------|---------|
/// | net1 | `resource.network.cloud` |
/// | con1 | `resource.container.test_dev` (depends on `module.module1`) |
/// | con2 | `module.module1.resource.container.test_dev` |
/// | con3 | `module.module1.module2.resource.container.test_dev` |
/// | con4 | `module.module1.module2.resource.container.test_dev2` (depends on `resource.container.test_dev`) |
/// | out1 | `module.module1.module2.output.fqdn` |
pub fn setup_config() -> Config {
    let registry = registry();
    let mut config = Config::new();

    for resource in [
        resource(&registry, TYPE_NETWORK, "cloud", "", &[]),
        resource(&registry, TYPE_CONTAINER, "test_dev", "", &["module.module1"]),
        resource(&registry, TYPE_CONTAINER, "test_dev", "module1", &[]),
        resource(&registry, TYPE_CONTAINER, "test_dev", "module1.module2", &[]),
        resource(
            &registry,
            TYPE_CONTAINER,
            "test_dev2",
            "module1.module2",
            &["resource.container.test_dev"],
        ),
        resource(&registry, TYPE_OUTPUT, "fqdn", "module1.module2", &[]),
    ] {
        config.add(resource).unwrap();
    }

    config
}

/// Canonical addresses of `resources`, in order.
pub fn addresses(resources: &[&dyn Resource]) -> Vec<String> {
    resources
        .iter()
        .map(|resource| confgraph_config::Fqdn::for_resource(resource.metadata()).to_string())
        .collect()
}

pub const NET1: &str = "resource.network.cloud";
pub const CON1: &str = "resource.container.test_dev";
pub const CON2: &str = "module.module1.resource.container.test_dev";
pub const CON3: &str = "module.module1.module2.resource.container.test_dev";
pub const CON4: &str = "module.module1.module2.resource.container.test_dev2";
pub const OUT1: &str = "module.module1.module2.output.fqdn";
