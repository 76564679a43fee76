//! Module relative lookups and dependency wiring.

mod common;

use common::{
    CON1, CON2, CON3, CON4, NET1, OUT1, TYPE_CONTAINER, addresses, registry, resource,
    setup_config,
};
use confgraph_config::{ConfigError, ModuleDependencyPolicy};

fn links(config: &confgraph_config::Config, address: &str) -> Vec<String> {
    config
        .find_by_address(address)
        .unwrap()
        .metadata()
        .resource_links
        .clone()
}

// ─────────────────────────────────────────────────────────────────────
// Relative lookups
// ─────────────────────────────────────────────────────────────────────

#[test]
fn relative_resource_resolves_into_parent_module() {
    let config = setup_config();

    let found = config
        .find_relative("resource.container.test_dev", "module1")
        .unwrap();
    assert_eq!(found.metadata().module, "module1");
}

#[test]
fn relative_module_resource_resolves_below_parent() {
    let config = setup_config();

    let found = config
        .find_relative("module.module2.resource.container.test_dev", "module1")
        .unwrap();
    assert_eq!(found.metadata().module, "module1.module2");
}

#[test]
fn relative_lookup_from_top_level_is_absolute() {
    let config = setup_config();

    let found = config
        .find_relative("module.module1.resource.container.test_dev", "")
        .unwrap();
    assert_eq!(found.metadata().module, "module1");
}

#[test]
fn relative_lookup_does_not_climb_out_of_parent() {
    let config = setup_config();

    let err = config
        .find_relative("resource.network.cloud", "module1")
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::not_found("module.module1.resource.network.cloud")
    );
}

#[test]
fn relative_output_lookup() {
    let config = setup_config();

    let found = config
        .find_relative("module.module2.output.fqdn", "module1")
        .unwrap();
    assert_eq!(found.metadata().name(), "fqdn");
}

#[test]
fn relative_module_members() {
    let config = setup_config();

    let found = config
        .find_relative_by_module("module.module2", "module1", false)
        .unwrap();
    assert_eq!(found.len(), 3);
    assert_eq!(addresses(&found), vec![CON3, CON4, OUT1]);
}

#[test]
fn relative_module_members_from_top_level() {
    let config = setup_config();

    let found = config
        .find_relative_by_module("module.module1", "", true)
        .unwrap();
    assert_eq!(addresses(&found), vec![CON2, CON3, CON4, OUT1]);
}

#[test]
fn relative_module_lookup_rejects_resource_address() {
    let config = setup_config();

    let err = config
        .find_relative_by_module("resource.container.test_dev", "module1", false)
        .unwrap_err();
    assert!(matches!(err, ConfigError::MalformedAddress(_)));
}

// ─────────────────────────────────────────────────────────────────────
// Dependency wiring
// ─────────────────────────────────────────────────────────────────────

#[test]
fn module_dependency_expands_to_every_member() {
    let mut config = setup_config();
    config.resolve_links(ModuleDependencyPolicy::default()).unwrap();

    assert_eq!(links(&config, CON1), vec![CON2, CON3, CON4, OUT1]);
}

#[test]
fn resource_dependency_resolves_inside_own_module() {
    let mut config = setup_config();
    config.resolve_links(ModuleDependencyPolicy::default()).unwrap();

    assert_eq!(links(&config, CON4), vec![CON3]);
    assert!(links(&config, NET1).is_empty());
    assert!(links(&config, CON2).is_empty());
}

#[test]
fn dependencies_of_returns_link_targets() {
    let mut config = setup_config();
    config.resolve_links(ModuleDependencyPolicy::default()).unwrap();

    let deps = config.dependencies_of(CON4).unwrap();
    assert_eq!(addresses(&deps), vec![CON3]);

    let deps = config.dependencies_of(CON1).unwrap();
    assert_eq!(deps.len(), 4);
}

#[test]
fn dependencies_of_before_wiring_is_empty() {
    let config = setup_config();
    assert!(config.dependencies_of(CON1).unwrap().is_empty());
}

#[test]
fn skip_disabled_drops_disabled_module_members() {
    let mut config = setup_config();
    config
        .find_by_address_mut(CON3)
        .unwrap()
        .metadata_mut()
        .disabled = true;

    config
        .resolve_links(ModuleDependencyPolicy::SkipDisabled)
        .unwrap();

    assert_eq!(links(&config, CON1), vec![CON2, CON4, OUT1]);
    // A direct reference is always honoured.
    assert_eq!(links(&config, CON4), vec![CON3]);
}

#[test]
fn include_disabled_keeps_disabled_module_members() {
    let mut config = setup_config();
    config
        .find_by_address_mut(CON3)
        .unwrap()
        .metadata_mut()
        .disabled = true;

    config
        .resolve_links(ModuleDependencyPolicy::IncludeDisabled)
        .unwrap();

    assert_eq!(links(&config, CON1), vec![CON2, CON3, CON4, OUT1]);
}

#[test]
fn overlapping_dependencies_are_deduplicated() {
    let registry = registry();
    let mut config = setup_config();
    config
        .add(resource(
            &registry,
            TYPE_CONTAINER,
            "overlap",
            "",
            &[
                "module.module1.output.fqdn",
                "module.module1.module2",
                "module.module1.output.fqdn",
                "resource.network.cloud",
            ],
        ))
        .unwrap();

    config.resolve_links(ModuleDependencyPolicy::default()).unwrap();

    assert_eq!(
        links(&config, "resource.container.overlap"),
        vec![OUT1, CON3, CON4, NET1]
    );
}

#[test]
fn rewiring_replaces_previous_links() {
    let mut config = setup_config();
    config.resolve_links(ModuleDependencyPolicy::default()).unwrap();

    config
        .find_by_address_mut(CON1)
        .unwrap()
        .metadata_mut()
        .depends_on = vec!["resource.network.cloud".into()];
    config.resolve_links(ModuleDependencyPolicy::default()).unwrap();

    assert_eq!(links(&config, CON1), vec![NET1]);
}

#[test]
fn unresolved_dependency_names_the_entry() {
    let registry = registry();
    let mut config = setup_config();
    config
        .add(resource(
            &registry,
            TYPE_CONTAINER,
            "broken",
            "module1",
            &["resource.container.missing"],
        ))
        .unwrap();

    let err = config
        .resolve_links(ModuleDependencyPolicy::default())
        .unwrap_err();

    assert_eq!(err, ConfigError::not_found("resource.container.missing"));
    // Nothing was written.
    assert!(links(&config, CON1).is_empty());
}

#[test]
fn dependency_on_empty_module_is_not_found() {
    let registry = registry();
    let mut config = setup_config();
    config
        .add(resource(
            &registry,
            TYPE_CONTAINER,
            "lonely",
            "",
            &["module.module9"],
        ))
        .unwrap();

    let err = config
        .resolve_links(ModuleDependencyPolicy::default())
        .unwrap_err();
    assert_eq!(err, ConfigError::not_found("module.module9"));
}

#[test]
fn malformed_dependency_is_reported() {
    let registry = registry();
    let mut config = setup_config();
    config
        .add(resource(&registry, TYPE_CONTAINER, "typo", "", &["module1.module2"]))
        .unwrap();

    let err = config
        .resolve_links(ModuleDependencyPolicy::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::MalformedAddress(_)));
}
