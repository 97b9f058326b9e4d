//! Snapshot capture of real process state during assembly.
//!
//! These tests mutate the process environment and the process-wide property
//! store, so they run serially and restore state through guards.

mod common;

use rstest::rstest;
use serde_json::json;
use serial_test::serial;
use strata_config::{
    Assembler, AssemblyOptions, InMemoryRepository, StrataError, remove_process_property,
    set_process_property,
};
use test_helpers::env;

use common::PassThrough;

fn repository_with(text: &str) -> InMemoryRepository {
    InMemoryRepository::new().with_source(
        "app-configuration.yaml",
        "bundled/app-configuration.yaml",
        text,
    )
}

#[rstest]
#[serial]
fn environment_variables_resolve_during_assembly() {
    let _guard = env::set_var("STRATA_CAPTURE_HOST", "from-env");
    let repository = repository_with("host: ${STRATA_CAPTURE_HOST}\n");
    let configuration = Assembler::new(&repository, &PassThrough)
        .assemble(AssemblyOptions::builder("app").build())
        .expect("assemble");
    assert_eq!(configuration, json!({"host": "from-env"}));
}

#[rstest]
#[serial]
fn process_properties_shadow_environment_variables() {
    let _guard = env::set_var("STRATA_CAPTURE_HOST", "from-env");
    set_process_property("STRATA_CAPTURE_HOST", "from-process");
    let repository = repository_with("host: ${STRATA_CAPTURE_HOST}\n");
    let configuration = Assembler::new(&repository, &PassThrough)
        .assemble(AssemblyOptions::builder("app").build())
        .expect("assemble");
    remove_process_property("STRATA_CAPTURE_HOST");
    assert_eq!(configuration, json!({"host": "from-process"}));
}

#[rstest]
#[serial]
fn explicit_properties_shadow_every_other_tier() {
    let _guard = env::set_var("STRATA_CAPTURE_HOST", "from-env");
    set_process_property("STRATA_CAPTURE_HOST", "from-process");
    let repository = repository_with("host: ${STRATA_CAPTURE_HOST}\n");
    let configuration = Assembler::new(&repository, &PassThrough)
        .assemble(
            AssemblyOptions::builder("app")
                .property("STRATA_CAPTURE_HOST", "from-options")
                .build(),
        )
        .expect("assemble");
    remove_process_property("STRATA_CAPTURE_HOST");
    assert_eq!(configuration, json!({"host": "from-options"}));
}

#[rstest]
#[serial]
fn unresolved_references_abort_the_run() {
    let _guard = env::remove_var("STRATA_CAPTURE_ABSENT");
    let repository = repository_with("host: ${STRATA_CAPTURE_ABSENT}\n");
    let err = Assembler::new(&repository, &PassThrough)
        .assemble(AssemblyOptions::builder("app").build())
        .expect_err("unresolved reference");
    match &*err {
        StrataError::UnresolvedProperty(details) => {
            assert_eq!(details.name, "STRATA_CAPTURE_ABSENT");
        }
        other => panic!("unexpected error: {other}"),
    }
}
