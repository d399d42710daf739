// ============================================================================
// File: fakevisor/tests/backend_contract.rs
// ----------------------------------------------------------------------------
// Backend contract tests through the public factory.
// ============================================================================

//! Contract tests run against backends built through the public factory.

use std::fs;
use std::sync::Arc;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

use fakevisor::{
    BackendConfig, BackendError, FakeBackend, HypervisorBackend, InstanceSpec, MemoryStore,
    StaticCounters, create_backend, init_logging,
};

fn dir_backend(tmp: &TempDir) -> Box<dyn HypervisorBackend> {
    init_logging();
    let config = BackendConfig::new("contract").with_run_dir(tmp.path());
    create_backend("fake", config).expect("fake backend")
}

/// Properties every backend must satisfy for a fresh instance name
fn check_lifecycle(backend: &dyn HypervisorBackend, name: &str) {
    assert_eq!(backend.instance_info(name).expect("info"), None);
    assert!(matches!(
        backend.stop_instance(name, false),
        Err(BackendError::NotRunning { .. })
    ));

    backend
        .start_instance(&InstanceSpec::new(name, 512, 2))
        .expect("start");
    assert!(
        backend
            .list_instances()
            .expect("list")
            .contains(&name.to_string())
    );
    let info = backend.instance_info(name).expect("info").expect("running");
    assert_eq!((info.memory, info.vcpus), (512, 2));

    assert!(matches!(
        backend.start_instance(&InstanceSpec::new(name, 512, 2)),
        Err(BackendError::AlreadyRunning { .. })
    ));

    backend.reboot_instance(name).expect("reboot");
    assert_eq!(backend.instance_info(name).expect("info"), Some(info));

    backend.stop_instance(name, false).expect("stop");
    assert_eq!(backend.instance_info(name).expect("info"), None);
    assert!(matches!(
        backend.stop_instance(name, true),
        Err(BackendError::NotRunning { .. })
    ));
}

#[test]
fn directory_backend_honours_contract() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);
    for name in ["web1", "db.example.com", "node-42"] {
        check_lifecycle(backend.as_ref(), name);
    }
    assert_eq!(backend.verify(), None);
}

#[test]
fn memory_backend_honours_contract() {
    let backend = FakeBackend::with_parts(
        BackendConfig::new("contract"),
        Arc::new(MemoryStore::new()),
        Arc::new(StaticCounters::new("MemTotal: 1024 kB\n", "processor : 0\n")),
    )
    .expect("fake backend");
    check_lifecycle(&backend, "web1");
}

#[test]
fn web1_scenario() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);

    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");
    assert_eq!(backend.list_instances().expect("list"), vec!["web1"]);

    let info = backend.instance_info("web1").expect("info").expect("running");
    assert_eq!(info.name, "web1");
    assert_eq!(info.id, "0");
    assert_eq!(info.memory, 512);
    assert_eq!(info.vcpus, 2);

    tmp.child("fakevisor-hypervisor/web1")
        .assert(predicate::str::starts_with("0\n512\n2"));

    backend.stop_instance("web1", false).expect("stop");
    assert!(backend.list_instances().expect("list").is_empty());
    assert_eq!(backend.instance_info("web1").expect("info"), None);
}

#[test]
fn node_info_from_tables_on_disk() {
    let tmp = TempDir::new().expect("tempdir");
    let meminfo = tmp.child("meminfo");
    meminfo
        .write_str("MemTotal:       4096000 kB\nMemFree:         512000 kB\n")
        .expect("write meminfo");
    let cpuinfo = tmp.child("cpuinfo");
    cpuinfo
        .write_str("processor\t: 0\nbogomips\t: 4800.00\n\nprocessor\t: 1\nbogomips\t: 4800.00\n")
        .expect("write cpuinfo");

    let config = BackendConfig::new("node")
        .with_run_dir(tmp.path())
        .with_config("meminfo_path", meminfo.path().to_string_lossy())
        .with_config("cpuinfo_path", cpuinfo.path().to_string_lossy());
    let backend = create_backend("fake", config).expect("fake backend");

    let info = backend.node_info().expect("node info");
    assert_eq!(info.memory_total, 4000);
    assert!(info.memory_free >= 500);
    assert_eq!(info.cpu_total, 2);
    assert_eq!(info.memory_dom0, None);

    fs::remove_file(cpuinfo.path()).expect("remove cpuinfo");
    assert!(matches!(
        backend.node_info(),
        Err(BackendError::HostCounters { .. })
    ));
}

#[test]
fn verify_and_console() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);

    assert_eq!(
        backend.console_command("anything"),
        "echo Console not available for fake hypervisor"
    );

    fs::remove_dir_all(tmp.path().join("fakevisor-hypervisor")).expect("remove state dir");
    let problem = backend.verify().expect("diagnostic");
    assert!(predicate::str::contains("fakevisor-hypervisor").eval(&problem));
    assert!(matches!(
        backend.list_instances(),
        Err(BackendError::ListingFailed { .. })
    ));
}
