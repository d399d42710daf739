// ============================================================================
// File: fakevisor/src/backends/fake/tests.rs
// ----------------------------------------------------------------------------
// Tests for the fake backend.
// ============================================================================

use std::sync::Arc;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

use crate::backends::{BackendConfig, BackendError, HypervisorBackend, InstanceSpec};
use crate::host::StaticCounters;
use crate::store::{MemoryStore, RecordStore};

use super::{DEFAULT_CONSOLE_COMMAND, FakeBackend, PLACEHOLDER_ID};

const MEMINFO: &str = "MemTotal:        4096000 kB\n\
                       MemFree:          512000 kB\n\
                       Buffers:           10240 kB\n\
                       Cached:            20480 kB\n\
                       Active:           204800 kB\n";

const CPUINFO: &str = "processor\t: 0\nprocessor\t: 1\nprocessor\t: 2\nprocessor\t: 3\n";

fn memory_backend() -> (FakeBackend, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let backend = FakeBackend::with_parts(
        BackendConfig::new("test_fake"),
        store.clone(),
        Arc::new(StaticCounters::new(MEMINFO, CPUINFO)),
    )
    .expect("fake backend");
    (backend, store)
}

fn dir_backend(tmp: &TempDir) -> FakeBackend {
    let config = BackendConfig::new("test_fake").with_run_dir(tmp.path());
    FakeBackend::new(config).expect("fake backend")
}

#[test]
fn start_then_query() {
    let (backend, _) = memory_backend();
    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");

    assert_eq!(backend.list_instances().expect("list"), vec!["web1"]);

    let info = backend
        .instance_info("web1")
        .expect("info")
        .expect("web1 is running");
    assert_eq!(info.name, "web1");
    assert_eq!(info.id, PLACEHOLDER_ID);
    assert_eq!(info.memory, 512);
    assert_eq!(info.vcpus, 2);
    assert!(info.is_running());
    assert_eq!(info.runtime, 0);
}

#[test]
fn start_then_stop() {
    let (backend, _) = memory_backend();
    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");
    backend.stop_instance("web1", false).expect("stop");

    assert!(backend.list_instances().expect("list").is_empty());
    assert_eq!(backend.instance_info("web1").expect("info"), None);
}

#[test]
fn double_start_is_already_running() {
    let (backend, _) = memory_backend();
    let spec = InstanceSpec::new("web1", 512, 2);
    backend.start_instance(&spec).expect("first start");

    let err = backend
        .start_instance(&InstanceSpec::new("web1", 1024, 4))
        .expect_err("second start must fail");
    assert_eq!(
        err,
        BackendError::AlreadyRunning {
            name: "web1".to_string()
        }
    );

    // the first record is untouched
    let info = backend.instance_info("web1").expect("info").expect("running");
    assert_eq!((info.memory, info.vcpus), (512, 2));
}

#[test]
fn stop_without_start_is_not_running() {
    let (backend, _) = memory_backend();
    let err = backend.stop_instance("ghost", true).expect_err("must fail");
    assert_eq!(
        err,
        BackendError::NotRunning {
            name: "ghost".to_string()
        }
    );
}

#[test]
fn second_stop_is_not_running() {
    let (backend, _) = memory_backend();
    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");
    backend.stop_instance("web1", false).expect("stop");

    let err = backend.stop_instance("web1", false).expect_err("must fail");
    assert!(matches!(err, BackendError::NotRunning { .. }));
}

#[test]
fn unknown_instance_is_absent() {
    let (backend, _) = memory_backend();
    assert_eq!(backend.instance_info("nope").expect("info"), None);
    assert_eq!(backend.instance_info("../etc").expect("info"), None);
}

#[test]
fn reboot_never_changes_state() {
    let (backend, _) = memory_backend();
    backend.reboot_instance("idle").expect("reboot of stopped instance");
    assert_eq!(backend.instance_info("idle").expect("info"), None);

    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");
    let before = backend.instance_info("web1").expect("info");
    backend.reboot_instance("web1").expect("reboot");
    assert_eq!(backend.instance_info("web1").expect("info"), before);
}

#[test]
fn invalid_names_are_rejected_on_start() {
    let (backend, _) = memory_backend();
    for name in ["", ".", "..", "a/b"] {
        let err = backend
            .start_instance(&InstanceSpec::new(name, 128, 1))
            .expect_err("invalid name must fail");
        assert!(matches!(err, BackendError::InvalidName { .. }), "{name:?}");
    }
    assert!(backend.list_instances().expect("list").is_empty());
}

#[test]
fn extra_options_are_inert() {
    let (backend, store) = memory_backend();
    let spec = InstanceSpec::new("web1", 256, 1)
        .with_block_device("/dev/sdb")
        .with_extra_config("kernel_args", "ro");
    backend.start_instance(&spec).expect("start");

    assert_eq!(
        store.read("web1").expect("read").as_deref(),
        Some("0\n256\n1\n")
    );
}

#[test]
fn all_instances_info_is_sorted() {
    let (backend, _) = memory_backend();
    backend
        .start_instance(&InstanceSpec::new("db", 2048, 4))
        .expect("start db");
    backend
        .start_instance(&InstanceSpec::new("app", 512, 1))
        .expect("start app");

    let infos = backend.all_instances_info().expect("all info");
    let names: Vec<_> = infos.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["app", "db"]);
    assert_eq!(infos[1].memory, 2048);
}

#[test]
fn all_instances_info_fails_fast_on_corrupt_record() {
    let (backend, store) = memory_backend();
    backend
        .start_instance(&InstanceSpec::new("good", 512, 1))
        .expect("start");
    store.write("bad", "0\nlots\n1\n").expect("write");

    let err = backend.all_instances_info().expect_err("must fail");
    assert_eq!(err.instance_name(), Some("bad"));
    assert!(matches!(err, BackendError::CorruptRecord { .. }));

    // a single lookup of a readable record still works
    assert!(backend.instance_info("good").expect("info").is_some());
}

#[test]
fn listing_fails_when_store_is_gone() {
    let (backend, store) = memory_backend();
    store.detach();
    assert!(matches!(
        backend.list_instances(),
        Err(BackendError::ListingFailed { .. })
    ));
    assert!(backend.all_instances_info().is_err());
}

#[test]
fn verify_reports_missing_store() {
    let (backend, store) = memory_backend();
    assert_eq!(backend.verify(), None);

    store.detach();
    let problem = backend.verify().expect("diagnostic");
    assert!(predicate::str::contains("does not exist").eval(&problem));
}

#[test]
fn node_info_from_counters() {
    let (backend, _) = memory_backend();
    let info = backend.node_info().expect("node info");
    assert_eq!(info.memory_total, 4000);
    assert_eq!(info.memory_free, 500 + 10 + 20);
    assert_eq!(info.memory_dom0, Some(200));
    assert_eq!(info.cpu_total, 4);
}

#[test]
fn node_info_propagates_counter_failures() {
    let backend = FakeBackend::with_parts(
        BackendConfig::new("test_fake"),
        Arc::new(MemoryStore::new()),
        Arc::new(StaticCounters::memory_only(MEMINFO)),
    )
    .expect("fake backend");
    assert!(matches!(
        backend.node_info(),
        Err(BackendError::HostCounters { .. })
    ));
}

#[test]
fn console_command_is_configurable() {
    let (backend, _) = memory_backend();
    assert_eq!(backend.console_command("web1"), DEFAULT_CONSOLE_COMMAND);

    let backend = FakeBackend::with_parts(
        BackendConfig::new("test_fake").with_config("console_command", "echo no console"),
        Arc::new(MemoryStore::new()),
        Arc::new(StaticCounters::new(MEMINFO, CPUINFO)),
    )
    .expect("fake backend");
    assert_eq!(backend.console_command("anything"), "echo no console");
    assert_eq!(backend.backend_type(), "Fake");
}

#[test]
fn new_creates_state_directory() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);

    tmp.child("fakevisor-hypervisor")
        .assert(predicate::path::is_dir());
    assert_eq!(backend.verify(), None);
}

#[test]
fn records_on_disk_match_layout() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);
    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");

    tmp.child("fakevisor-hypervisor/web1").assert("0\n512\n2\n");

    backend.stop_instance("web1", false).expect("stop");
    tmp.child("fakevisor-hypervisor/web1")
        .assert(predicate::path::missing());
}

#[test]
fn state_survives_backend_restart() {
    let tmp = TempDir::new().expect("tempdir");
    dir_backend(&tmp)
        .start_instance(&InstanceSpec::new("web1", 768, 3))
        .expect("start");

    let restarted = dir_backend(&tmp);
    let info = restarted
        .instance_info("web1")
        .expect("info")
        .expect("still running");
    assert_eq!((info.memory, info.vcpus), (768, 3));
}

#[test]
fn hand_written_records_are_read() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);
    tmp.child("fakevisor-hypervisor/legacy")
        .write_str("0 \n1024  \n2\nextra\n")
        .expect("write");

    let info = backend
        .instance_info("legacy")
        .expect("info")
        .expect("present");
    assert_eq!((info.memory, info.vcpus), (1024, 2));
    assert_eq!(backend.list_instances().expect("list"), vec!["legacy"]);
}

#[test]
fn verify_reports_removed_directory() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);
    std::fs::remove_dir_all(tmp.path().join("fakevisor-hypervisor")).expect("remove");

    let problem = backend.verify().expect("diagnostic");
    assert!(problem.contains("fakevisor-hypervisor"));
    assert!(problem.starts_with("The required directory"));
}

#[test]
fn directory_entry_is_not_an_instance() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);
    tmp.child("fakevisor-hypervisor/nested")
        .create_dir_all()
        .expect("mkdir");

    assert!(backend.list_instances().expect("list").is_empty());
    assert_eq!(backend.instance_info("nested").expect("info"), None);
    assert!(matches!(
        backend.stop_instance("nested", false),
        Err(BackendError::NotRunning { .. })
    ));

    // the name is free, but the directory occupies the record's path
    let err = backend
        .start_instance(&InstanceSpec::new("nested", 128, 1))
        .expect_err("cannot write over a directory");
    assert!(matches!(err, BackendError::InstanceIo { .. }));
    tmp.child("fakevisor-hypervisor/nested")
        .assert(predicate::path::is_dir());
}

#[test]
fn unreadable_record_is_instance_io() {
    let tmp = TempDir::new().expect("tempdir");
    let backend = dir_backend(&tmp);
    tmp.child("fakevisor-hypervisor/binary")
        .write_binary(&[0xff, 0xfe, 0xfd, b'\n'])
        .expect("write");

    let err = backend.instance_info("binary").expect_err("must fail");
    assert!(matches!(err, BackendError::InstanceIo { .. }));
    assert_eq!(err.instance_name(), Some("binary"));

    assert!(matches!(
        backend.all_instances_info(),
        Err(BackendError::InstanceIo { .. })
    ));
    // still listed, it is a regular file
    assert_eq!(backend.list_instances().expect("list"), vec!["binary"]);
}

#[test]
fn injected_store_ignores_state_dir() {
    let tmp = TempDir::new().expect("tempdir");
    let state_dir = tmp.child("configured");
    let store = Arc::new(MemoryStore::new());
    let backend = FakeBackend::with_parts(
        BackendConfig::new("test_fake")
            .with_config("state_dir", state_dir.path().to_string_lossy()),
        store.clone(),
        Arc::new(StaticCounters::new(MEMINFO, CPUINFO)),
    )
    .expect("fake backend");

    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");

    state_dir.assert(predicate::path::missing());
    assert!(store.contains("web1").expect("contains"));
    assert_eq!(backend.fake_config().state_dir, state_dir.path());
}

#[test]
fn new_uses_configured_state_dir() {
    let tmp = TempDir::new().expect("tempdir");
    let state_dir = tmp.child("elsewhere");
    let backend = FakeBackend::new(
        BackendConfig::new("test_fake")
            .with_run_dir(tmp.path())
            .with_config("state_dir", state_dir.path().to_string_lossy()),
    )
    .expect("fake backend");

    backend
        .start_instance(&InstanceSpec::new("web1", 512, 2))
        .expect("start");

    state_dir.child("web1").assert("0\n512\n2\n");
    tmp.child("fakevisor-hypervisor")
        .assert(predicate::path::missing());
}
