//! Integration tests for test catalog resolution.

use riscv_test_runner::common::{HarnessError, TestCategory};
use riscv_test_runner::sim::catalog::*;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates an installed riscv-tests tree with the given ISA files.
fn create_tools_tree(isa_files: &[&str]) -> TempDir {
    let tools = TempDir::new().unwrap();
    let isa = tools
        .path()
        .join("riscv64-unknown-elf/share/riscv-tests/isa");
    fs::create_dir_all(&isa).unwrap();
    for name in isa_files {
        fs::write(isa.join(name), b"").unwrap();
    }
    tools
}

fn names(tests: &[TestId]) -> Vec<&str> {
    tests.iter().map(TestId::as_str).collect()
}

/// Tests the test binary directory layout under the tools root.
#[test]
fn test_catalog_directories() {
    let catalog = Catalog::new(Path::new("/opt/riscy"));

    assert_eq!(
        catalog.test_bin_dir(),
        Path::new("/opt/riscy/riscv64-unknown-elf/share/riscv-tests")
    );
    assert_eq!(
        catalog.test_dir(TestCategory::Assembly),
        Path::new("/opt/riscy/riscv64-unknown-elf/share/riscv-tests/isa")
    );
    assert_eq!(
        catalog.test_dir(TestCategory::AssemblyFp),
        catalog.test_dir(TestCategory::Assembly)
    );
    assert_eq!(
        catalog.test_dir(TestCategory::Benchmarks),
        Path::new("/opt/riscy/riscv64-unknown-elf/share/riscv-tests/benchmarks")
    );
}

/// Tests integer ISA tests are taken from rv64ui dump file stems.
#[test]
fn test_assembly_tests_from_dumps() {
    let tools = create_tools_tree(&[
        "rv64ui-p-add.dump",
        "rv64ui-p-add",
        "rv64ui-p-sub.dump",
        "rv64ui-v-add.dump",
        "rv64uf-p-fadd.dump",
    ]);
    let catalog = Catalog::new(tools.path());

    let mut tests = catalog.tests(TestCategory::Assembly).unwrap();
    tests.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(names(&tests), vec!["rv64ui-p-add", "rv64ui-p-sub"]);
}

/// Tests floating-point ISA tests are taken from rv64uf dump file stems.
#[test]
fn test_assembly_fp_tests_from_dumps() {
    let tools = create_tools_tree(&["rv64ui-p-add.dump", "rv64uf-p-fadd.dump", "rv64uf-p-fdiv.dump"]);
    let catalog = Catalog::new(tools.path());

    let mut tests = catalog.tests(TestCategory::AssemblyFp).unwrap();
    tests.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(names(&tests), vec!["rv64uf-p-fadd", "rv64uf-p-fdiv"]);
}

/// Tests a category with no dumps on disk resolves to an empty set.
#[test]
fn test_assembly_without_dumps() {
    let tools = create_tools_tree(&[]);
    let catalog = Catalog::new(tools.path());

    assert!(catalog.tests(TestCategory::Assembly).unwrap().is_empty());
    assert!(catalog.targets(TestCategory::AssemblyFp).unwrap().is_empty());
}

/// Tests the benchmark list is fixed and in declaration order.
#[test]
fn test_benchmark_list() {
    let catalog = Catalog::new(Path::new("/nonexistent"));
    let tests = catalog.tests(TestCategory::Benchmarks).unwrap();

    assert_eq!(tests.len(), 9);
    assert_eq!(names(&tests), BENCHMARKS.to_vec());
    assert_eq!(tests[0].as_str(), "median.riscv");
    assert_eq!(tests[8].as_str(), "security_flush.riscv");
}

/// Tests disabled benchmarks never appear in the resolved list.
#[test]
fn test_disabled_benchmarks_excluded() {
    assert_eq!(DISABLED_BENCHMARKS, ["spmv.riscv"]);

    let catalog = Catalog::new(Path::new("/nonexistent"));
    let targets = catalog.targets(TestCategory::Benchmarks).unwrap();
    for target in targets.iter() {
        let name = target.file_name().unwrap().to_str().unwrap();
        assert!(!DISABLED_BENCHMARKS.contains(&name));
    }
}

/// Tests targets are built from the category directory and test names.
#[test]
fn test_targets_join_test_dir() {
    let tools = create_tools_tree(&["rv64ui-p-add.dump"]);
    let catalog = Catalog::new(tools.path());

    let targets = catalog.targets(TestCategory::Assembly).unwrap();
    let expected = catalog.test_dir(TestCategory::Assembly).join("rv64ui-p-add");
    let paths: Vec<&Path> = targets.iter().collect();
    assert_eq!(paths, vec![expected.as_path()]);
}

/// Tests a tools root containing glob metacharacters is matched literally.
#[test]
fn test_tools_root_with_metacharacters() {
    let base = TempDir::new().unwrap();
    let root = base.path().join("tools[1]");
    let isa = root.join("riscv64-unknown-elf/share/riscv-tests/isa");
    fs::create_dir_all(&isa).unwrap();
    fs::write(isa.join("rv64ui-p-and.dump"), b"").unwrap();

    let tests = Catalog::new(&root).tests(TestCategory::Assembly).unwrap();
    assert_eq!(names(&tests), vec!["rv64ui-p-and"]);
}

/// Tests a tools root that is not valid UTF-8 is reported, not silently empty.
#[cfg(unix)]
#[test]
fn test_non_utf8_tools_root() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = Path::new(OsStr::from_bytes(b"/opt/riscy-\xff"));
    let err = Catalog::new(root).tests(TestCategory::Assembly).unwrap_err();

    assert!(matches!(err, HarnessError::Pattern { .. }));
    assert!(err.is_config());
    assert!(err.to_string().contains("rv64ui-p-*.dump"));
}

/// Tests the tools root is read from the lookup.
#[test]
fn test_tools_root_lookup() {
    let root = tools_root_from(|key| {
        assert_eq!(key, TOOLS_ROOT_ENV);
        Some(OsString::from("/opt/riscy"))
    })
    .unwrap();
    assert_eq!(root, Path::new("/opt/riscy"));
}

/// Tests an unset or empty tools root is a configuration error.
#[test]
fn test_tools_root_missing() {
    let err = tools_root_from(|_| None).unwrap_err();
    assert!(matches!(err, HarnessError::MissingEnv(TOOLS_ROOT_ENV)));

    let err = tools_root_from(|_| Some(OsString::new())).unwrap_err();
    assert!(err.is_config());
}

/// Tests the single-target set used for literal ELF runs.
#[test]
fn test_single_target_set() {
    let set = TargetSet::single("/work/hello.elf");
    assert_eq!(set.len(), 1);
    assert_eq!(set.iter().next(), Some(Path::new("/work/hello.elf")));
}
