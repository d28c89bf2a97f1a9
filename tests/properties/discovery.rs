//! Property tests for source scanning and unit discovery.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::tempdir;

use frappe_build::application::discover;
use frappe_build::infrastructure::scan_sources;
use frappe_build::Unit;

fn file_name() -> impl Strategy<Value = String> {
    let stem = proptest::string::string_regex("[a-z][a-z0-9]{0,6}").unwrap();
    let ext = prop_oneof![Just(".ts"), Just(".d.ts"), Just(".js"), Just(".tsx")];
    (stem, ext).prop_map(|(stem, ext)| format!("{stem}{ext}"))
}

fn relative_file() -> impl Strategy<Value = PathBuf> {
    let dirs = proptest::collection::vec(
        proptest::string::string_regex("[a-z]{1,5}").unwrap(),
        0..=2,
    );
    (dirs, file_name()).prop_map(|(dirs, name)| {
        let mut path: PathBuf = dirs.iter().collect();
        path.push(name);
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The scan yields exactly the `.ts` files that are not declarations.
    #[test]
    fn property_scan_matches_source_filter(
        files in proptest::collection::btree_set(relative_file(), 0..=10),
    ) {
        let dir = tempdir().unwrap();
        let mut expected = BTreeSet::new();
        for file in &files {
            let path = dir.path().join(file);
            // a generated name may collide with a generated directory
            if fs::create_dir_all(path.parent().unwrap()).is_err() || path.is_dir() {
                continue;
            }
            if fs::write(&path, "export {};\n").is_err() {
                continue;
            }
            let name = file.file_name().unwrap().to_string_lossy().into_owned();
            if name.ends_with(".ts") && !name.ends_with(".d.ts") {
                expected.insert(file.clone());
            }
        }

        let scanned: BTreeSet<PathBuf> = scan_sources(dir.path()).collect();

        prop_assert_eq!(scanned, expected);
    }

    /// PROPERTY: Discovery is repeatable and a unit never lists a declaration file.
    #[test]
    fn property_discovery_is_idempotent(
        names in proptest::collection::btree_set("[a-z]{1,6}", 1..=4),
        with_assets in any::<bool>(),
    ) {
        let dir = tempdir().unwrap();
        for name in &names {
            let ts = dir.path().join("app/doctype").join(name).join("ts");
            fs::create_dir_all(&ts).unwrap();
            fs::write(ts.join("index.ts"), "export {};\n").unwrap();
            fs::write(ts.join("globals.d.ts"), "declare const x: 1;\n").unwrap();
        }
        if with_assets {
            let ts = dir.path().join("app/public/ts");
            fs::create_dir_all(&ts).unwrap();
            fs::write(ts.join("main.ts"), "export {};\n").unwrap();
        }

        let first = discover(dir.path()).unwrap();
        let second = discover(dir.path()).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), names.len() + usize::from(with_assets));
        for unit in &first {
            prop_assert!(unit
                .source_files()
                .iter()
                .all(|f| !f.to_string_lossy().ends_with(".d.ts")));
        }
        let modules: Vec<String> = first
            .iter()
            .filter(|u| matches!(u, Unit::Module(_)))
            .map(Unit::label)
            .collect();
        prop_assert_eq!(modules, names.iter().cloned().collect::<Vec<_>>());
    }
}
