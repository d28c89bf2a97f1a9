//! Property tests for entry rendering.

use std::path::PathBuf;

use proptest::prelude::*;

use frappe_build::domain::services::{import_specifier, render_entry};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_.-]{0,10}").unwrap()
}

fn source_path() -> impl Strategy<Value = PathBuf> {
    proptest::collection::vec(segment(), 1..=4).prop_map(|mut parts| {
        if let Some(last) = parts.last_mut() {
            last.push_str(".ts");
        }
        parts.iter().collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: One import line per file, in input order.
    #[test]
    fn property_entry_has_one_line_per_file(
        files in proptest::collection::vec(source_path(), 0..=12),
    ) {
        let entry = render_entry(&files);
        let lines: Vec<&str> = entry.lines().collect();

        prop_assert_eq!(lines.len(), files.len());
        for (line, file) in lines.iter().zip(&files) {
            let expected = format!("import \"{}\";", import_specifier(file));
            prop_assert_eq!(*line, expected.as_str());
        }
    }

    /// PROPERTY: Specifiers are relative, slash-separated and drop only the final `.ts`.
    #[test]
    fn property_specifier_strips_single_suffix(file in source_path()) {
        let spec = import_specifier(&file);

        prop_assert!(spec.starts_with("./"));
        prop_assert!(!spec.contains('\\'));
        prop_assert_eq!(format!("{}.ts", spec.trim_start_matches("./")), file.to_string_lossy().replace('\\', "/"));
    }
}
