//! Checks that every source file has a mirrored unit test file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Crate roots and module declarations carry no logic of their own
    const UNMIRRORED: [&str; 3] = ["main.rs", "lib.rs", "mod.rs"];

    fn relative_paths(base: &Path) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();
        if let Err(error) = walk(base, base, &mut paths) {
            assert!(!base.exists(), "failed to scan {}: {error}", base.display());
        }
        paths
    }

    fn walk(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(io::Error::other)?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                walk(&path, base, paths)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn is_unmirrored(relative: &str) -> bool {
        UNMIRRORED
            .iter()
            .any(|name| relative == *name || relative.ends_with(&format!("/{name}")))
    }

    fn report(title: &str, lines: &[String]) -> String {
        format!("{title}:\n{}", lines.join("\n"))
    }

    // Tests every source file and directory has a unit test counterpart
    // Verified by adding a source file without tests
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_paths(Path::new("src"));
        let unit = relative_paths(Path::new("tests/unit"));

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_unmirrored(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("source files without unit tests", &missing)
        );
    }

    // Tests every unit test file mirrors an existing source file
    // Verified by renaming a source module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_paths(Path::new("src"));
        let unit = relative_paths(Path::new("tests/unit"));

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("unit tests without source files", &orphaned)
        );
    }

    // Tests every test file outside the module wiring defines a test
    // Verified by emptying a unit test file
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");

        let empty: Vec<String> = relative_paths(tests_dir)
            .into_iter()
            .filter(|path| Path::new(path).extension().is_some_and(|ext| ext == "rs"))
            .filter(|path| !is_unmirrored(path) && !is_harness(tests_dir, path))
            .filter(|path| {
                fs::read_to_string(tests_dir.join(path))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("test files without #[test] functions", &empty)
        );
    }

    // Top-level harness files only pull in the directory of the same name
    fn is_harness(tests_dir: &Path, relative: &str) -> bool {
        !relative.contains('/') && tests_dir.join(relative).with_extension("").is_dir()
    }
}
