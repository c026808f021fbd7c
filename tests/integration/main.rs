//! Integration tests for voxdump

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn voxdump() -> Command {
    cargo_bin_cmd!("voxdump")
}

/// Lay out a fake Linux cache directory for one build variant
fn seed_cache(home: &Path, build_dir: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let cache = home.join(".config").join(build_dir).join("Cache");
    fs::create_dir_all(&cache).unwrap();
    for (name, content) in files {
        fs::write(cache.join(name), content).unwrap();
    }
    cache
}

/// The single timestamped run directory inside a dump root
fn run_dir(output: &Path) -> PathBuf {
    let mut entries: Vec<_> = fs::read_dir(output)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one run directory");
    entries.pop().unwrap()
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

mod cli_tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn help_displays() {
        voxdump()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache dump and file-type recovery"));
    }

    #[test]
    fn version_displays() {
        voxdump()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("voxdump"));
    }

    #[test]
    fn scan_with_no_installs_shows_absent() {
        let home = TempDir::new().unwrap();

        voxdump()
            .args(["scan", "--platform", "linux"])
            .arg("--home")
            .arg(home.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("VARIANT"))
            .stdout(predicate::str::contains("absent"));
    }

    #[test]
    fn scan_json_is_parseable() {
        let home = TempDir::new().unwrap();
        seed_cache(home.path(), "vox", &[("f_1", b"abcd")]);

        let output = voxdump()
            .args(["scan", "--platform", "linux", "--format", "json"])
            .arg("--home")
            .arg(home.path())
            .output()
            .unwrap();

        assert!(output.status.success());
        let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["variant"], "stable");
        assert_eq!(rows[0]["present"], true);
        assert_eq!(rows[0]["files"], 1);
        assert_eq!(rows[0]["bytes"], 4);
        assert_eq!(rows[1]["present"], false);
    }

    #[test]
    fn scan_plain_lists_present_variants_only() {
        let home = TempDir::new().unwrap();
        seed_cache(home.path(), "voxcanary", &[("f_1", b"x")]);

        voxdump()
            .args(["scan", "--platform", "linux", "--format", "plain"])
            .arg("--home")
            .arg(home.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Canary"))
            .stdout(predicate::str::contains("Stable").not());
    }
}

mod dump_tests {
    use super::*;
    use predicates::prelude::*;

    #[test]
    fn dump_with_no_installs_is_a_graceful_noop() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");

        voxdump()
            .args(["dump", "--platform", "linux", "--yes"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .assert()
            .success()
            .stdout(predicate::str::contains("No cache found"));

        assert!(!output_root.exists());
    }

    #[test]
    fn dump_copies_one_present_variant() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");
        seed_cache(
            home.path(),
            "vox",
            &[
                ("f_200", &[1u8; 200][..]),
                ("f_300", &[2u8; 300][..]),
                ("f_500", &[3u8; 500][..]),
            ],
        );

        voxdump()
            .args(["dump", "--platform", "linux", "--yes", "--no-classify"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .assert()
            .success()
            .stdout(predicate::str::contains("Vox PTB: not installed"))
            .stdout(predicate::str::contains("Saved 3 file(s)"));

        let run = run_dir(&output_root);
        // only the present variant gets a subfolder
        assert_eq!(sorted_names(&run), ["Stable"]);
        assert_eq!(sorted_names(&run.join("Stable")), ["f_200", "f_300", "f_500"]);

        // copies are byte-identical to their sources
        let src = home.path().join(".config/vox/Cache/f_500");
        assert_eq!(
            fs::read(src).unwrap(),
            fs::read(run.join("Stable/f_500")).unwrap()
        );
    }

    #[test]
    fn dump_skips_empty_cache_variant() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");
        seed_cache(home.path(), "vox", &[("f_1", b"data")]);
        seed_cache(home.path(), "voxptb", &[]);

        voxdump()
            .args(["dump", "--platform", "linux", "--yes", "--no-classify"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .assert()
            .success()
            .stdout(predicate::str::contains("Vox PTB: cache empty, skipping"));

        let run = run_dir(&output_root);
        assert_eq!(sorted_names(&run), ["Stable"]);
    }

    #[cfg(unix)]
    #[test]
    fn dump_counts_in_use_files_and_copies_the_rest() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");
        let cache = seed_cache(
            home.path(),
            "vox",
            &[
                ("data_1", b"aa".as_slice()),
                ("data_2", b"bb".as_slice()),
                ("data_3", b"cc".as_slice()),
            ],
        );
        // a dangling symlink stands in for a file locked by the client
        std::os::unix::fs::symlink(cache.join("gone"), cache.join("index")).unwrap();

        voxdump()
            .args(["dump", "--platform", "linux", "--yes", "--no-classify"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .assert()
            .success()
            .stdout(predicate::str::contains("1 file(s) in use"))
            .stdout(predicate::str::contains("copied 3 of 4"));

        let run = run_dir(&output_root);
        assert_eq!(
            sorted_names(&run.join("Stable")),
            ["data_1", "data_2", "data_3"]
        );
    }

    #[test]
    fn dump_appends_sniffed_extensions() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");

        let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        png.extend_from_slice(&[0u8; 32]);
        seed_cache(
            home.path(),
            "vox",
            &[("f_img", png.as_slice()), ("f_misc", b"just text".as_slice())],
        );

        voxdump()
            .args(["dump", "--platform", "linux", "--yes"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .assert()
            .success()
            .stdout(predicate::str::contains("identified 1 of 2"));

        let run = run_dir(&output_root);
        assert_eq!(sorted_names(&run.join("Stable")), ["f_img.png", "f_misc"]);
    }

    #[test]
    fn dump_no_classify_keeps_original_names() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");

        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        seed_cache(home.path(), "vox", &[("f_img", png.as_slice())]);

        voxdump()
            .args(["dump", "--platform", "linux", "--yes", "--no-classify"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .assert()
            .success();

        let run = run_dir(&output_root);
        assert_eq!(sorted_names(&run.join("Stable")), ["f_img"]);
    }

    #[test]
    fn dump_handles_two_present_variants_in_order() {
        let home = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("dump");
        seed_cache(home.path(), "vox", &[("a", b"1".as_slice())]);
        seed_cache(home.path(), "voxdevelopment", &[("b", b"2".as_slice())]);

        let output = voxdump()
            .args(["dump", "--platform", "linux", "--yes", "--no-classify"])
            .arg("--home")
            .arg(home.path())
            .arg("--output")
            .arg(&output_root)
            .output()
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stable_at = stdout.find("Vox Stable: copied").unwrap();
        let dev_at = stdout.find("Vox Development: copied").unwrap();
        assert!(stable_at < dev_at, "variants must report in fixed order");

        let run = run_dir(&output_root);
        assert_eq!(sorted_names(&run), ["Development", "Stable"]);
    }
}
