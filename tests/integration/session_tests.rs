use dupe_handler::output::Palette;
use dupe_handler::session::{PromptState, Session, SessionError, SessionOptions, SessionOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn run(dir: &Path, script: &str) -> (Result<SessionOutcome, SessionError>, String) {
    let mut out = Vec::new();
    let options = SessionOptions {
        palette: Palette::plain(),
        ..SessionOptions::default()
    };
    let result = Session::new(script.as_bytes(), &mut out, dir, options).run();
    (result, String::from_utf8(out).unwrap())
}

/// `a.txt` and `b.txt` hold "hello", `c.txt` holds "hey".
fn hello_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"hey").unwrap();
    let root = dir.path().canonicalize().unwrap();
    (dir, root)
}

#[test]
fn test_duplicate_report_layout() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, "\n1\nyes\nno\n");
    let outcome = result.unwrap();

    assert!(outcome.duplicates_shown);
    assert_eq!(outcome.duplicates_listed, 2);

    let report = &text[text.find("Hash: ").unwrap()..];
    let expected = format!(
        "Hash: {}\n1. {}\n2. {}\n",
        blake3::hash(b"hello").to_hex(),
        root.join("a.txt").display(),
        root.join("b.txt").display()
    );
    assert!(report.starts_with(&expected), "report was:\n{report}");
    assert_eq!(text.matches("Hash: ").count(), 1);
    assert!(!report.contains("c.txt"));
}

#[test]
fn test_listing_descending() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, "\n1\nno\n");
    assert!(result.is_ok());

    let five = text.find("\n5 bytes\n").unwrap();
    let three = text.find("\n3 bytes\n").unwrap();
    assert!(five < three);
    assert!(text.contains(&format!("{}\n", root.join("c.txt").display())));
}

#[test]
fn test_listing_ascending() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, "\n2\nno\n");
    assert!(result.is_ok());

    let five = text.find("\n5 bytes\n").unwrap();
    let three = text.find("\n3 bytes\n").unwrap();
    assert!(three < five);
}

#[test]
fn test_out_of_range_selection_then_delete() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, "\n1\nyes\nyes\n1 3\n1\n");
    let outcome = result.unwrap();

    assert_eq!(
        text.matches("Please enter space separated integers only")
            .count(),
        1
    );
    assert!(text.contains("Total freed up space: 5 bytes"));
    assert_eq!(outcome.bytes_freed(), 5);
    assert!(!outcome.has_problems());

    assert!(!root.join("a.txt").exists());
    assert!(root.join("b.txt").exists());
    assert!(root.join("c.txt").exists());
}

#[test]
fn test_repeated_index_frees_once() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, "\n1\nyes\nyes\n2 2\n");
    let outcome = result.unwrap();

    assert!(text.contains("Total freed up space: 5 bytes"));
    assert_eq!(outcome.bytes_freed(), 5);
    assert!(root.join("a.txt").exists());
    assert!(!root.join("b.txt").exists());
}

#[test]
fn test_decline_deletion_keeps_files() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, "\n1\nyes\nno\n");
    let outcome = result.unwrap();

    assert!(outcome.deletion.is_none());
    assert!(!text.contains("Total freed up space"));
    assert!(root.join("a.txt").exists());
    assert!(root.join("b.txt").exists());
}

#[test]
fn test_suffix_without_match() {
    let (_dir, root) = hello_fixture();

    let (result, text) = run(&root, ".png\n1\nyes\n");
    let outcome = result.unwrap();

    assert_eq!(outcome.files_scanned, 0);
    assert!(text.contains("No files found."));
    assert!(text.contains("No duplicates found. Bye!"));
}

#[test]
fn test_no_duplicates() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one"), b"one").unwrap();
    fs::write(dir.path().join("two"), b"two").unwrap();

    let (result, text) = run(dir.path(), "\n1\nyes\n");
    let outcome = result.unwrap();

    assert_eq!(outcome.files_scanned, 2);
    assert!(!outcome.duplicates_shown);
    assert!(text.contains("No duplicates found. Bye!"));
}

#[test]
fn test_deleted_file_modified_since_scan() {
    let (_dir, root) = hello_fixture();
    let input = "\n1\nyes\nyes\n1\n";

    // Change the file between the duplicate report and the deletion pass
    struct Tamper<'a> {
        lines: std::str::Lines<'a>,
        target: PathBuf,
        answered: usize,
    }

    impl dupe_handler::session::LineSource for Tamper<'_> {
        fn next_line(&mut self) -> std::io::Result<Option<String>> {
            self.answered += 1;
            if self.answered == 5 {
                fs::write(&self.target, b"hello, world")?;
            }
            Ok(self.lines.next().map(str::to_string))
        }
    }

    let source = Tamper {
        lines: input.lines(),
        target: root.join("a.txt"),
        answered: 0,
    };
    let mut out = Vec::new();
    let options = SessionOptions {
        palette: Palette::plain(),
        ..SessionOptions::default()
    };
    let outcome = Session::new(source, &mut out, &root, options).run().unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(outcome.has_problems());
    assert_eq!(outcome.bytes_freed(), 0);
    assert!(text.contains("Could not delete"));
    assert!(text.contains("Total freed up space: 0 bytes"));
    assert!(root.join("a.txt").exists());
}

#[test]
fn test_eof_at_indices_prompt() {
    let (_dir, root) = hello_fixture();

    let (result, _) = run(&root, "\n1\nyes\nyes\n");

    assert!(matches!(
        result,
        Err(SessionError::InputClosed(PromptState::AwaitIndices))
    ));
    assert!(root.join("a.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_unreadable_entries_are_reported_and_flagged() {
    use dupe_handler::error::ExitCode;

    let Some(tree) = super::fixtures::LockedTree::new() else {
        return;
    };

    let (result, text) = run(tree.path(), "\n1\nyes\nno\n");
    let outcome = result.unwrap();

    assert_eq!(outcome.files_scanned, 2);
    assert_eq!(outcome.scan_errors.len(), 2);
    assert_eq!(text.matches("Skipped: Permission denied").count(), 2);
    assert!(outcome.duplicates_shown);
    assert!(outcome.has_problems());
    assert_eq!(outcome.exit_code(), ExitCode::PartialSuccess);
    assert!(tree.locked_file.exists());
}

#[test]
fn test_clean_session_exit_code() {
    use dupe_handler::error::ExitCode;

    let (_dir, root) = hello_fixture();

    let (result, _) = run(&root, "\n1\nyes\nyes\n1\n");

    assert_eq!(result.unwrap().exit_code(), ExitCode::Success);
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_is_not_offered_as_duplicate() {
    let dir = TempDir::new().unwrap();
    let real = dir.path().join("real.bin");
    fs::write(&real, vec![0u8; 1000]).unwrap();
    let link = dir.path().join("zlink.bin");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let mut out = Vec::new();
    let options = SessionOptions {
        follow_symlinks: true,
        palette: Palette::plain(),
        ..SessionOptions::default()
    };
    let outcome = Session::new("\n1\nyes\n".as_bytes(), &mut out, dir.path(), options)
        .run()
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(outcome.files_scanned, 1);
    assert_eq!(outcome.duplicates_listed, 0);
    assert!(text.contains("No duplicates found. Bye!"));
    assert!(!text.contains("zlink.bin"));
    assert!(real.exists());
    assert!(link.exists());
}
