use std::fs;
use std::path::Path;

use fragsplit::app::split::Splitter;
use fragsplit::app::write::FileWriter;
use fragsplit::domain::errors::SplitError;
use fragsplit::domain::model::WriteOutcome;

fn splitter(root: &Path) -> Splitter {
    Splitter::new(FileWriter::new(root))
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).expect("output file exists")
}

fn file_count(root: &Path) -> usize {
    let mut count = 0;
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn writes_one_file_per_marker() {
    let temp = tempfile::tempdir().unwrap();
    let source = "\
header text is ignored
/* including file 'src/lib.rs' */
pub mod a;

/* including file 'src/a.rs' */ // trailing note
pub fn a() {}
/* including file 'README.md' */
# Title
";

    let report = splitter(temp.path()).split_str(source);

    assert_eq!(report.written(), 3);
    assert_eq!(file_count(temp.path()), 3);
    assert_eq!(read(temp.path(), "src/lib.rs"), "pub mod a;");
    assert_eq!(read(temp.path(), "src/a.rs"), "pub fn a() {}");
    assert_eq!(read(temp.path(), "README.md"), "# Title");
}

#[test]
fn last_directive_wins_for_duplicate_paths() {
    let temp = tempfile::tempdir().unwrap();
    let source = "\
/* including file 'dup.txt' */
first
/* including file 'other.txt' */
middle
/* including file 'dup.txt' */
second
";

    let report = splitter(temp.path()).split_str(source);

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(read(temp.path(), "dup.txt"), "second");
    assert_eq!(read(temp.path(), "other.txt"), "middle");
}

#[test]
fn blank_fragment_produces_empty_file() {
    let temp = tempfile::tempdir().unwrap();
    let source = "/* including file 'empty.txt' */\n\n\n  \n/* including file 'full.txt' */\ndata\n";

    splitter(temp.path()).split_str(source);

    assert_eq!(read(temp.path(), "empty.txt"), "");
    assert_eq!(read(temp.path(), "full.txt"), "data");
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("bundle.txt");
    let out = temp.path().join("out");
    fs::write(
        &input,
        "/* including file 'x/one.txt' */\nαβγ\n/* including file 'two.txt' */\n\ttabbed\n",
    )
    .unwrap();

    splitter(&out).split_file(&input).unwrap();
    let first = (read(&out, "x/one.txt"), read(&out, "two.txt"));
    splitter(&out).split_file(&input).unwrap();
    let second = (read(&out, "x/one.txt"), read(&out, "two.txt"));

    assert_eq!(first, second);
    assert_eq!(first.0, "αβγ");
}

#[test]
fn no_markers_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();

    let report = splitter(temp.path()).split_str("no markers here\n/* just a comment */\n");

    assert!(report.no_directives());
    assert_eq!(file_count(temp.path()), 0);
}

#[test]
fn missing_input_creates_no_files() {
    let temp = tempfile::tempdir().unwrap();

    let result = splitter(temp.path()).split_file(&temp.path().join("absent.txt"));

    assert!(matches!(result, Err(SplitError::InputNotFound(_))));
    assert_eq!(file_count(temp.path()), 0);
}

#[test]
fn write_failure_does_not_stop_later_fragments() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("occupied"), "a file where a directory is wanted").unwrap();
    let source = "/* including file 'occupied/inner.txt' */\nlost\n/* including file 'after.txt' */\nkept\n";

    let report = splitter(temp.path()).split_str(source);

    assert_eq!(report.failed(), 1);
    assert_eq!(report.written(), 1);
    assert!(matches!(
        &report.outcomes[0],
        WriteOutcome::Failed { path, .. } if path == "occupied/inner.txt"
    ));
    assert_eq!(read(temp.path(), "after.txt"), "kept");
}
