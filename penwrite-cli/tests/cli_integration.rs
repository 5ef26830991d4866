use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("penwrite_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_penwrite(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_penwrite"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run penwrite")
}

/// A two-glyph font: a straight-line 'I' and a triangular 'A'.
const TEST_FONT: &str = "\
999 73 2
5 0 0
5 18 1
999 65 3
0 0 0
5 18 1
10 0 1
";

fn write_inputs(dir: &TestDir, text: &str) {
    fs::write(dir.path.join("font.txt"), TEST_FONT).expect("write font file");
    fs::write(dir.path.join("text.txt"), text).expect("write text file");
}

#[test]
fn dry_run_emits_preamble_then_strokes() {
    let dir = TestDir::new("dry_run");
    write_inputs(&dir, "I");

    let output = run_penwrite(
        &["text.txt", "--font", "font.txt", "--height", "9", "--dry-run"],
        &dir.path,
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Height 9 over an 18-unit design space halves every offset.
    assert_eq!(
        stdout,
        "G1 X0 Y0 F1000\nM3\nS0\nG0 X2.50 Y0.00\nG1 X2.50 Y9.00\n"
    );
}

#[test]
fn repository_font_plots_a_document() {
    let dir = TestDir::new("repo_font");
    fs::write(dir.path.join("text.txt"), "HELLO WORLD.\n").expect("write text file");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root from crate dir");
    let font_path = workspace_root.join("fonts/single_stroke.txt");

    let output = run_penwrite(
        &[
            "text.txt",
            "--font",
            font_path.to_str().expect("font path is utf-8"),
            "--height",
            "6",
            "--dry-run",
        ],
        &dir.path,
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(&lines[..3], &["G1 X0 Y0 F1000", "M3", "S0"]);
    assert!(lines.len() > 20, "expected stroke commands, got: {stdout}");
    assert!(
        lines[3..]
            .iter()
            .all(|l| l.starts_with("G0 ") || l.starts_with("G1 ")),
        "unexpected command line in: {stdout}"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Plotted 11 glyphs"),
        "expected summary on stderr, got: {stderr}"
    );
}

#[test]
fn out_of_range_height_flag_is_fatal() {
    let dir = TestDir::new("bad_height");
    write_inputs(&dir, "I");

    let output = run_penwrite(
        &["text.txt", "--font", "font.txt", "--height", "3", "--dry-run"],
        &dir.path,
    );

    assert!(!output.status.success(), "process should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("text height"),
        "expected height error, got: {stderr}"
    );
}

#[test]
fn missing_height_prompts_until_valid() {
    let dir = TestDir::new("prompt");
    write_inputs(&dir, "I");

    let mut child = Command::new(env!("CARGO_BIN_EXE_penwrite"))
        .args(["text.txt", "--font", "font.txt", "--dry-run"])
        .current_dir(&dir.path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn penwrite");

    child
        .stdin
        .as_mut()
        .expect("child stdin")
        .write_all(b"99\n9\n")
        .expect("write heights");

    let output = child.wait_with_output().expect("wait for penwrite");
    assert!(output.status.success(), "process failed: {output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("outside the accepted range"),
        "expected a rejection before the re-prompt, got: {stderr}"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("G1 X2.50 Y9.00"),
        "expected strokes at the re-prompted height, got: {stdout}"
    );
}

#[test]
fn preview_writes_svg_file() {
    let dir = TestDir::new("preview");
    write_inputs(&dir, "AI");

    let output = run_penwrite(
        &[
            "text.txt",
            "--font",
            "font.txt",
            "--height",
            "8",
            "--preview",
            "out.svg",
        ],
        &dir.path,
    );

    assert!(output.status.success(), "process failed: {output:?}");
    let svg_path = dir.path.join("out.svg");
    assert!(svg_path.is_file(), "expected preview at {svg_path:?}");
    let svg = fs::read_to_string(svg_path).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert!(svg.contains("path"), "expected rendered path element");

    // Preview without --dry-run must not print commands.
    assert!(output.stdout.is_empty(), "stdout should be empty: {output:?}");
}

#[test]
fn missing_font_file_is_fatal() {
    let dir = TestDir::new("missing_font");
    fs::write(dir.path.join("text.txt"), "I").expect("write text file");

    let output = run_penwrite(
        &["text.txt", "--font", "nope.txt", "--height", "8", "--dry-run"],
        &dir.path,
    );

    assert!(!output.status.success(), "process should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error loading font"),
        "expected font error, got: {stderr}"
    );
}
