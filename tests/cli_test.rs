use std::process::{Command, Output};

fn run_nre(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nre"))
        .args(args)
        .output()
        .expect("Failed to execute nre")
}

fn stdout_of(output: &Output) -> String {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_arithmetic_report() {
    let output = run_nre(&[
        "--target", "2", "--limit", "30", "-j", "1", "--keep", "3", "--cleanup", "10",
        "--library", "arithmetic", "--progress-mode", "off",
    ]);
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines[0], "Expression\tValue\t\t(Error)");
    assert_eq!(lines[1], "BBC\t2.000000000000\t(0.000000000000)");
    assert_eq!(lines[2], "B\t1.000000000000\t(1.000000000000)");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_cli_names_rendering_and_constant() {
    let output = run_nre(&[
        "--target", "1.5", "--limit", "200", "-j", "2", "--keep", "2", "--cleanup", "10",
        "--library", "arithmetic", "--constant", "half=0.5", "--render", "names",
        "--progress-mode", "off",
    ]);
    let stdout = stdout_of(&output);
    // With half at code 2 and add at 3, "half 1 add" is index 54 (worker 0)
    // and "1 half add" is index 57 (worker 1). The tie goes to worker 0.
    let best = stdout.lines().nth(1).expect("one result row");
    assert_eq!(best, "half 1 add\t1.500000000000\t(0.000000000000)");
}

#[test]
fn test_cli_stats() {
    let output = run_nre(&[
        "--limit", "5000", "-j", "2", "--keep", "5", "--cleanup", "50",
        "--progress-mode", "log", "--stats",
    ]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Search Statistics:"));
    assert!(stdout.contains("Candidates evaluated: 4998"));
    assert!(stdout.contains("Worker 1:"));
}

#[test]
fn test_cli_rejects_bad_config() {
    let output = run_nre(&["--keep", "10", "--cleanup", "5", "--progress-mode", "off"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cleanup interval"), "stderr: {}", stderr);
}

#[test]
fn test_cli_rejects_bad_constant() {
    let output = run_nre(&["--constant", "tau", "--progress-mode", "off"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid constant"), "stderr: {}", stderr);
}
