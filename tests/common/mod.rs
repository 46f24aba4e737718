//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory with a Taskfile.yml
pub fn create_test_taskfile(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let taskfile = temp_dir.path().join("Taskfile.yml");
    fs::write(&taskfile, content).unwrap();
    (temp_dir, taskfile)
}

/// Create a Taskfile at the top of a directory tree and return a working
/// directory `depth` levels below it
pub fn create_test_taskfile_above(content: &str, depth: usize) -> (TempDir, PathBuf, PathBuf) {
    let (temp_dir, taskfile) = create_test_taskfile(content);
    let mut work = temp_dir.path().to_path_buf();
    for level in 0..depth {
        work = work.join(format!("level{}", level + 1));
    }
    fs::create_dir_all(&work).unwrap();
    (temp_dir, taskfile, work)
}

/// Write an executable script standing in for the external runner. It logs
/// its arguments, `CLI_ARGS` and working directory to `runner.log` and exits
/// with `exit_code`.
#[cfg(unix)]
pub fn create_fake_runner(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let log = dir.join("runner.log");
    let script = dir.join("fake-task");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\n\
             if [ \"$3\" = \"--list\" ]; then echo \"task: Available tasks\"; exit 0; fi\n\
             echo \"args=$*\" >> {log}\n\
             echo \"cli_args=$CLI_ARGS\" >> {log}\n\
             echo \"cwd=$(pwd)\" >> {log}\n\
             exit {code}\n",
            log = log.display(),
            code = exit_code
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

/// Lines written by the fake runner, empty if it never ran
pub fn runner_log(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("runner.log"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
