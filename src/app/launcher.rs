// xltemplates - app/launcher.rs
//
// Starts the UI server as a child process on all interfaces, headless, and
// mirrors its outcome as the launcher's exit code. The launcher lives
// exactly as long as the server does.

use crate::util::constants;
use crate::util::error::LaunchError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Parse the optional port argument.
///
/// Anything that is not an integer in 1..=65535 is reported and replaced by
/// the default port; a bad argument never aborts the launch.
pub fn resolve_port(arg: Option<&str>) -> u16 {
    let Some(raw) = arg else {
        return constants::DEFAULT_PORT;
    };

    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => port,
        _ => {
            tracing::warn!(
                argument = raw,
                default = constants::DEFAULT_PORT,
                "Invalid port number; using default port"
            );
            constants::DEFAULT_PORT
        }
    }
}

/// The server executable expected next to the running launcher.
pub fn default_server_program() -> PathBuf {
    let file_name = format!(
        "{}{}",
        constants::SERVER_BIN_NAME,
        std::env::consts::EXE_SUFFIX
    );
    match std::env::current_exe() {
        Ok(exe) => exe.with_file_name(file_name),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot locate own executable; relying on PATH");
            PathBuf::from(file_name)
        }
    }
}

/// Command line for a headless server bound to all interfaces on `port`.
pub fn server_command(program: &Path, port: u16) -> Command {
    let mut command = Command::new(program);
    command
        .arg("--address")
        .arg(constants::LAUNCH_ADDRESS)
        .arg("--port")
        .arg(port.to_string())
        .arg("--headless");
    command
}

/// Run `command` to completion, inheriting stdio.
///
/// # Errors
/// `LaunchError::Spawn` if the process could not be started,
/// `LaunchError::Exited` if it ran but did not exit successfully.
pub fn run(mut command: Command) -> Result<(), LaunchError> {
    let program = PathBuf::from(command.get_program());
    let args: Vec<_> = command.get_args().collect();
    tracing::debug!(program = %program.display(), ?args, "Spawning server process");

    let status = command
        .status()
        .map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        tracing::info!(program = %program.display(), "Server exited normally");
        Ok(())
    } else {
        Err(LaunchError::Exited { program, status })
    }
}

/// Start the server at `program` on `port` and wait for it to exit.
pub fn run_server(program: &Path, port: u16) -> Result<(), LaunchError> {
    tracing::info!(
        program = %program.display(),
        address = constants::LAUNCH_ADDRESS,
        port,
        "Starting the template server"
    );
    run(server_command(program, port))
}

/// Process exit code for a launch outcome: 0 on success, 1 for any failure.
pub fn exit_code<E>(result: &Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_argument_uses_default() {
        assert_eq!(resolve_port(None), 8501);
    }

    #[test]
    fn test_numeric_argument_is_used() {
        assert_eq!(resolve_port(Some("9000")), 9000);
        assert_eq!(resolve_port(Some(" 8080 ")), 8080);
    }

    #[test]
    fn test_invalid_arguments_fall_back() {
        for raw in ["abc", "", "-1", "0", "65536", "80.5"] {
            assert_eq!(resolve_port(Some(raw)), 8501, "argument {raw:?}");
        }
    }

    #[test]
    fn test_server_command_arguments() {
        let command = server_command(Path::new("/opt/xltemplates"), 9000);
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["--address", "0.0.0.0", "--port", "9000", "--headless"]
        );
        assert_eq!(command.get_program(), "/opt/xltemplates");
    }

    #[test]
    fn test_default_server_program_name() {
        let program = default_server_program();
        let name = program.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with(constants::SERVER_BIN_NAME), "got {name}");
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code::<LaunchError>(&Ok(())), 0);
        let spawn: Result<(), LaunchError> = Err(LaunchError::Spawn {
            program: PathBuf::from("missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        });
        assert_eq!(exit_code(&spawn), 1);
    }
}
