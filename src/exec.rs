use std::process::{Child, Command, ExitStatus, Stdio};

use crate::error::{self, ShellError, Status};
use crate::redirection::Redirections;

/// Runs one external program with its standard streams rebound to the
/// redirection files, and waits for it.
///
/// An empty argument list is a no-op.
pub fn run_command(args: &[String], redirections: Redirections) -> Result<Status, ShellError> {
    let Some((program, rest)) = args.split_first() else {
        return Ok(0);
    };

    let mut command = Command::new(program);
    command.args(rest);
    if let Some(input) = redirections.input {
        command.stdin(Stdio::from(input));
    }
    if let Some(output) = redirections.output {
        log::debug!("stdout redirected (append: {})", redirections.append);
        command.stdout(Stdio::from(output));
    }

    log::debug!("spawning {:?}", args);
    let child = command.spawn();
    // The command still holds our copies of the redirection files.
    drop(command);
    let mut child = child.map_err(|e| ShellError::from_spawn(program, e))?;

    wait(&mut child, program)
}

/// Runs `left | right`, both launched before either is awaited.
///
/// Returns the status of the right-hand program. A side that fails to launch
/// is reported on its own; the other side still runs.
pub fn run_pipeline(left: &[String], right: &[String]) -> Result<Status, ShellError> {
    let (Some((left_program, left_rest)), Some((right_program, right_rest))) =
        (left.split_first(), right.split_first())
    else {
        return Err(ShellError::Syntax("pipe is missing a command"));
    };

    log::debug!("spawning pipeline {:?} | {:?}", left, right);
    let mut left_child = match Command::new(left_program)
        .args(left_rest)
        .stdout(Stdio::piped())
        .spawn()
    {
        Ok(child) => Some(child),
        Err(e) => {
            error::report(&ShellError::from_spawn(left_program, e));
            None
        }
    };

    // Moving the read end into the right command leaves the parent without a
    // copy once that command is dropped.
    let right_stdin = left_child
        .as_mut()
        .and_then(|child| child.stdout.take())
        .map_or_else(Stdio::null, Stdio::from);
    let right_child = Command::new(right_program)
        .args(right_rest)
        .stdin(right_stdin)
        .spawn()
        .map_err(|e| ShellError::from_spawn(right_program, e));

    if let Some(child) = left_child.as_mut()
        && let Err(e) = wait(child, left_program)
    {
        error::report(&e);
    }

    wait(&mut right_child?, right_program)
}

fn wait(child: &mut Child, program: &str) -> Result<Status, ShellError> {
    let status = child.wait().map_err(|source| ShellError::Spawn {
        program: program.to_string(),
        source,
    })?;
    log::debug!("{} exited with {}", program, status);
    Ok(exit_code(status))
}

/// Exit code of a finished child; 1 when it was killed by a signal.
fn exit_code(status: ExitStatus) -> Status {
    status.code().unwrap_or(1)
}
