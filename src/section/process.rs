//! Side process launched for a section

use std::{io, process::Stdio};
use tokio::process::{Child, Command};
use tracing::{debug, info};

/// Build the host shell invocation for a command line
fn shell_command(cmd: &str) -> Command {
    #[cfg(windows)]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", cmd]);
        command
    }
    #[cfg(not(windows))]
    {
        let mut command = Command::new("sh");
        command.args(["-c", cmd]);
        command
    }
}

/// Send SIGKILL to the child's whole process group
#[cfg(unix)]
fn kill_group(child: &Child) -> io::Result<()> {
    use nix::{
        sys::signal::{killpg, Signal},
        unistd::Pid,
    };

    let Some(pid) = child.id() else {
        return Ok(());
    };
    killpg(Pid::from_raw(pid as i32), Signal::SIGKILL)?;
    Ok(())
}

/// At most one live child for an optional command.
///
/// The child inherits the parent's environment. With `inherit_output` it also
/// shares stdout/stderr, otherwise both are discarded.
#[derive(Debug)]
pub struct ProcessHandle {
    command: Option<String>,
    inherit_output: bool,
    child: Option<Child>,
}

impl ProcessHandle {
    pub fn new(command: Option<String>, inherit_output: bool) -> Self {
        let command = command.filter(|c| !c.trim().is_empty());
        Self {
            command,
            inherit_output,
            child: None,
        }
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().and_then(Child::id)
    }

    /// Spawn the command without waiting for it.
    ///
    /// No-op without a command, or when a child is already live.
    pub fn start(&mut self) -> io::Result<()> {
        let Some(cmd) = self.command.as_deref() else {
            return Ok(());
        };
        if self.child.is_some() {
            debug!("Process for {:?} already running", cmd);
            return Ok(());
        }

        let mut command = shell_command(cmd);
        command.stdin(Stdio::null()).kill_on_drop(true);
        // own group, so the shell's children die with it
        #[cfg(unix)]
        {
            command.process_group(0);
        }
        if !self.inherit_output {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let child = command.spawn()?;
        info!("Started {:?} (pid {:?})", cmd, child.id());
        self.child = Some(child);
        Ok(())
    }

    /// Force-kill the child and reap it.
    ///
    /// Succeeds when there is nothing to stop. The handle is cleared even
    /// if the kill fails.
    pub async fn stop(&mut self) -> io::Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        if let Some(status) = child.try_wait()? {
            debug!("Process {:?} had already exited with {}", self.command, status);
            return Ok(());
        }

        #[cfg(unix)]
        {
            if let Err(e) = kill_group(&child) {
                debug!("Group kill failed ({}), killing shell only", e);
                child.start_kill()?;
            }
        }
        #[cfg(not(unix))]
        {
            child.start_kill()?;
        }

        child.wait().await?;
        info!("Killed process for {:?}", self.command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_command_is_noop() {
        let mut handle = ProcessHandle::new(None, false);
        handle.start().unwrap();
        assert!(!handle.is_running());
        handle.stop().await.unwrap();

        let mut blank = ProcessHandle::new(Some("   ".to_string()), false);
        blank.start().unwrap();
        assert!(!blank.is_running());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_kill_long_running_process() {
        let mut handle = ProcessHandle::new(Some("sleep 30".to_string()), false);
        handle.start().unwrap();
        assert!(handle.is_running());
        assert!(handle.pid().is_some());

        handle.stop().await.unwrap();
        assert!(!handle.is_running());
        // second stop is idempotent
        handle.stop().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stop_after_process_exited() {
        let mut handle = ProcessHandle::new(Some("true".to_string()), false);
        handle.start().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        handle.stop().await.unwrap();
        assert!(!handle.is_running());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_twice_keeps_one_child() {
        let mut handle = ProcessHandle::new(Some("sleep 30".to_string()), false);
        handle.start().unwrap();
        let pid = handle.pid();
        handle.start().unwrap();
        assert_eq!(handle.pid(), pid);
        handle.stop().await.unwrap();
    }
}
