//! Completion notification sinks

use futures::future::{self, BoxFuture, FutureExt};
use tokio::process::Command;
use tracing::{debug, info};

use crate::{error::NotifyError, state::Timer};

/// Invoked once per timer completion
///
/// Implementations must not block: the returned future is spawned by the
/// store and its failure is only logged.
pub trait NotificationSink: Send + Sync {
    fn notify_completion(&self, timer: &Timer) -> BoxFuture<'static, Result<(), NotifyError>>;
}

/// Sink for platforms without haptic or audio support
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn notify_completion(&self, timer: &Timer) -> BoxFuture<'static, Result<(), NotifyError>> {
        debug!("Timer {} completed, no notification support", timer.id);
        future::ready(Ok(())).boxed()
    }
}

/// Plays the completion sound by running a shell command
///
/// The command sees `TIMER_ID` and `TIMER_NAME` in its environment. Haptics
/// are not available on a host process and are skipped.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    command: String,
}

impl CommandNotifier {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl NotificationSink for CommandNotifier {
    fn notify_completion(&self, timer: &Timer) -> BoxFuture<'static, Result<(), NotifyError>> {
        let command = self.command.clone();
        let id = timer.id.clone();
        let name = timer.name.clone();

        async move {
            debug!("Running completion command for timer {}", id);

            let output = Command::new("sh")
                .args(["-c", &command])
                .env("TIMER_ID", &id)
                .env("TIMER_NAME", &name)
                .output()
                .await?;

            if !output.status.success() {
                return Err(NotifyError::CommandFailed {
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            info!("Completion sound played for timer {} ({})", id, name);
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CreateTimerInput, DurationParts, TimerColor};

    fn done_timer() -> Timer {
        Timer::from_input(
            "7".to_string(),
            CreateTimerInput::new("eggs", DurationParts::new(0, 0, 1), TimerColor::Cream),
            0,
        )
    }

    #[tokio::test]
    async fn noop_always_succeeds() {
        assert!(NoopNotifier.notify_completion(&done_timer()).await.is_ok());
    }

    #[tokio::test]
    async fn command_receives_timer_environment() {
        let notifier = CommandNotifier::new(r#"test "$TIMER_ID" = 7 && test "$TIMER_NAME" = eggs"#);
        assert!(notifier.notify_completion(&done_timer()).await.is_ok());
    }

    #[tokio::test]
    async fn failing_command_reports_status() {
        let notifier = CommandNotifier::new("echo boom >&2; exit 3");
        match notifier.notify_completion(&done_timer()).await {
            Err(NotifyError::CommandFailed { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
