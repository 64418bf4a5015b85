//! Countdown state machine and its background expiry check

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use serde::Deserialize;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use super::format::{duration_to_text, PAUSE_MARKER};

/// Lifecycle phase of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Expired,
}

/// What `resume` does with the time left at the moment of pausing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumePolicy {
    /// Start the full configured interval over
    #[default]
    Restart,
    /// Carry on from the remaining time frozen at pause
    Continue,
}

/// Deadline and phase, shared between the control loop and the expiry check
#[derive(Debug)]
struct ClockState {
    phase: Phase,
    deadline: Instant,
    frozen: Duration,
}

impl ClockState {
    fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Running => self.deadline.saturating_duration_since(now),
            Phase::Paused => self.frozen,
            Phase::Expired => Duration::ZERO,
        }
    }
}

/// A live timer for the active section.
///
/// Dropping a countdown aborts its expiry check, so a replaced countdown can
/// never deliver a stray expiry.
#[derive(Debug)]
pub struct Countdown {
    title: String,
    total: Duration,
    policy: ResumePolicy,
    state: Arc<Mutex<ClockState>>,
    expiry: Option<oneshot::Receiver<()>>,
    checker: JoinHandle<()>,
}

impl Countdown {
    /// Create a running countdown and start its expiry check.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        title: impl Into<String>,
        total: Duration,
        policy: ResumePolicy,
        check_every: Duration,
    ) -> Self {
        let title = title.into();
        let state = Arc::new(Mutex::new(ClockState {
            phase: Phase::Running,
            deadline: Instant::now() + total,
            frozen: total,
        }));
        let (expiry_tx, expiry_rx) = oneshot::channel();

        let mut interval = time::interval(check_every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let checker = tokio::spawn(expiry_check(
            title.clone(),
            Arc::clone(&state),
            interval,
            expiry_tx,
        ));

        debug!("Countdown {} started for {:?}", title, total);
        Self {
            title,
            total,
            policy,
            state,
            expiry: Some(expiry_rx),
            checker,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Running -> Paused; no-op in any other phase
    pub fn pause(&self) {
        let mut state = self.lock();
        if state.phase != Phase::Running {
            return;
        }
        state.frozen = state.deadline.saturating_duration_since(Instant::now());
        state.phase = Phase::Paused;
        info!("Countdown {} paused with {:?} left", self.title, state.frozen);
    }

    /// Paused -> Running; no-op in any other phase
    pub fn resume(&self) {
        let mut state = self.lock();
        if state.phase != Phase::Paused {
            return;
        }
        let left = match self.policy {
            ResumePolicy::Restart => self.total,
            ResumePolicy::Continue => state.frozen,
        };
        state.deadline = Instant::now() + left;
        state.phase = Phase::Running;
        info!("Countdown {} resumed with {:?} left", self.title, left);
    }

    pub fn remaining(&self) -> Duration {
        self.lock().remaining(Instant::now())
    }

    /// Formatted time, or the pause marker while paused
    pub fn display_text(&self) -> String {
        let state = self.lock();
        match state.phase {
            Phase::Paused => PAUSE_MARKER.to_string(),
            _ => duration_to_text(state.remaining(Instant::now())),
        }
    }

    /// Resolves once, when the countdown expires.
    ///
    /// Cancel safe. After the notification has been delivered, or if the
    /// check task went away without firing, this future never resolves.
    pub async fn expired(&mut self) {
        let fired = match self.expiry.as_mut() {
            Some(rx) => rx.await.is_ok(),
            None => false,
        };
        self.expiry = None;
        if !fired {
            std::future::pending::<()>().await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.checker.abort();
    }
}

async fn expiry_check(
    title: String,
    state: Arc<Mutex<ClockState>>,
    mut interval: time::Interval,
    expiry_tx: oneshot::Sender<()>,
) {
    loop {
        interval.tick().await;
        {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.phase != Phase::Running || Instant::now() < state.deadline {
                continue;
            }
            state.phase = Phase::Expired;
        }
        info!("Countdown {} expired", title);
        // Receiver gone means the section already ended
        let _ = expiry_tx.send(());
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn test_counts_down() {
        let countdown = Countdown::start("WORK", Duration::from_secs(10), ResumePolicy::Restart, SEC);
        assert_eq!(countdown.remaining(), Duration::from_secs(10));
        assert_eq!(countdown.display_text(), "00:00:10");

        time::advance(Duration::from_secs(4)).await;
        assert_eq!(countdown.remaining(), Duration::from_secs(6));
        assert_eq!(countdown.phase(), Phase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_remaining() {
        let countdown = Countdown::start("WORK", Duration::from_secs(10), ResumePolicy::Restart, SEC);
        time::advance(Duration::from_secs(3)).await;
        countdown.pause();
        assert_eq!(countdown.phase(), Phase::Paused);
        assert_eq!(countdown.display_text(), PAUSE_MARKER);

        time::advance(Duration::from_secs(60)).await;
        assert_eq!(countdown.remaining(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_pause_resume_keeps_remaining() {
        for policy in [ResumePolicy::Restart, ResumePolicy::Continue] {
            let countdown = Countdown::start("WORK", Duration::from_secs(10), policy, SEC);
            let before = countdown.remaining();
            countdown.pause();
            countdown.resume();
            assert_eq!(countdown.remaining(), before);
            assert_eq!(countdown.phase(), Phase::Running);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_policy_resumes_full_interval() {
        let countdown = Countdown::start("WORK", Duration::from_secs(10), ResumePolicy::Restart, SEC);
        time::advance(Duration::from_secs(3)).await;
        countdown.pause();
        time::advance(Duration::from_secs(5)).await;
        countdown.resume();
        assert_eq!(countdown.remaining(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_continue_policy_ignores_pause_interval() {
        let countdown = Countdown::start("WORK", Duration::from_secs(10), ResumePolicy::Continue, SEC);
        time::advance(Duration::from_secs(3)).await;
        countdown.pause();
        time::advance(Duration::from_secs(5)).await;
        countdown.resume();
        assert_eq!(countdown.remaining(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_expires_while_paused() {
        let mut countdown = Countdown::start("WORK", Duration::from_secs(2), ResumePolicy::Restart, SEC);
        countdown.pause();
        let fired = time::timeout(Duration::from_secs(3600), countdown.expired()).await;
        assert!(fired.is_err());
        assert_eq!(countdown.phase(), Phase::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_exactly_once() {
        let mut countdown = Countdown::start("WORK", Duration::from_secs(2), ResumePolicy::Restart, SEC);
        let start = Instant::now();
        countdown.expired().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(countdown.phase(), Phase::Expired);
        assert_eq!(countdown.remaining(), Duration::ZERO);

        let again = time::timeout(Duration::from_secs(60), countdown.expired()).await;
        assert!(again.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_is_terminal() {
        let mut countdown = Countdown::start("WORK", Duration::from_secs(1), ResumePolicy::Restart, SEC);
        countdown.expired().await;
        countdown.pause();
        assert_eq!(countdown.phase(), Phase::Expired);
        countdown.resume();
        assert_eq!(countdown.phase(), Phase::Expired);
        assert_eq!(countdown.display_text(), "00:00:00");
    }
}
