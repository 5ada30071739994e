//! Timed rotation controller
//!
//! Runs one rotation (testimonial carousel, tab explorer) as a small actor
//! task. The task owns the auto-advance ticker and the cooldown timer;
//! user navigation reaches it over a command channel and the resulting
//! state is published on a watch channel.
//!
//! Commands are polled before timers, so a manual navigation queued at the
//! same instant as a tick always wins. Dropping the controller aborts the
//! task, which cancels both timers.

use std::future::pending;
use std::num::NonZeroUsize;
use std::pin::Pin;
use std::time::Duration;

use atile_core::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, Interval, MissedTickBehavior, Sleep};

use crate::config::RotationSettings;
use crate::handler::{self, RotationAction};
use crate::message::RotationMessage;
use crate::state::RotationState;

/// Auto-advance timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConfig {
    pub interval: Duration,
    pub cooldown: Duration,
}

impl Default for RotationConfig {
    fn default() -> Self {
        RotationSettings::default().into()
    }
}

impl From<RotationSettings> for RotationConfig {
    fn from(settings: RotationSettings) -> Self {
        Self {
            interval: settings.interval(),
            cooldown: settings.cooldown(),
        }
    }
}

/// Handle to a running rotation.
///
/// Must be created from within a tokio runtime.
pub struct RotationController {
    commands: mpsc::UnboundedSender<RotationMessage>,
    state: watch::Receiver<RotationState>,
    task: JoinHandle<()>,
}

impl RotationController {
    /// Start rotating `len` items, beginning at index 0 with auto-advance on.
    ///
    /// Fails with [`Error::EmptyCollection`] when `len` is zero.
    pub fn start(len: usize, config: RotationConfig) -> Result<Self> {
        let len = NonZeroUsize::new(len).ok_or(Error::EmptyCollection)?;
        if config.interval.is_zero() {
            return Err(Error::config_invalid("rotation interval must be positive"));
        }
        let initial = RotationState::new(len);

        let (commands, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(initial);
        let task = tokio::spawn(run_rotation(initial, config, command_rx, state_tx));

        debug!(
            "Rotation started ({} items, every {:?}, cooldown {:?})",
            len, config.interval, config.cooldown
        );
        Ok(Self {
            commands,
            state,
            task,
        })
    }

    /// Jump to an item; indices past the end wrap around
    pub fn go_to(&self, index: usize) -> Result<()> {
        self.send(RotationMessage::GoTo(index))
    }

    pub fn next(&self) -> Result<()> {
        self.send(RotationMessage::Next)
    }

    pub fn previous(&self) -> Result<()> {
        self.send(RotationMessage::Previous)
    }

    /// Restart with a new collection size (index back to 0, timers reset).
    ///
    /// Resolves once the reset state is published, so [`Self::state`]
    /// never reports an index from the previous collection afterwards.
    pub async fn replace_items(&self, len: usize) -> Result<()> {
        let len = NonZeroUsize::new(len).ok_or(Error::EmptyCollection)?;
        let mut rx = self.state.clone();
        let generation = rx.borrow_and_update().generation();
        self.send(RotationMessage::ReplaceItems(len))?;

        let reset = rx
            .wait_for(|state| state.generation() != generation)
            .await
            .map(|_| ());
        reset.map_err(|_| Error::ChannelClosed)
    }

    /// Latest published state
    pub fn state(&self) -> RotationState {
        *self.state.borrow()
    }

    pub fn active_index(&self) -> usize {
        self.state().active_index()
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.state().is_auto_advancing()
    }

    /// Receiver notified whenever the active item or pause state changes
    pub fn subscribe(&self) -> watch::Receiver<RotationState> {
        self.state.clone()
    }

    fn send(&self, message: RotationMessage) -> Result<()> {
        self.commands
            .send(message)
            .map_err(|_| Error::ChannelClosed)
    }
}

impl Drop for RotationController {
    fn drop(&mut self) {
        self.task.abort();
        trace!("Rotation torn down");
    }
}

/// Auto-advance ticker whose first tick is one full period away
fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending().await,
    }
}

async fn cooldown_elapsed(cooldown: &mut Option<Pin<Box<Sleep>>>) {
    match cooldown {
        Some(timer) => timer.as_mut().await,
        None => pending().await,
    }
}

async fn run_rotation(
    mut state: RotationState,
    config: RotationConfig,
    mut commands: mpsc::UnboundedReceiver<RotationMessage>,
    publish: watch::Sender<RotationState>,
) {
    let mut ticker = Some(new_ticker(config.interval));
    let mut cooldown: Option<Pin<Box<Sleep>>> = None;

    loop {
        let message = tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(message) => message,
                None => break,
            },
            _ = next_tick(&mut ticker) => RotationMessage::Tick,
            _ = cooldown_elapsed(&mut cooldown) => {
                cooldown = None;
                RotationMessage::CooldownElapsed
            }
        };

        let result = handler::rotation::update(&mut state, message);
        for action in result.actions {
            match action {
                RotationAction::StopTicker => ticker = None,
                RotationAction::StartTicker => ticker = Some(new_ticker(config.interval)),
                RotationAction::RestartCooldown => {
                    cooldown = Some(Box::pin(sleep(config.cooldown)));
                }
                RotationAction::CancelCooldown => cooldown = None,
            }
        }

        publish.send_if_modified(|published| {
            let changed = *published != state;
            *published = state;
            changed
        });
    }

    trace!("Rotation command channel closed");
}
