//! Frame loop that keeps a [`ParticleField`] moving.
//!
//! The loop runs as a tokio task paced by an interval at display rate. It
//! owns the field and its surface outright, so nothing is shared or locked.
//! Resizes and the stop request reach it over a command channel. Dropping
//! the handle closes that channel and also ends the loop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

use super::field::ParticleField;
use super::policy::MotionPolicy;
use super::surface::Surface;
use super::viewport::Viewport;
use crate::constants::FRAME_INTERVAL_MICROS;

/// Shortest accepted frame interval; `tokio::time::interval` rejects zero.
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug)]
enum Command {
    Resize(Viewport),
    Stop,
}

/// State handed back once the loop has ended
#[derive(Debug)]
pub struct AnimationOutcome<S> {
    pub field: ParticleField,
    pub surface: S,
    pub frames: u64,
}

pub struct Animation<S> {
    field: ParticleField,
    surface: S,
    frame_interval: Duration,
}

impl<S> Animation<S>
where
    S: Surface + Send + 'static,
{
    pub fn new(field: ParticleField, surface: S) -> Self {
        Self {
            field,
            surface,
            frame_interval: Duration::from_micros(FRAME_INTERVAL_MICROS),
        }
    }

    /// Overrides the frame pacing. Intervals below [`MIN_FRAME_INTERVAL`] are raised to it.
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval.max(MIN_FRAME_INTERVAL);
        self
    }

    /// Spawns the loop unless the policy asks for reduced motion.
    pub fn start(self, policy: &MotionPolicy) -> Option<AnimationHandle<S>> {
        if !policy.animation_enabled() {
            tracing::debug!("Reduced motion requested, particle animation not started");
            return None;
        }
        Some(self.spawn())
    }

    /// Spawns the loop on the current tokio runtime.
    pub fn spawn(self) -> AnimationHandle<S> {
        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(receiver));
        AnimationHandle { commands, task }
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) -> AnimationOutcome<S> {
        self.field.attach(&mut self.surface);
        tracing::debug!(
            particles = self.field.len(),
            interval_us = self.frame_interval.as_micros() as u64,
            "Particle animation started"
        );

        let mut ticker = time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut frames = 0u64;

        loop {
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(Command::Resize(viewport)) => {
                        tracing::debug!(?viewport, "Particle viewport resized");
                        self.field.resize(viewport, &mut self.surface);
                    }
                    Some(Command::Stop) | None => break,
                },
                _ = ticker.tick() => {
                    self.field.step(&mut self.surface);
                    frames += 1;
                }
            }
        }

        tracing::debug!(frames, "Particle animation stopped");
        AnimationOutcome { field: self.field, surface: self.surface, frames }
    }
}

/// Control side of a running [`Animation`]
pub struct AnimationHandle<S> {
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<AnimationOutcome<S>>,
}

impl<S> AnimationHandle<S> {
    /// Queues a viewport change. Returns `false` if the loop has already ended.
    pub fn resize(&self, viewport: Viewport) -> bool {
        self.commands.send(Command::Resize(viewport)).is_ok()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the loop after the current frame and returns its state.
    pub async fn stop(self) -> Result<AnimationOutcome<S>, JoinError> {
        let _ = self.commands.send(Command::Stop);
        self.task.await
    }
}
