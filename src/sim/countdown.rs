//! Round timer
//!
//! Two sources for the elapsed-seconds counter:
//! - `Ticks`: accumulated from fixed physics steps, fully deterministic
//! - `WallClock`: a periodic background task, one increment per real second
//!
//! The wall-clock task is the only writer of its counter and the physics
//! tick the only reader. It checks the shared pause flag itself before each
//! increment and is stopped and joined when the countdown is dropped, so a
//! finished scene can never leak seconds into its successor.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, bounded, select, tick};

use crate::error::Result;
use crate::settings::CountdownMode;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Elapsed-seconds counter fed by physics ticks
#[derive(Debug, Clone, Default)]
pub struct TickCountdown {
    elapsed: u32,
    carry: Duration,
}

impl TickCountdown {
    pub fn advance(&mut self, dt: Duration) {
        self.carry += dt;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.elapsed += 1;
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}

/// Elapsed-seconds counter fed by a background ticker thread
pub struct WallClockCountdown {
    elapsed: Arc<AtomicU32>,
    paused: Arc<AtomicBool>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl WallClockCountdown {
    /// Spawn the ticker; `period` is one second outside of tests
    pub fn start(period: Duration) -> Result<Self> {
        let elapsed = Arc::new(AtomicU32::new(0));
        let paused = Arc::new(AtomicBool::new(false));
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(period);

        let task_elapsed = Arc::clone(&elapsed);
        let task_paused = Arc::clone(&paused);
        let handle = thread::Builder::new()
            .name("countdown".into())
            .spawn(move || {
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            if !task_paused.load(Ordering::Acquire) {
                                task_elapsed.fetch_add(1, Ordering::AcqRel);
                            }
                        }
                        recv(stop_rx) -> _ => break,
                    }
                }
                log::debug!("Countdown task stopped");
            })?;

        log::debug!("Countdown task started (period {:?})", period);
        Ok(Self {
            elapsed,
            paused,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed.load(Ordering::Acquire)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    /// Cancel the task and wait for it to exit
    pub fn stop(&mut self) {
        // Dropping the sender disconnects the stop channel
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Countdown task panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for WallClockCountdown {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for WallClockCountdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallClockCountdown")
            .field("elapsed", &self.elapsed())
            .field("paused", &self.paused.load(Ordering::Acquire))
            .field("running", &self.is_running())
            .finish()
    }
}

/// Round timer owned by a game scene
#[derive(Debug)]
pub enum Countdown {
    Ticks(TickCountdown),
    WallClock(WallClockCountdown),
}

impl Countdown {
    pub fn start(mode: CountdownMode) -> Result<Self> {
        Ok(match mode {
            CountdownMode::Ticks => Countdown::Ticks(TickCountdown::default()),
            CountdownMode::WallClock => Countdown::WallClock(WallClockCountdown::start(ONE_SECOND)?),
        })
    }

    /// Called once per physics tick
    pub fn advance(&mut self, dt: Duration, paused: bool) {
        match self {
            Countdown::Ticks(countdown) => {
                if !paused {
                    countdown.advance(dt);
                }
            }
            Countdown::WallClock(countdown) => countdown.set_paused(paused),
        }
    }

    pub fn elapsed(&self) -> u32 {
        match self {
            Countdown::Ticks(countdown) => countdown.elapsed(),
            Countdown::WallClock(countdown) => countdown.elapsed(),
        }
    }

    /// Freeze the counter for good (round over)
    pub fn stop(&mut self) {
        if let Countdown::WallClock(countdown) = self {
            countdown.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: Duration = Duration::from_millis(10);

    #[test]
    fn test_tick_countdown_counts_whole_seconds() {
        let mut countdown = Countdown::start(CountdownMode::Ticks).unwrap();
        for _ in 0..99 {
            countdown.advance(DT, false);
        }
        assert_eq!(countdown.elapsed(), 0);
        countdown.advance(DT, false);
        assert_eq!(countdown.elapsed(), 1);

        for _ in 0..250 {
            countdown.advance(DT, false);
        }
        assert_eq!(countdown.elapsed(), 3);
    }

    #[test]
    fn test_tick_countdown_respects_pause() {
        let mut countdown = Countdown::start(CountdownMode::Ticks).unwrap();
        for _ in 0..500 {
            countdown.advance(DT, true);
        }
        assert_eq!(countdown.elapsed(), 0);
    }

    #[test]
    fn test_wall_clock_counts() {
        let countdown = WallClockCountdown::start(Duration::from_millis(5)).unwrap();
        let mut waited = 0;
        while countdown.elapsed() == 0 && waited < 200 {
            thread::sleep(Duration::from_millis(5));
            waited += 1;
        }
        assert!(countdown.elapsed() > 0);
    }

    #[test]
    fn test_wall_clock_paused_does_not_count() {
        let countdown = WallClockCountdown::start(Duration::from_millis(5)).unwrap();
        countdown.set_paused(true);
        let before = countdown.elapsed();
        thread::sleep(Duration::from_millis(20));
        // at most one increment raced the pause store
        let settled = countdown.elapsed();
        assert!(settled <= before + 1);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(countdown.elapsed(), settled);
    }

    #[test]
    fn test_wall_clock_stop_joins_task() {
        let mut countdown = WallClockCountdown::start(Duration::from_millis(5)).unwrap();
        countdown.stop();
        assert!(!countdown.is_running());
        let frozen = countdown.elapsed();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(countdown.elapsed(), frozen);
    }
}
