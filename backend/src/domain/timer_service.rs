//! Meeting timer: a cancellable once-per-second ticker that accumulates a
//! meeting's elapsed duration.
//!
//! One ticker thread at a time, owned by [`MeetingTimer`]. Each tick adds
//! one second to the running meeting's `timer_duration` through the regular
//! update path. `stop` signals the thread and joins it, so no tick can land
//! after `stop` returns. Ticks aimed at a meeting that has since been
//! deleted fall into the store's no-op contract and change nothing.

use anyhow::{anyhow, Result};
use log::{info, warn};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use crate::domain::commands::meetings::{GetMeetingCommand, UpdateMeetingCommand};
use crate::domain::meeting_service::MeetingService;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Format an elapsed duration in seconds as `HH:MM:SS`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

pub struct MeetingTimer {
    meeting_service: MeetingService,
    tick_interval: Duration,
    state: Mutex<TimerState>,
}

struct TimerState {
    running_meeting_id: Option<String>,
    stop_tx: Option<Sender<()>>,
    ticker: Option<thread::JoinHandle<()>>,
}

impl MeetingTimer {
    pub fn new(meeting_service: MeetingService) -> Self {
        Self::with_tick_interval(meeting_service, TICK_INTERVAL)
    }

    /// Create a timer with a custom tick interval.
    pub fn with_tick_interval(meeting_service: MeetingService, tick_interval: Duration) -> Self {
        Self {
            meeting_service,
            tick_interval,
            state: Mutex::new(TimerState {
                running_meeting_id: None,
                stop_tx: None,
                ticker: None,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TimerState>> {
        self.state.lock().map_err(|_| anyhow!("timer state poisoned"))
    }

    /// Start ticking against the given meeting.
    pub fn start(&self, meeting_id: &str) -> Result<()> {
        let mut st = self.lock()?;
        if st.running_meeting_id.is_some() {
            return Err(anyhow!("timer already running"));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let service = self.meeting_service.clone();
        let id = meeting_id.to_string();
        let tick = self.tick_interval;
        let ticker = thread::spawn(move || Self::ticker_thread(service, id, tick, stop_rx));

        st.running_meeting_id = Some(meeting_id.to_string());
        st.stop_tx = Some(stop_tx);
        st.ticker = Some(ticker);

        info!("Started timer for meeting {}", meeting_id);

        Ok(())
    }

    /// Stop the ticker. Joins the ticker thread, so once this returns no
    /// further tick will be applied. Reports the meeting's final duration
    /// (None when the meeting no longer exists).
    pub fn stop(&self) -> Result<Option<u64>> {
        let mut st = self.lock()?;
        let meeting_id = match st.running_meeting_id.take() {
            Some(id) => id,
            None => return Err(anyhow!("timer not running")),
        };

        if let Some(tx) = st.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(ticker) = st.ticker.take() {
            let _ = ticker.join();
        }

        let duration = self
            .meeting_service
            .get_meeting(GetMeetingCommand {
                meeting_id: meeting_id.clone(),
            })?
            .meeting
            .map(|m| m.timer_duration);

        info!(
            "Stopped timer for meeting {} at {}",
            meeting_id,
            duration.map(format_duration).unwrap_or_else(|| "-".to_string())
        );

        Ok(duration)
    }

    /// Zero a meeting's elapsed duration, stopping the ticker first when it
    /// is running against that meeting.
    pub fn reset(&self, meeting_id: &str) -> Result<()> {
        let should_stop = {
            let st = self.lock()?;
            st.running_meeting_id.as_deref() == Some(meeting_id)
        };
        if should_stop {
            self.stop()?;
        }

        self.meeting_service.update_meeting(UpdateMeetingCommand {
            meeting_id: meeting_id.to_string(),
            timer_duration: Some(0),
            ..Default::default()
        })?;

        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.lock()
            .map(|st| st.running_meeting_id.is_some())
            .unwrap_or(false)
    }

    pub fn running_meeting_id(&self) -> Option<String> {
        self.lock().ok().and_then(|st| st.running_meeting_id.clone())
    }

    fn ticker_thread(
        service: MeetingService,
        meeting_id: String,
        tick: Duration,
        stop_rx: Receiver<()>,
    ) {
        loop {
            match stop_rx.recv_timeout(tick) {
                Err(RecvTimeoutError::Timeout) => {
                    if let Err(e) = Self::apply_tick(&service, &meeting_id) {
                        warn!("Timer tick failed for meeting {}: {}", meeting_id, e);
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }

    fn apply_tick(service: &MeetingService, meeting_id: &str) -> Result<()> {
        let current = match service
            .get_meeting(GetMeetingCommand {
                meeting_id: meeting_id.to_string(),
            })?
            .meeting
        {
            Some(meeting) => meeting.timer_duration,
            // Meeting deleted mid-run; remaining ticks are no-ops.
            None => return Ok(()),
        };

        service.update_meeting(UpdateMeetingCommand {
            meeting_id: meeting_id.to_string(),
            timer_duration: Some(current + 1),
            ..Default::default()
        })?;

        Ok(())
    }
}
