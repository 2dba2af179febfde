use crate::{reminder::send_due_reminders::SendDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use std::time::Duration;
use subtrack_infra::SubtrackContext;
use tokio::sync::watch;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Periodically sweeps all enabled reminders and sends the ones that are due
pub struct ReminderDispatcher {
    ctx: SubtrackContext,
}

/// Keeps the dispatcher loop alive. Dropping it stops the dispatcher as well.
pub struct DispatcherHandle {
    stop_tx: watch::Sender<bool>,
}

impl DispatcherHandle {
    /// Ends the loop. Sweeps already in flight run to completion.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}

impl ReminderDispatcher {
    pub fn new(ctx: SubtrackContext) -> Self {
        Self { ctx }
    }

    /// Spawns the loop on the current actix runtime. The first sweep runs
    /// on the next minute boundary.
    pub fn start(self) -> DispatcherHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let ctx = self.ctx;

        actix_web::rt::spawn(async move {
            let now = ctx.sys.get_timestamp_millis();
            let secs_to_next_run = get_start_delay(now as usize, 0);
            let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
            let tick = Duration::from_secs(ctx.config.reminder_tick_secs);
            info!(
                "Reminder dispatcher starts in {} secs, then every {} secs",
                secs_to_next_run,
                tick.as_secs()
            );

            let mut ticks = interval_at(start, tick);
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let context = ctx.clone();
                        // A slow sweep must not hold back the next tick
                        actix_web::rt::spawn(async move {
                            let _ = execute(SendDueRemindersUseCase, &context).await;
                        });
                    }
                    _ = stop_rx.changed() => {
                        info!("Reminder dispatcher stopped");
                        break;
                    }
                }
            }
        });

        DispatcherHandle { stop_tx }
    }
}
