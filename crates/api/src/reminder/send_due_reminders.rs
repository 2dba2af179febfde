use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use subtrack_domain::{is_within_catch_window, Reminder};
use subtrack_infra::SubtrackContext;
use tracing::{debug, error, info, warn};

/// One sweep of the reminder dispatcher over every enabled `Reminder`
#[derive(Debug)]
pub struct SendDueRemindersUseCase;

/// What happened to the reminders visited during a sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    /// Emails accepted by the email sender
    pub sent: usize,
    /// Send attempts the email sender rejected
    pub failed: usize,
    /// Reminders whose subscription or user is missing, or whose subscription is inactive
    pub skipped: usize,
    /// Reminders with malformed data or that could not be persisted
    pub errored: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: DispatchOutcome) {
        match outcome {
            DispatchOutcome::Sent => self.sent += 1,
            DispatchOutcome::Failed => self.failed += 1,
            DispatchOutcome::Skipped => self.skipped += 1,
            DispatchOutcome::Errored => self.errored += 1,
            DispatchOutcome::NotDue => (),
        }
    }

    fn is_eventful(&self) -> bool {
        self.sent + self.failed + self.errored > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchOutcome {
    Sent,
    Failed,
    Skipped,
    Errored,
    NotDue,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = SweepSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &SubtrackContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();
        let reminders = ctx.repos.reminders.find_enabled().await.map_err(|e| {
            error!("Unable to load enabled reminders. Err: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut summary = SweepSummary::default();
        for reminder in reminders.into_iter().filter(|r| r.enabled) {
            summary.record(dispatch(reminder, &now, ctx).await);
        }

        if summary.is_eventful() {
            info!(
                "Reminder sweep at {} done. Sent: {}, failed: {}, skipped: {}, errored: {}",
                now, summary.sent, summary.failed, summary.skipped, summary.errored
            );
        } else {
            debug!("Reminder sweep at {} had nothing to send", now);
        }

        Ok(summary)
    }
}

#[tracing::instrument(name = "Dispatch reminder", skip_all, fields(reminder = %reminder.id))]
async fn dispatch(
    mut reminder: Reminder,
    now: &DateTime<Utc>,
    ctx: &SubtrackContext,
) -> DispatchOutcome {
    let subscription = match ctx
        .repos
        .subscriptions
        .find(&reminder.subscription_id)
        .await
    {
        Some(sub) if sub.active => sub,
        Some(_) => return DispatchOutcome::Skipped,
        None => {
            warn!(
                "Subscription: {} of reminder was not found",
                reminder.subscription_id
            );
            return DispatchOutcome::Skipped;
        }
    };
    let user = match ctx.repos.users.find(&reminder.user_id).await {
        Some(user) => user,
        None => {
            warn!("User: {} of reminder was not found", reminder.user_id);
            return DispatchOutcome::Skipped;
        }
    };

    // A snoozed reminder is only ever handled by its snooze instant
    if let Some(snooze_until) = reminder.snooze_until {
        if !is_within_catch_window(&snooze_until, now) {
            return DispatchOutcome::NotDue;
        }

        let delivered = ctx.email_sender.send(&user.email, &subscription).await;
        reminder.complete_snooze(*now);
        if let Err(e) = ctx.repos.reminders.save(&reminder).await {
            error!("Unable to save snoozed reminder after send. Err: {:?}", e);
        }

        return if delivered {
            DispatchOutcome::Sent
        } else {
            warn!("Snoozed reminder could not be delivered and will not be retried");
            DispatchOutcome::Failed
        };
    }

    if reminder.sent_same_day_as(now) {
        return DispatchOutcome::NotDue;
    }

    let target = match reminder.trigger_at(&subscription.renewal_date) {
        Ok(target) => target,
        Err(e) => {
            error!("Unable to compute trigger instant. Err: {}", e);
            return DispatchOutcome::Errored;
        }
    };
    if !is_within_catch_window(&target, now) {
        return DispatchOutcome::NotDue;
    }

    if !ctx.email_sender.send(&user.email, &subscription).await {
        warn!("Reminder could not be delivered, retrying on the next tick");
        return DispatchOutcome::Failed;
    }

    reminder.mark_sent(*now);
    if let Err(e) = ctx.repos.reminders.save(&reminder).await {
        error!("Unable to save reminder after send. Err: {:?}", e);
    }
    DispatchOutcome::Sent
}
