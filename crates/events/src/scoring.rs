//! Reporter score crediting.
//!
//! [`ScoringHandler`] consumes `complaint.resolved` events from the bus and
//! credits the reporter's profile with a fixed award. The lifecycle keeps
//! this safe to run exactly once per complaint: `resolved` is terminal, so
//! a second resolve attempt fails upstream and no duplicate event is ever
//! published for the same complaint.

use civiclink_core::complaint::RESOLVED_SCORE_AWARD;
use civiclink_db::repositories::ProfileRepo;
use civiclink_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::{ComplaintEvent, EVENT_RESOLVED};

/// Background service that awards points for resolved complaints.
pub struct ScoringHandler;

impl ScoringHandler {
    /// Run the scoring loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ComplaintEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if event.event_type != EVENT_RESOLVED {
                        continue;
                    }
                    match ProfileRepo::add_score(&pool, event.reporter_id, RESOLVED_SCORE_AWARD)
                        .await
                    {
                        Ok(Some(profile)) => {
                            tracing::info!(
                                reporter_id = event.reporter_id,
                                complaint_id = event.complaint_id,
                                new_score = profile.score,
                                "Credited reporter for resolved complaint"
                            );
                        }
                        Ok(None) => {
                            tracing::warn!(
                                reporter_id = event.reporter_id,
                                complaint_id = event.complaint_id,
                                "Reporter profile missing, score not credited"
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                reporter_id = event.reporter_id,
                                "Failed to credit reporter score"
                            );
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Scoring handler lagged, some awards were missed");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, scoring handler shutting down");
                    break;
                }
            }
        }
    }
}
