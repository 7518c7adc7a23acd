//! Attendee dashboard bucketing.

use super::temporal::{DayWindow, TimeBucket};
use crate::models::dashboard::AttendeeDashboard;
use crate::models::event::EventView;
use crate::models::reaction::ReactionStatus;

/// Places each reacted-to event in exactly one bucket.
///
/// `today` and `upcoming` are further split by the viewer's own status.
/// Events the viewer has not reacted to are skipped.
pub fn partition_attendee_events(window: &DayWindow, events: Vec<EventView>) -> AttendeeDashboard {
    let mut dashboard = AttendeeDashboard::default();

    for event in events {
        let Some(status) = event.reaction_status else {
            continue;
        };

        match window.classify(event.start_time, event.end_time) {
            TimeBucket::Ongoing => dashboard.ongoing.push(event),
            TimeBucket::Archived => dashboard.archived.push(event),
            TimeBucket::Today => match status {
                ReactionStatus::Attending => dashboard.today.attending.push(event),
                ReactionStatus::Interested => dashboard.today.interested.push(event),
            },
            TimeBucket::Upcoming => match status {
                ReactionStatus::Attending => dashboard.upcoming.attending.push(event),
                ReactionStatus::Interested => dashboard.upcoming.interested.push(event),
            },
        }
    }

    dashboard
}
