use crate::clock::Clock;
use crate::commands::{persist, CmdMessage, CmdResult};
use crate::model::{Stats, DAY_MS, EMAIL_CAPTURE_THRESHOLD};
use crate::store::{RetentionStore, StorageBackend};

/// Which 24h bucket a visit landed in relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitBucket {
    /// Less than 24h since the last visit.
    Same,
    /// Between 24h and 48h since the last visit.
    Next,
    /// 48h or more, or the clock went backwards.
    Gap,
}

/// Derived figures for stats displays.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSummary {
    pub stats: Stats,
    pub average_images_per_extraction: f64,
    pub days_since_first_visit: i64,
    pub extractions_until_email_capture: u64,
}

/// Floor of elapsed whole days. Not a calendar-day comparison.
pub fn days_between(from: i64, to: i64) -> i64 {
    to.saturating_sub(from).div_euclid(DAY_MS)
}

/// Apply one visit at `now` to the streak counters.
pub fn apply_visit(stats: &mut Stats, now: i64) -> VisitBucket {
    let bucket = match days_between(stats.last_visit, now) {
        0 => VisitBucket::Same,
        1 => {
            stats.current_streak = stats.current_streak.saturating_add(1);
            if stats.current_streak > stats.longest_streak {
                stats.longest_streak = stats.current_streak;
            }
            VisitBucket::Next
        }
        _ => {
            stats.current_streak = 1;
            VisitBucket::Gap
        }
    };
    stats.last_visit = now;
    stats.visit_count = stats.visit_count.saturating_add(1);
    bucket
}

pub fn get<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> Stats {
    store.load().stats
}

pub fn record_extraction<B: StorageBackend, C: Clock>(
    store: &RetentionStore<B, C>,
    image_count: u64,
    is_batch: bool,
    is_deep_scan: bool,
) -> CmdResult {
    let mut state = store.load();
    let stats = &mut state.stats;
    stats.total_extractions = stats.total_extractions.saturating_add(1);
    stats.total_images_extracted = stats.total_images_extracted.saturating_add(image_count);
    if is_batch {
        stats.batch_extractions = stats.batch_extractions.saturating_add(1);
    }
    if is_deep_scan {
        stats.deep_scans = stats.deep_scans.saturating_add(1);
    }

    let mut result = CmdResult::default();
    persist(store, &state, &mut result);
    result.add_message(CmdMessage::success(format!(
        "Extraction #{} recorded ({} image(s))",
        state.stats.total_extractions, image_count
    )));
    result.with_stats(state.stats)
}

pub fn record_visit<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> CmdResult {
    let mut state = store.load();
    let bucket = apply_visit(&mut state.stats, store.now());

    let mut result = CmdResult::default();
    persist(store, &state, &mut result);
    let streak = state.stats.current_streak;
    result.add_message(match bucket {
        VisitBucket::Same => {
            CmdMessage::info(format!("Visit recorded, streak stays at {}", streak))
        }
        VisitBucket::Next => CmdMessage::success(format!("Streak extended to {}", streak)),
        VisitBucket::Gap => CmdMessage::info("Streak restarted"),
    });
    result.with_stats(state.stats)
}

pub fn summary<B: StorageBackend, C: Clock>(store: &RetentionStore<B, C>) -> StatsSummary {
    let stats = store.load().stats;
    let average = if stats.total_extractions == 0 {
        0.0
    } else {
        stats.total_images_extracted as f64 / stats.total_extractions as f64
    };
    StatsSummary {
        average_images_per_extraction: average,
        days_since_first_visit: days_between(stats.first_visit, store.now()).max(0),
        extractions_until_email_capture: EMAIL_CAPTURE_THRESHOLD
            .saturating_sub(stats.total_extractions),
        stats,
    }
}
