use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{watch, Mutex};
use tokio::time::{sleep, Duration};

use crate::api::CatalogService;
use crate::config::settings::{DisplaySettings, RatingSettings};
use crate::domain::{Card, DuelOutcome};
use crate::errors::ApiError;
use crate::rating;

use super::display::DuelDisplayRecord;

/// Where a duel session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Ready,
    Submitting,
}

/// Observable session state, published on every transition.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub pair: Option<(Card, Card)>,
    pub last_result: Option<DuelDisplayRecord>,
}

struct SessionState {
    phase: SessionPhase,
    pair: Option<(Card, Card)>,
    last_result: Option<DuelDisplayRecord>,
    fetch_generation: u64,
    result_seq: u64,
}

struct Shared {
    state: Mutex<SessionState>,
    notifier: watch::Sender<SessionSnapshot>,
    service: Arc<dyn CatalogService>,
    rating: RatingSettings,
    display_window: Duration,
}

impl Shared {
    async fn publish(&self) {
        let snapshot = {
            let state = self.state.lock().await;
            SessionSnapshot {
                phase: state.phase,
                pair: state.pair.clone(),
                last_result: state.last_result.clone(),
            }
        };
        self.notifier.send_replace(snapshot);
    }
}

/// Explicit state machine for one duel session.
///
/// Transitions: Idle → Loading → Ready → Submitting → Loading → … with at
/// most one submission in flight and at most one pending pair fetch whose
/// response is still wanted. Sessions are independent of each other; the
/// only shared resource is the remote store behind `CatalogService`.
#[derive(Clone)]
pub struct DuelSession {
    shared: Arc<Shared>,
}

impl DuelSession {
    pub fn new(
        service: Arc<dyn CatalogService>,
        rating: RatingSettings,
        display: &DisplaySettings,
    ) -> Self {
        let initial = SessionSnapshot {
            phase: SessionPhase::Idle,
            pair: None,
            last_result: None,
        };
        let (notifier, _) = watch::channel(initial);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState {
                    phase: SessionPhase::Idle,
                    pair: None,
                    last_result: None,
                    fetch_generation: 0,
                    result_seq: 0,
                }),
                notifier,
                service,
                rating,
                display_window: Duration::from_millis(display.result_display_ms),
            }),
        }
    }

    /// Observe session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.notifier.subscribe()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.shared.state.lock().await;
        SessionSnapshot {
            phase: state.phase,
            pair: state.pair.clone(),
            last_result: state.last_result.clone(),
        }
    }

    /// Enter the session: request the first pair.
    pub async fn start(&self) -> Result<(), ApiError> {
        self.fetch_next_pair().await
    }

    /// Request a fresh pair from the catalog service.
    ///
    /// On failure the session stays in `Loading` and the caller owns the
    /// retry. A response that arrives after a newer fetch has started is
    /// discarded so a slow response cannot overwrite a newer pair.
    pub async fn fetch_next_pair(&self) -> Result<(), ApiError> {
        let generation = {
            let mut state = self.shared.state.lock().await;
            state.phase = SessionPhase::Loading;
            state.pair = None;
            state.fetch_generation += 1;
            state.fetch_generation
        };
        self.shared.publish().await;

        let pair = self.shared.service.get_next_pair().await?;

        {
            let mut state = self.shared.state.lock().await;
            if state.fetch_generation != generation {
                debug!("Ignoring superseded pair fetch (generation {generation})");
                return Ok(());
            }
            state.pair = Some(pair);
            state.phase = SessionPhase::Ready;
        }
        self.shared.publish().await;
        Ok(())
    }

    /// Resolve the current duel in favor of `winner_id`.
    ///
    /// Ignored unless the session is `Ready` with a pair on display, so a
    /// second selection while a submission is in flight is a no-op. The
    /// predicted deltas are recorded for display before the submission is
    /// sent; a failed submission is logged and dropped, never retried, and
    /// the next pair is requested either way.
    pub async fn choose(&self, winner_id: &str) -> Result<(), ApiError> {
        let Some((outcome, seq)) = self.stage_outcome(winner_id).await else {
            return Ok(());
        };
        self.shared.publish().await;
        self.schedule_result_expiry(seq);

        if let Err(error) = self.shared.service.submit_duel(&outcome).await {
            warn!("Duel submission dropped, not retried: {error}");
            self.discard_result(seq).await;
        }

        self.fetch_next_pair().await
    }

    /// Validate the selection and move Ready → Submitting, recording the
    /// optimistic projection. Returns `None` when the selection must be
    /// ignored.
    async fn stage_outcome(&self, winner_id: &str) -> Option<(DuelOutcome, u64)> {
        let mut state = self.shared.state.lock().await;
        if state.phase != SessionPhase::Ready {
            return None;
        }
        let (a, b) = state.pair.clone()?;
        let (winner, loser) = if a.id == winner_id {
            (a, b)
        } else if b.id == winner_id {
            (b, a)
        } else {
            return None;
        };

        let projection = rating::project_duel(&winner, &loser, &self.shared.rating);
        state.result_seq += 1;
        let seq = state.result_seq;
        state.last_result = Some(DuelDisplayRecord::new(seq, &winner, &loser, projection));
        state.phase = SessionPhase::Submitting;

        Some((
            DuelOutcome {
                winner_id: winner.id,
                loser_id: loser.id,
            },
            seq,
        ))
    }

    async fn discard_result(&self, seq: u64) {
        let mut state = self.shared.state.lock().await;
        if state.last_result.as_ref().is_some_and(|r| r.seq() == seq) {
            state.last_result = None;
            drop(state);
            self.shared.publish().await;
        }
    }

    /// Clear the display record after the display window, unless a newer
    /// duel has replaced it in the meantime. The timer is bound to the
    /// record it was scheduled for.
    fn schedule_result_expiry(&self, seq: u64) {
        let shared = self.shared.clone();
        tokio::spawn(async move {
            sleep(shared.display_window).await;
            let expired = {
                let mut state = shared.state.lock().await;
                if state.last_result.as_ref().is_some_and(|r| r.seq() == seq) {
                    state.last_result = None;
                    true
                } else {
                    false
                }
            };
            if expired {
                shared.publish().await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use crate::api::{CardFilter, DuelResolution};
    use crate::catalog::SortMode;
    use crate::domain::CardDetail;

    fn card(id: &str, elo: f64, games_played: i32) -> Card {
        Card {
            id: id.to_string(),
            name: format!("Card {id}"),
            image: String::new(),
            set_name: "Base".to_string(),
            series: "Original".to_string(),
            artist: None,
            elo,
            games_played,
            wins: 0,
            losses: 0,
            elo_history: None,
        }
    }

    /// In-memory catalog double: pairs are handed out in order, each with an
    /// optional artificial latency, and every submission is recorded.
    struct FakeCatalog {
        pairs: Mutex<VecDeque<(Duration, (Card, Card))>>,
        pair_calls: AtomicUsize,
        submissions: Mutex<Vec<DuelOutcome>>,
        submit_delay: Duration,
        fail_submissions: AtomicBool,
    }

    impl FakeCatalog {
        fn new(pairs: Vec<(Card, Card)>) -> Self {
            Self::with_delays(pairs.into_iter().map(|p| (Duration::ZERO, p)).collect())
        }

        fn with_delays(pairs: Vec<(Duration, (Card, Card))>) -> Self {
            Self {
                pairs: Mutex::new(pairs.into()),
                pair_calls: AtomicUsize::new(0),
                submissions: Mutex::new(Vec::new()),
                submit_delay: Duration::ZERO,
                fail_submissions: AtomicBool::new(false),
            }
        }

        fn with_submit_delay(mut self, delay: Duration) -> Self {
            self.submit_delay = delay;
            self
        }

        fn failing_submissions(self) -> Self {
            self.fail_submissions.store(true, AtomicOrdering::SeqCst);
            self
        }

        fn pair_calls(&self) -> usize {
            self.pair_calls.load(AtomicOrdering::SeqCst)
        }

        async fn submissions(&self) -> Vec<DuelOutcome> {
            self.submissions.lock().await.clone()
        }
    }

    #[async_trait]
    impl CatalogService for FakeCatalog {
        async fn get_next_pair(&self) -> Result<(Card, Card), ApiError> {
            self.pair_calls.fetch_add(1, AtomicOrdering::SeqCst);
            let (delay, pair) = self
                .pairs
                .lock()
                .await
                .pop_front()
                .unwrap_or((Duration::ZERO, (card("x-1", 1000.0, 0), card("x-2", 1000.0, 0))));
            sleep(delay).await;
            Ok(pair)
        }

        async fn submit_duel(&self, outcome: &DuelOutcome) -> Result<DuelResolution, ApiError> {
            sleep(self.submit_delay).await;
            self.submissions.lock().await.push(outcome.clone());
            if self.fail_submissions.load(AtomicOrdering::SeqCst) {
                return Err(ApiError::UnexpectedStatus {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    url: "/duel".to_string(),
                });
            }
            Ok(DuelResolution {
                winner: card(&outcome.winner_id, 1000.0, 1),
                loser: card(&outcome.loser_id, 1000.0, 1),
                winner_delta: 0.0,
                loser_delta: 0.0,
            })
        }

        async fn list_cards(
            &self,
            _filter: &CardFilter,
            _sort: SortMode,
            _limit: usize,
            _offset: usize,
        ) -> Result<(Vec<Card>, usize), ApiError> {
            Ok((Vec::new(), 0))
        }

        async fn get_card(&self, id: &str) -> Result<CardDetail, ApiError> {
            Err(ApiError::NotFound {
                kind: "card",
                id: id.to_string(),
            })
        }
    }

    fn session_with(service: Arc<FakeCatalog>) -> DuelSession {
        DuelSession::new(
            service,
            RatingSettings::default(),
            &DisplaySettings::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn choose_records_prediction_and_fetches_exactly_one_new_pair() {
        let service = Arc::new(FakeCatalog::new(vec![
            (card("a-1", 1000.0, 0), card("a-2", 1000.0, 0)),
            (card("b-1", 1100.0, 10), card("b-2", 900.0, 10)),
        ]));
        let session = session_with(service.clone());

        session.start().await.unwrap();
        assert_eq!(service.pair_calls(), 1);

        session.choose("a-1").await.unwrap();

        assert_eq!(service.pair_calls(), 2);
        let submissions = service.submissions().await;
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].winner_id, "a-1");
        assert_eq!(submissions[0].loser_id, "a-2");

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Ready);
        let result = snapshot.last_result.expect("display record present");
        // Even duel, K=32 for both fresh cards.
        assert_eq!(result.winner.predicted_delta, 16.0);
        assert_eq!(result.loser.predicted_delta, -16.0);
        assert_eq!(result.winner.predicted_rating, 1016.0);
        let (a, b) = snapshot.pair.expect("next pair loaded");
        assert_eq!(a.id, "b-1");
        assert_eq!(b.id, "b-2");
    }

    #[tokio::test(start_paused = true)]
    async fn second_selection_while_submitting_is_a_no_op() {
        let service = Arc::new(
            FakeCatalog::new(vec![(card("a-1", 1000.0, 0), card("a-2", 1000.0, 0))])
                .with_submit_delay(Duration::from_millis(50)),
        );
        let session = session_with(service.clone());
        session.start().await.unwrap();

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.choose("a-1").await })
        };
        // Let the first selection reach its in-flight submission.
        sleep(Duration::from_millis(1)).await;
        assert_eq!(session.snapshot().await.phase, SessionPhase::Submitting);

        session.choose("a-2").await.unwrap();
        first.await.unwrap().unwrap();

        assert_eq!(service.submissions().await.len(), 1);
        assert_eq!(service.pair_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_observe_phase_transitions() {
        let service = Arc::new(FakeCatalog::new(vec![(
            card("a-1", 1000.0, 0),
            card("a-2", 1000.0, 0),
        )]));
        let session = session_with(service);
        let mut receiver = session.subscribe();
        assert_eq!(receiver.borrow().phase, SessionPhase::Idle);

        session.start().await.unwrap();

        // Intermediate transitions may coalesce; the latest published state
        // is Ready with the pair on display.
        receiver.changed().await.unwrap();
        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.phase, SessionPhase::Ready);
        assert!(snapshot.pair.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn choosing_before_a_pair_is_loaded_is_ignored() {
        let service = Arc::new(FakeCatalog::new(Vec::new()));
        let session = session_with(service.clone());

        session.choose("a-1").await.unwrap();

        assert!(service.submissions().await.is_empty());
        assert_eq!(service.pair_calls(), 0);
        assert_eq!(session.snapshot().await.phase, SessionPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submission_discards_projection_but_still_advances() {
        let service = Arc::new(
            FakeCatalog::new(vec![(card("a-1", 1000.0, 0), card("a-2", 1000.0, 0))])
                .failing_submissions(),
        );
        let session = session_with(service.clone());
        session.start().await.unwrap();

        session.choose("a-1").await.unwrap();

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.phase, SessionPhase::Ready);
        assert!(snapshot.last_result.is_none(), "projection must be dropped");
        assert_eq!(service.pair_calls(), 2);
        // The vote was attempted once and never requeued.
        assert_eq!(service.submissions().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn display_record_expires_after_the_window() {
        let service = Arc::new(FakeCatalog::new(vec![(
            card("a-1", 1000.0, 0),
            card("a-2", 1000.0, 0),
        )]));
        let session = session_with(service.clone());
        session.start().await.unwrap();
        session.choose("a-1").await.unwrap();

        assert!(session.snapshot().await.last_result.is_some());

        sleep(Duration::from_millis(3600)).await;
        assert!(session.snapshot().await.last_result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_timer_only_clears_the_record_it_was_scheduled_for() {
        let service = Arc::new(FakeCatalog::new(vec![
            (card("a-1", 1000.0, 0), card("a-2", 1000.0, 0)),
            (card("b-1", 1000.0, 0), card("b-2", 1000.0, 0)),
            (card("c-1", 1000.0, 0), card("c-2", 1000.0, 0)),
        ]));
        let session = session_with(service.clone());
        session.start().await.unwrap();

        session.choose("a-1").await.unwrap();
        sleep(Duration::from_millis(2000)).await;
        session.choose("b-1").await.unwrap();

        // First record's timer fires at 3500 ms; the second record must
        // survive it.
        sleep(Duration::from_millis(2000)).await;
        let result = session
            .snapshot()
            .await
            .last_result
            .expect("newer record still displayed");
        assert_eq!(result.winner.card.id, "b-1");

        // The second record's own timer clears it.
        sleep(Duration::from_millis(1600)).await;
        assert!(session.snapshot().await.last_result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_pair_fetch_is_ignored() {
        let service = Arc::new(FakeCatalog::with_delays(vec![
            (
                Duration::from_millis(50),
                (card("slow-1", 1000.0, 0), card("slow-2", 1000.0, 0)),
            ),
            (
                Duration::from_millis(10),
                (card("fast-1", 1000.0, 0), card("fast-2", 1000.0, 0)),
            ),
        ]));
        let session = session_with(service.clone());

        let slow = {
            let session = session.clone();
            tokio::spawn(async move { session.fetch_next_pair().await })
        };
        // Make sure the slow fetch registers first.
        sleep(Duration::from_millis(1)).await;
        let fast = {
            let session = session.clone();
            tokio::spawn(async move { session.fetch_next_pair().await })
        };

        slow.await.unwrap().unwrap();
        fast.await.unwrap().unwrap();

        let (a, _) = session.snapshot().await.pair.expect("pair loaded");
        assert_eq!(a.id, "fast-1", "stale response must not overwrite");
        assert_eq!(session.snapshot().await.phase, SessionPhase::Ready);
    }
}
