use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;

use crate::config::FailurePolicy;
use crate::data_models::{FormInput, PersonQuery, RelativeResult};
use crate::error::{FormError, LookupError};
use crate::lookup::PersonLookup;
use crate::render;

pub const NO_MATCHES_MESSAGE: &str = "No matches found on WikiTree.";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed: could not reach WikiTree. Please try again.";

/// What the widget shows. At most one of `error` / `result` is set.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WidgetState {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<RelativeResult>,
}

impl WidgetState {
    fn searching() -> WidgetState {
        WidgetState {
            loading: true,
            ..Default::default()
        }
    }

    fn failed(message: impl Into<String>) -> WidgetState {
        WidgetState {
            loading: false,
            error: Some(message.into()),
            result: None,
        }
    }

    fn matched(result: RelativeResult) -> WidgetState {
        WidgetState {
            loading: false,
            error: None,
            result: Some(result),
        }
    }

    /// The submit control is disabled for as long as a search is running.
    pub fn submit_enabled(&self) -> bool {
        !self.loading
    }
}

/// The form/result widget: one set of inputs, one search at a time.
///
/// Starting a submission cancels the one still in flight. Dropping a
/// submission future (a client going away) drops its lookup with it.
pub struct Widget<L> {
    lookup: L,
    failure_policy: FailurePolicy,
    state: watch::Sender<WidgetState>,
    in_flight: Mutex<Option<CancellationToken>>,
    generation: AtomicU64,
}

impl<L: PersonLookup> Widget<L> {
    pub fn new(lookup: L, failure_policy: FailurePolicy) -> Widget<L> {
        let (state, _) = watch::channel(WidgetState::default());
        Widget {
            lookup,
            failure_policy,
            state,
            in_flight: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state.borrow().clone()
    }

    /// Observe every state transition, including the in-flight `loading` one.
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.state.subscribe()
    }

    /// Runs one submission and returns the state it leaves behind.
    ///
    /// An empty required field blocks the submission: state is untouched and
    /// no request is made. If this submission gets superseded, the returned
    /// state is whatever the newer submission has set so far.
    pub async fn submit(&self, input: &FormInput) -> Result<WidgetState, FormError> {
        input.check_required()?;

        let token = CancellationToken::new();
        let generation = {
            let mut in_flight = self.in_flight.lock().await;
            if let Some(previous) = in_flight.replace(token.clone()) {
                previous.cancel();
            }
            self.state.send_replace(WidgetState::searching());
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let query = match PersonQuery::from_input(input) {
            Ok(query) => query,
            Err(e) => {
                tracing::info!("rejected name {:?}: {}", input.full_name, e);
                self.finish(generation, WidgetState::failed(e.to_string())).await;
                return Ok(self.state());
            }
        };

        tracing::info!(
            "searching WikiTree for {} {} (born {:?}, {:?})",
            query.first_name,
            query.last_name,
            query.birth_year,
            query.birth_place
        );

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(LookupError::Cancelled),
            res = self.lookup.find_person(&query) => res,
        };

        let terminal = match outcome {
            Ok(matches) => match matches.first() {
                Some(first) => WidgetState::matched(RelativeResult::placeholder(first)),
                None => WidgetState::failed(NO_MATCHES_MESSAGE),
            },
            Err(LookupError::Cancelled) => {
                tracing::debug!("search {} cancelled", generation);
                return Ok(self.state());
            }
            Err(e) => {
                tracing::error!("WikiTree API error in search {}: {:#}", generation, e);
                match self.failure_policy {
                    FailurePolicy::Distinct => WidgetState::failed(SEARCH_FAILED_MESSAGE),
                    FailurePolicy::Conflate => WidgetState::failed(NO_MATCHES_MESSAGE),
                }
            }
        };

        self.finish(generation, terminal).await;
        Ok(self.state())
    }

    /// Abort the running search, if any, and return to the idle state.
    pub async fn cancel(&self) {
        let mut in_flight = self.in_flight.lock().await;
        if let Some(token) = in_flight.take() {
            token.cancel();
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.state.send_replace(WidgetState::default());
        }
    }

    pub fn render(&self, input: &FormInput) -> String {
        render::render_widget(&self.state(), input)
    }

    async fn finish(&self, generation: u64, terminal: WidgetState) {
        let mut in_flight = self.in_flight.lock().await;
        // superseded or cancelled submissions must not overwrite newer state
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        in_flight.take();
        self.state.send_replace(terminal);
    }
}
