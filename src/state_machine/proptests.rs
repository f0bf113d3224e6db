//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use chrono::Utc;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext::new("test-session", Article::new("Title", "Body"))
}

/// Host actions; completions target whatever is in flight when they run
#[derive(Debug, Clone)]
enum Action {
    Raw(Event),
    AnswerCurrent(Option<String>),
    FailCurrent,
    /// Completion for a ticket that may or may not be current
    AnswerTicket(u64),
}

fn resolve(action: Action, state: &SessionState) -> Event {
    match action {
        Action::Raw(event) => event,
        Action::AnswerCurrent(answer) => Event::AnswerReceived {
            ticket: state.in_flight().unwrap_or(RequestTicket::new(0)),
            answer,
        },
        Action::FailCurrent => Event::AnswerFailed {
            ticket: state.in_flight().unwrap_or(RequestTicket::new(0)),
            message: "boom".to_string(),
        },
        Action::AnswerTicket(n) => Event::AnswerReceived {
            ticket: RequestTicket::new(n),
            answer: Some("maybe stale".to_string()),
        },
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mode() -> impl Strategy<Value = ChatMode> {
    prop_oneof![
        Just(ChatMode::Direct),
        Just(ChatMode::RealWorld),
        Just(ChatMode::Experiment),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        " ?[a-zA-Z ]{1,20}\n?",
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Open),
        Just(Event::Close),
        Just(Event::Back),
        arb_mode().prop_map(Event::ModeSelected),
        arb_text().prop_map(Event::draft),
        arb_text().prop_map(Event::submit),
        any::<bool>().prop_map(|shift| Event::EnterPressed { shift }),
        Just(Event::SubmitDraft),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => arb_event().prop_map(Action::Raw),
        1 => proptest::option::of("[a-z ]{0,10}").prop_map(Action::AnswerCurrent),
        1 => Just(Action::FailCurrent),
        1 => (0u64..6).prop_map(Action::AnswerTicket),
    ]
}

fn arb_session() -> impl Strategy<Value = SessionState> {
    proptest::collection::vec(arb_action(), 0..15).prop_map(|actions| run(&actions).0)
}

/// Apply actions in order, ignoring rejected ones
fn run(actions: &[Action]) -> (SessionState, usize) {
    let ctx = test_context();
    let mut state = SessionState::new();
    let mut dispatched = 0;
    for action in actions {
        let event = resolve(action.clone(), &state);
        if let Ok(result) = transition(&state, &ctx, event, Utc::now()) {
            dispatched += result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RequestAnswer { .. }))
                .count();
            state = result.new_state;
        }
    }
    (state, dispatched)
}

fn history_matches_mode(state: &SessionState) -> bool {
    match state.mode() {
        Some(_) => !state.history().is_empty(),
        None => state.history().is_empty(),
    }
}

fn resets_conversation(event: &Event) -> bool {
    matches!(event, Event::ModeSelected(_) | Event::Back | Event::Close)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: a chosen mode always has a transcript, an unset one never does
    #[test]
    fn prop_history_tracks_mode(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for action in actions {
            let event = resolve(action, &state);
            if let Ok(result) = transition(&state, &ctx, event, Utc::now()) {
                state = result.new_state;
                prop_assert!(history_matches_mode(&state), "Broken state: {:?}", state);
            }
        }
    }

    // Invariant 2: at most one request in flight
    #[test]
    fn prop_single_flight(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let ctx = test_context();
        let mut state = SessionState::new();
        for action in actions {
            let was_pending = state.pending_request();
            let event = resolve(action, &state);
            if let Ok(result) = transition(&state, &ctx, event, Utc::now()) {
                let requests: Vec<RequestTicket> = result
                    .effects
                    .iter()
                    .filter_map(|e| match e {
                        Effect::RequestAnswer { ticket, .. } => Some(*ticket),
                        _ => None,
                    })
                    .collect();
                prop_assert!(requests.len() <= 1);
                if let Some(ticket) = requests.first() {
                    prop_assert!(!was_pending, "Dispatched while a request was pending");
                    prop_assert_eq!(result.new_state.in_flight(), Some(*ticket));
                }
                state = result.new_state;
            }
        }
    }

    // Invariant 3: completions with any non-current ticket change nothing
    #[test]
    fn prop_stale_completions_rejected(state in arb_session(), n in 0u64..20) {
        let ticket = RequestTicket::new(n);
        prop_assume!(state.in_flight() != Some(ticket));

        let received = transition(
            &state,
            &test_context(),
            Event::AnswerReceived { ticket, answer: Some("late".to_string()) },
            Utc::now(),
        );
        prop_assert_eq!(received.unwrap_err(), TransitionError::StaleResponse { ticket });

        let failed = transition(
            &state,
            &test_context(),
            Event::AnswerFailed { ticket, message: "late".to_string() },
            Utc::now(),
        );
        prop_assert!(failed.is_err());
    }

    // Invariant 4: transcript is append-only within a conversation
    #[test]
    fn prop_history_append_only(state in arb_session(), action in arb_action()) {
        let event = resolve(action, &state);
        let resets = resets_conversation(&event);
        if let Ok(result) = transition(&state, &test_context(), event, Utc::now()) {
            if !resets {
                let before = state.history();
                let after = result.new_state.history();
                prop_assert!(after.len() >= before.len());
                prop_assert_eq!(&after[..before.len()], before);
            }
        }
    }

    // Invariant 5: user turns are stored trimmed and never blank
    #[test]
    fn prop_user_messages_trimmed(actions in proptest::collection::vec(arb_action(), 0..30)) {
        let (state, _) = run(&actions);
        for message in state.history().iter().filter(|m| m.role == Role::User) {
            prop_assert!(!message.content.is_empty());
            prop_assert_eq!(message.content.trim(), message.content.as_str());
        }
    }

    // Invariant 6: experiment turns never reach the backend
    #[test]
    fn prop_experiment_never_dispatches(texts in proptest::collection::vec(arb_text(), 1..10)) {
        let mut actions = vec![Action::Raw(Event::ModeSelected(ChatMode::Experiment))];
        actions.extend(texts.into_iter().map(|t| Action::Raw(Event::submit(t))));
        let (state, dispatched) = run(&actions);

        prop_assert_eq!(dispatched, 0);
        prop_assert!(!state.pending_request());
        prop_assert_eq!(state.history().len() % 2, 1);
    }

    // Invariant 7: back is idempotent from any state
    #[test]
    fn prop_back_idempotent(state in arb_session()) {
        let ctx = test_context();
        let once = transition(&state, &ctx, Event::Back, Utc::now()).unwrap().new_state;
        let twice = transition(&once, &ctx, Event::Back, Utc::now()).unwrap().new_state;
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.mode(), None);
        prop_assert!(once.history().is_empty());
        prop_assert!(!once.pending_request());
    }

    // Invariant 8: rejected submits leave the transcript alone
    #[test]
    fn prop_pending_blocks_submit(mode in prop_oneof![Just(ChatMode::Direct), Just(ChatMode::RealWorld)], text in arb_text()) {
        let ctx = test_context();
        let state = transition(&SessionState::new(), &ctx, Event::ModeSelected(mode), Utc::now())
            .unwrap()
            .new_state;
        let pending = transition(&state, &ctx, Event::submit("first"), Utc::now())
            .unwrap()
            .new_state;
        prop_assert!(pending.pending_request());

        let result = transition(&pending, &ctx, Event::submit(text), Utc::now());
        prop_assert!(result.is_err());
    }
}
