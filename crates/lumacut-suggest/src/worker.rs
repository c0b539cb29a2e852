// crates/lumacut-suggest/src/worker.rs
//
// SuggestWorker: runs each suggestion request on its own thread and hands the
// outcome back over a channel, so the editor never blocks on the network.
// The editor polls `rx` (or `try_recv`) once per frame and feeds outcomes to
// `apply_outcome`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;
use uuid::Uuid;

use lumacut_core::commands::{EditorCommand, EditorSession};
use lumacut_core::notify::Notification;
use lumacut_core::suggestion::{self, ActionKind, RemoteSuggestion, SuggestError, SuggestPayload};

use crate::client::SuggestClient;
use crate::transport::{Transport, UreqTransport};

/// Result of one request, tagged with the id `request` returned.
#[derive(Debug)]
pub struct SuggestOutcome {
    pub id:     Uuid,
    pub action: ActionKind,
    pub result: Result<RemoteSuggestion, SuggestError>,
}

pub struct SuggestWorker<T: Transport + 'static = UreqTransport> {
    pub rx:    Receiver<SuggestOutcome>,
    tx:        Sender<SuggestOutcome>,
    client:    Arc<SuggestClient<T>>,
    in_flight: Arc<Mutex<HashMap<Uuid, ActionKind>>>,
    shutdown:  Arc<AtomicBool>,
}

impl<T: Transport + 'static> SuggestWorker<T> {
    pub fn new(client: SuggestClient<T>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            rx,
            tx,
            client:    Arc::new(client),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            shutdown:  Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a request. Invalid input is rejected here, synchronously, and no
    /// thread is spawned.
    pub fn request(&self, action: ActionKind, payload: SuggestPayload) -> Result<Uuid, SuggestError> {
        suggestion::validate(action, &payload)?;

        let id        = Uuid::new_v4();
        let tx        = self.tx.clone();
        let client    = Arc::clone(&self.client);
        let in_flight = Arc::clone(&self.in_flight);
        let sd        = Arc::clone(&self.shutdown);

        in_flight.lock().insert(id, action);
        log::debug!("[suggest] request {id} action={action}");

        thread::spawn(move || {
            let result = client.request_suggestion(action, &payload);
            // Clear the pending flag before the outcome becomes visible.
            in_flight.lock().remove(&id);
            if sd.load(Ordering::Relaxed) {
                return;
            }
            if let Err(e) = &result {
                log::warn!("[suggest] {action} failed: {e}");
            }
            let _ = tx.send(SuggestOutcome { id, action, result });
        });

        Ok(id)
    }

    /// True while a request for `action` has not produced an outcome yet.
    /// Editors use this to disable the matching button.
    pub fn is_pending(&self, action: ActionKind) -> bool {
        self.in_flight.lock().values().any(|a| *a == action)
    }

    pub fn pending_count(&self) -> usize {
        self.in_flight.lock().len()
    }

    pub fn try_recv(&self) -> Option<SuggestOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block up to `timeout` for the next outcome. Used by the CLI.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SuggestOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drop outcomes of requests still in flight. Threads finish their HTTP
    /// call but send nothing.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

/// Apply one outcome to `session`. A failure leaves the session untouched and
/// becomes an error notification.
///
/// Outcomes are applied in arrival order even if the user edited in the
/// meantime; the suggestion lands as a new history entry on top of whatever
/// is current, so it can always be undone.
pub fn apply_outcome(session: &mut EditorSession, outcome: SuggestOutcome) -> Notification {
    match outcome.result {
        Ok(sug) => session
            .execute(EditorCommand::ApplySuggestion(sug))
            .unwrap_or_else(|| Notification::info(format!("{} finished", outcome.action.label()))),
        Err(e) => Notification::from(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SuggestConfig;
    use crate::transport::scripted::ScriptedTransport;
    use lumacut_core::filter::{FieldUpdate, FilterField, FilterValue};
    use lumacut_core::media::MediaKind;
    use lumacut_core::notify::Level;
    use lumacut_core::suggestion::EncodedImage;

    fn worker(replies: Vec<Result<crate::HttpReply, crate::TransportError>>) -> SuggestWorker<ScriptedTransport> {
        SuggestWorker::new(SuggestClient::with_transport(
            SuggestConfig::default(),
            ScriptedTransport::replying(replies),
        ))
    }

    fn frame() -> SuggestPayload {
        SuggestPayload::default().with_frame(EncodedImage::new("QUJD"))
    }

    #[test]
    fn invalid_request_is_rejected_without_a_thread() {
        let w = worker(vec![]);
        let err = w.request(ActionKind::StyleTransfer, SuggestPayload::default());
        assert!(matches!(err, Err(SuggestError::InvalidInput(_))));
        assert_eq!(w.pending_count(), 0);
        assert_eq!(w.client.transport_calls(), 0);
    }

    #[test]
    fn outcome_arrives_and_applies() {
        let body = r#"{"success":true,"action":"enhance","result":{"brightness":115,"description":"Lifted"}}"#;
        let w = worker(vec![ScriptedTransport::ok(200, body)]);
        let id = w.request(ActionKind::Enhance, frame()).unwrap();

        let outcome = w.recv_timeout(Duration::from_secs(5)).expect("outcome");
        assert_eq!(outcome.id, id);
        assert!(!w.is_pending(ActionKind::Enhance));

        let mut session = EditorSession::new(MediaKind::Image);
        let note = apply_outcome(&mut session, outcome);
        assert_eq!(note.level, Level::Success);
        assert_eq!(session.state.current().brightness, 115.0);
        assert!(session.state.can_undo());
    }

    #[test]
    fn failed_outcome_leaves_session_alone() {
        let w = worker(vec![ScriptedTransport::ok(429, r#"{"error":"slow down"}"#)]);
        w.request(ActionKind::Enhance, frame()).unwrap();
        let outcome = w.recv_timeout(Duration::from_secs(5)).expect("outcome");

        let mut session = EditorSession::new(MediaKind::Video);
        let before = session.clone();
        let note = apply_outcome(&mut session, outcome);
        assert!(note.is_error());
        assert_eq!(session, before);
    }

    #[test]
    fn description_only_outcome_is_info() {
        let body = r#"{"success":true,"result":{"description":"Looks fine","raw":true}}"#;
        let w = worker(vec![ScriptedTransport::ok(200, body)]);
        w.request(ActionKind::AutoCorrect, frame()).unwrap();
        let outcome = w.recv_timeout(Duration::from_secs(5)).expect("outcome");

        let mut session = EditorSession::new(MediaKind::Image);
        let note = apply_outcome(&mut session, outcome);
        assert_eq!(note.level, Level::Info);
        assert_eq!(session.state.history().len(), 1);
    }

    fn brightness_outcome(brightness: f32) -> SuggestOutcome {
        SuggestOutcome {
            id:     Uuid::new_v4(),
            action: ActionKind::Enhance,
            result: Ok(RemoteSuggestion { brightness: Some(brightness), ..Default::default() }),
        }
    }

    #[test]
    fn late_outcome_lands_on_top_of_user_edit() {
        let body = r#"{"success":true,"result":{"brightness":130}}"#;
        let w = worker(vec![ScriptedTransport::ok(200, body)]);
        w.request(ActionKind::Enhance, frame()).unwrap();

        let mut session = EditorSession::new(MediaKind::Image);
        session.execute(EditorCommand::SetField(FieldUpdate::new(FilterField::Contrast, 150.0)));
        let edited = *session.state.current();

        let outcome = w.recv_timeout(Duration::from_secs(5)).expect("outcome");
        assert_eq!(apply_outcome(&mut session, outcome).level, Level::Success);

        let current = session.state.current();
        assert_eq!(current.brightness, 130.0);
        assert_eq!(current.contrast, 150.0);

        session.execute(EditorCommand::Undo);
        assert_eq!(*session.state.current(), edited);
    }

    #[test]
    fn late_outcome_after_new_media_applies_to_fresh_history() {
        let body = r#"{"success":true,"result":{"brightness":130}}"#;
        let w = worker(vec![ScriptedTransport::ok(200, body)]);
        w.request(ActionKind::Enhance, frame()).unwrap();

        let mut session = EditorSession::new(MediaKind::Image);
        session.execute(EditorCommand::SetField(FieldUpdate::new(FilterField::Sepia, 40.0)));
        let note = session.execute(EditorCommand::LoadMedia {
            name:       "beach.png".into(),
            mime:       "image/png".into(),
            size_bytes: 2048,
        });
        assert!(note.is_some_and(|n| !n.is_error()));
        assert_eq!(session.state.history().len(), 1);

        let outcome = w.recv_timeout(Duration::from_secs(5)).expect("outcome");
        apply_outcome(&mut session, outcome);
        assert_eq!(session.state.current().brightness, 130.0);
        assert_eq!(session.state.current().sepia, 0.0);
        assert_eq!(session.state.history().len(), 2);

        session.execute(EditorCommand::Undo);
        assert_eq!(*session.state.current(), FilterValue::IDENTITY);
    }

    #[test]
    fn last_applied_outcome_wins() {
        let first  = brightness_outcome(110.0);
        let second = brightness_outcome(140.0);

        let mut session = EditorSession::new(MediaKind::Video);
        apply_outcome(&mut session, second);
        apply_outcome(&mut session, first);
        assert_eq!(session.state.current().brightness, 110.0);

        session.execute(EditorCommand::Undo);
        assert_eq!(session.state.current().brightness, 140.0);
    }
}
