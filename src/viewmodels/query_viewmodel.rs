// ============================================================================
// QUERY VIEWMODEL - Ciclo de vida de una pregunta
// ============================================================================
// Una sola consulta en vuelo (flag busy). Sin cola, sin cancelación, sin
// reintentos. Las respuestas de una generación anterior (hubo logout en
// medio) se descartan.
// ============================================================================

use std::rc::Rc;
use crate::models::{AnswerResponse, QueryResult};
use crate::services::{AnswerClient, Clipboard, IdentityError, IdentityProvider, QueryError};
use crate::state::{AppState, QueryStore};

pub const COPY_OK_NOTICE: &str = "Copied to clipboard!";
pub const COPY_FAILED_NOTICE: &str = "Could not copy to clipboard.";

/// Libera `busy` al salir de la consulta por cualquier camino
/// (incluido que el future se suelte a medias)
struct InFlight {
    store: QueryStore,
    generation: u64,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.store.release_busy(self.generation);
    }
}

#[derive(Clone)]
pub struct QueryViewModel {
    state: AppState,
    identity: Rc<dyn IdentityProvider>,
    answers: AnswerClient,
    clipboard: Rc<dyn Clipboard>,
}

impl QueryViewModel {
    pub fn new(
        state: AppState,
        identity: Rc<dyn IdentityProvider>,
        answers: AnswerClient,
        clipboard: Rc<dyn Clipboard>,
    ) -> Self {
        Self {
            state,
            identity,
            answers,
            clipboard,
        }
    }

    pub fn set_input(&self, text: String) {
        self.state.query.set_input(text);
    }

    /// Enviar lo que hay en la caja de texto
    pub async fn submit_current(&self) {
        let text = self.state.query.snapshot().input_text;
        self.submit_query(&text).await;
    }

    pub async fn submit_query(&self, text: &str) {
        let question = text.trim().to_string();
        if question.is_empty() {
            return;
        }

        let started = self.state.query.update(|s| {
            if s.busy {
                return None;
            }
            s.busy = true;
            s.last_error = None;
            Some(s.generation)
        });
        let Some(generation) = started else {
            log::debug!("[QUERY] Consulta en curso, envío ignorado");
            return;
        };
        let _in_flight = InFlight {
            store: self.state.query.clone(),
            generation,
        };
        self.state.notify_subscribers();

        let outcome = self.run_query(&question).await;
        if let Err(ref e) = outcome {
            log::error!("❌ [QUERY] {:?}", e);
        }

        let applied = self.state.query.update(|s| {
            if s.generation != generation {
                return false;
            }
            match outcome {
                Ok(response) => {
                    s.last_result = Some(QueryResult::from_response(&question, response));
                    s.input_text.clear();
                    s.last_error = None;
                }
                Err(ref e) => s.last_error = Some(e.user_message()),
            }
            s.busy = false;
            true
        });

        if applied {
            log::info!("✅ [QUERY] Consulta completada");
        } else {
            log::warn!("⚠️ [QUERY] Respuesta de una sesión anterior descartada");
        }
        self.state.notify_subscribers();
    }

    async fn run_query(&self, question: &str) -> Result<AnswerResponse, QueryError> {
        let session = self
            .identity
            .current_session()
            .ok_or(QueryError::NotAuthenticated)?;

        // Token fresco en cada envío; este controlador no cachea nada
        let credential = self
            .identity
            .get_credential(&session)
            .await
            .map_err(|e| match e {
                IdentityError::NotAuthenticated => QueryError::NotAuthenticated,
                other => QueryError::Credential(other.to_string()),
            })?;

        self.answers.ask(question, &credential).await
    }

    /// Copia `customer_answer` del último resultado y deja un aviso transitorio.
    /// Un fallo se registra en el log; nunca toca `last_error`.
    pub async fn copy_answer_to_clipboard(&self) -> bool {
        let answer = self
            .state
            .query
            .snapshot()
            .last_result
            .map(|r| r.customer_answer);
        let Some(answer) = answer else {
            return false;
        };

        let copied = match self.clipboard.write_text(&answer).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("❌ [QUERY] Error copiando al portapapeles: {}", e);
                false
            }
        };

        let notice = if copied { COPY_OK_NOTICE } else { COPY_FAILED_NOTICE };
        self.state.query.update(|s| s.notice = Some(notice.to_string()));
        self.state.notify_subscribers();
        copied
    }

    pub fn clear_notice(&self) {
        let had_notice = self.state.query.update(|s| s.notice.take().is_some());
        if had_notice {
            self.state.notify_subscribers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::HttpReply;
    use crate::test_support::{FakeClipboard, FakeIdentity, FakeTransport, GatedTransport};
    use crate::viewmodels::SessionViewModel;
    use futures::executor::block_on;

    const OK_BODY: &str =
        r#"{"complianceSummary":"Per SOP-12...","customerAnswer":"We store samples at -196C..."}"#;

    struct Harness {
        state: AppState,
        identity: Rc<FakeIdentity>,
        clipboard: Rc<FakeClipboard>,
        vm: QueryViewModel,
    }

    fn harness(identity: FakeIdentity, transport: Rc<dyn crate::services::HttpTransport>) -> Harness {
        harness_with_clipboard(identity, transport, FakeClipboard::working())
    }

    fn harness_with_clipboard(
        identity: FakeIdentity,
        transport: Rc<dyn crate::services::HttpTransport>,
        clipboard: FakeClipboard,
    ) -> Harness {
        let state = AppState::new();
        let identity = Rc::new(identity);
        let clipboard = Rc::new(clipboard);
        let vm = QueryViewModel::new(
            state.clone(),
            identity.clone(),
            AnswerClient::with_transport("https://answers.test/", transport),
            clipboard.clone(),
        );
        Harness {
            state,
            identity,
            clipboard,
            vm,
        }
    }

    #[test]
    fn test_successful_query_scenario() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport.clone());
        h.vm.set_input("What is the storage protocol?".to_string());

        block_on(h.vm.submit_current());

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].body, r#"{"question":"What is the storage protocol?"}"#);

        let state = h.state.query.snapshot();
        assert_eq!(state.input_text, "");
        assert!(!state.busy);
        assert_eq!(state.last_error, None);
        let result = state.last_result.unwrap();
        assert_eq!(result.question, "What is the storage protocol?");
        assert_eq!(result.compliance_summary, "Per SOP-12...");
        assert_eq!(result.customer_answer, "We store samples at -196C...");
    }

    #[test]
    fn test_question_is_trimmed() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport.clone());

        block_on(h.vm.submit_query("  storage?  \n"));
        assert_eq!(transport.calls()[0].body, r#"{"question":"storage?"}"#);
        assert_eq!(h.state.query.snapshot().last_result.unwrap().question, "storage?");
    }

    #[test]
    fn test_blank_question_is_a_no_op() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport.clone());
        let notified = Rc::new(std::cell::Cell::new(false));
        let n = notified.clone();
        h.state.subscribe_to_changes(move || n.set(true));

        for text in ["", "   ", "\t\n"] {
            block_on(h.vm.submit_query(text));
        }
        assert!(transport.calls().is_empty());
        assert_eq!(h.identity.credential_calls.get(), 0);
        assert!(!h.state.query.is_busy());
        assert!(!notified.get());
    }

    #[test]
    fn test_submission_while_busy_is_ignored() {
        let (gated, gate) = GatedTransport::new();
        let gated = Rc::new(gated);
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), gated.clone());

        let first = h.vm.submit_query("first");
        let second = async {
            assert!(h.state.query.is_busy());
            h.vm.submit_query("second").await;
            gate.send(HttpReply {
                status: 200,
                body: OK_BODY.to_string(),
            })
            .unwrap();
        };
        block_on(async { futures::join!(first, second) });

        assert_eq!(gated.call_count.get(), 1);
        assert_eq!(h.identity.credential_calls.get(), 1);
        let state = h.state.query.snapshot();
        assert_eq!(state.last_result.unwrap().question, "first");
        assert!(!state.busy);
    }

    #[test]
    fn test_failure_keeps_previous_result_and_shows_server_error() {
        let ok = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), ok);
        block_on(h.vm.submit_query("first"));
        let previous = h.state.query.snapshot().last_result.unwrap();

        let failing: Rc<dyn crate::services::HttpTransport> =
            Rc::new(FakeTransport::replying(403, r#"{"error":"Forbidden: domain not allowed"}"#));
        let vm = QueryViewModel::new(
            h.state.clone(),
            h.identity.clone(),
            AnswerClient::with_transport("https://answers.test/", failing),
            h.clipboard.clone(),
        );
        vm.set_input("second".to_string());
        block_on(vm.submit_current());

        let state = h.state.query.snapshot();
        assert_eq!(state.last_result, Some(previous));
        assert_eq!(state.last_error.as_deref(), Some("Forbidden: domain not allowed"));
        assert_eq!(state.input_text, "second");
        assert!(!state.busy);
    }

    #[test]
    fn test_server_error_without_field() {
        let transport = Rc::new(FakeTransport::replying(500, "{}"));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport);
        block_on(h.vm.submit_query("x"));
        assert_eq!(h.state.query.snapshot().last_error.as_deref(), Some("Server error: 500"));
    }

    #[test]
    fn test_no_session_never_hits_network() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_out(), transport.clone());

        block_on(h.vm.submit_query("x"));

        assert!(transport.calls().is_empty());
        assert_eq!(h.identity.credential_calls.get(), 0);
        let state = h.state.query.snapshot();
        assert_eq!(state.last_error.as_deref(), Some("User not authenticated"));
        assert!(!state.busy);
    }

    #[test]
    fn test_credential_refusal_aborts_before_network() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport.clone());
        h.identity
            .fail_credential(IdentityError::rejected("auth/user-token-expired", "TOKEN_EXPIRED"));

        block_on(h.vm.submit_query("x"));
        assert!(transport.calls().is_empty());
        assert_eq!(
            h.state.query.snapshot().last_error.as_deref(),
            Some("Failed to get response. Please try again.")
        );
    }

    #[test]
    fn test_rejected_refresh_signs_out_and_drops_the_error() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport.clone());
        let session_vm = SessionViewModel::new(h.state.clone(), h.identity.clone());
        let _sub = session_vm.attach();
        h.identity.revoke_on_credential();

        block_on(h.vm.submit_query("x"));

        assert!(transport.calls().is_empty());
        assert_eq!(h.state.session.screen(), crate::state::Screen::Login);
        let state = h.state.query.snapshot();
        assert_eq!(state.last_error, None);
        assert_eq!(state.last_result, None);
        assert!(!state.busy);
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_fresh_credential_per_submission() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport.clone());

        block_on(h.vm.submit_query("one"));
        block_on(h.vm.submit_query("two"));

        let bearers: Vec<String> = transport.calls().into_iter().map(|c| c.bearer).collect();
        assert_eq!(bearers, vec!["token-1", "token-2"]);
    }

    #[test]
    fn test_sign_out_mid_flight_discards_stale_answer() {
        let (gated, gate) = GatedTransport::new();
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), Rc::new(gated));
        let session_vm = SessionViewModel::new(h.state.clone(), h.identity.clone());
        let _sub = session_vm.attach();

        let query = h.vm.submit_query("x");
        let sign_out = async {
            h.identity.emit(None);
            gate.send(HttpReply {
                status: 200,
                body: OK_BODY.to_string(),
            })
            .unwrap();
        };
        block_on(async { futures::join!(query, sign_out) });

        let state = h.state.query.snapshot();
        assert_eq!(state.last_result, None);
        assert_eq!(state.last_error, None);
        assert!(!state.busy);
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_dropped_submission_releases_busy() {
        use std::future::Future;

        let (gated, _gate) = GatedTransport::new();
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), Rc::new(gated));

        {
            let mut pending = Box::pin(h.vm.submit_query("x"));
            let waker = futures::task::noop_waker();
            let mut cx = std::task::Context::from_waker(&waker);
            assert!(pending.as_mut().poll(&mut cx).is_pending());
            assert!(h.state.query.is_busy());
        }
        assert!(!h.state.query.is_busy());
    }

    #[test]
    fn test_copy_answer_to_clipboard() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness(FakeIdentity::signed_in("ana@cryocord.com"), transport);
        assert!(!block_on(h.vm.copy_answer_to_clipboard()));

        block_on(h.vm.submit_query("x"));
        assert!(block_on(h.vm.copy_answer_to_clipboard()));
        assert_eq!(*h.clipboard.written.borrow(), vec!["We store samples at -196C...".to_string()]);
        assert_eq!(h.state.query.snapshot().notice.as_deref(), Some(COPY_OK_NOTICE));

        h.vm.clear_notice();
        assert_eq!(h.state.query.snapshot().notice, None);
    }

    #[test]
    fn test_clipboard_failure_is_not_a_query_error() {
        let transport = Rc::new(FakeTransport::replying(200, OK_BODY));
        let h = harness_with_clipboard(
            FakeIdentity::signed_in("ana@cryocord.com"),
            transport,
            FakeClipboard::broken("NotAllowedError"),
        );
        block_on(h.vm.submit_query("x"));

        assert!(!block_on(h.vm.copy_answer_to_clipboard()));
        let state = h.state.query.snapshot();
        assert_eq!(state.last_error, None);
        assert_eq!(state.notice.as_deref(), Some(COPY_FAILED_NOTICE));
    }
}
