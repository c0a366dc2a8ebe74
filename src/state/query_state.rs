// ============================================================================
// QUERY STATE - Estado de la caja de preguntas
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::QueryResult;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryState {
    pub input_text: String,
    pub busy: bool,
    pub last_error: Option<String>,
    /// Solo se retiene el último resultado exitoso
    pub last_result: Option<QueryResult>,
    /// Aviso transitorio (copiar al portapapeles)
    pub notice: Option<String>,
    /// Se incrementa en cada reset; las respuestas de una generación anterior se descartan
    pub generation: u64,
}

/// Qué mostrar en el área de resultados
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResultArea<'a> {
    Answer(&'a QueryResult),
    EmptyPrompt,
    /// Primera consulta en curso: no hay resultado ni prompt
    Pending,
}

impl QueryState {
    /// Derivación pura del área de resultados. Un resultado anterior sigue
    /// visible mientras una consulta nueva está en curso.
    pub fn result_area(&self) -> ResultArea<'_> {
        match (&self.last_result, self.busy) {
            (Some(result), _) => ResultArea::Answer(result),
            (None, false) => ResultArea::EmptyPrompt,
            (None, true) => ResultArea::Pending,
        }
    }

    /// El botón de envío solo se habilita con texto y sin consulta en curso
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.input_text.trim().is_empty()
    }
}

/// Handle compartido del estado de consultas
#[derive(Clone, Default)]
pub struct QueryStore {
    inner: Rc<RefCell<QueryState>>,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia del estado actual
    pub fn snapshot(&self) -> QueryState {
        self.inner.borrow().clone()
    }

    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut QueryState) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }

    pub fn set_input(&self, text: String) {
        self.inner.borrow_mut().input_text = text;
    }

    pub fn is_busy(&self) -> bool {
        self.inner.borrow().busy
    }

    /// Vaciar todo e invalidar consultas en vuelo (logout)
    pub fn reset(&self) {
        let mut state = self.inner.borrow_mut();
        let generation = state.generation + 1;
        *state = QueryState {
            generation,
            ..QueryState::default()
        };
    }

    /// Liberar busy sin entrar en pánico si el estado está prestado (Drop de guards)
    pub(crate) fn release_busy(&self, generation: u64) {
        match self.inner.try_borrow_mut() {
            Ok(mut state) if state.generation == generation => state.busy = false,
            Ok(_) => {}
            Err(_) => log::warn!("⚠️ [QUERY] Estado prestado al liberar busy"),
        }
    }
}
