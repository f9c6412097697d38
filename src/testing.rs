// Dobles de prueba compartidos por los tests de cada módulo

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use async_trait::async_trait;
use crate::config::ApiConfig;
use crate::services::api_client::ApiClient;
use crate::services::error::TransportError;
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::utils::storage::MemoryStore;

/// Transporte con respuestas guionizadas; registra cada request
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_string())))
    }
}

pub fn client_with(transport: MockTransport, store: MemoryStore) -> (ApiClient, Rc<MockTransport>, Rc<MemoryStore>) {
    let transport = Rc::new(transport);
    let store = Rc::new(store);
    let client = ApiClient::new(&ApiConfig::default(), transport.clone(), store.clone());
    (client, transport, store)
}
