use crate::api::server::HttpServer;
use crate::connector::Connector;
use std::sync::Arc;

pub struct AppState<C: Connector> {
    pub server: Arc<HttpServer<C>>,
}

impl<C: Connector> AppState<C> {
    pub fn new(server: Arc<HttpServer<C>>) -> Self {
        Self { server }
    }
}

impl<C: Connector> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            server: Arc::clone(&self.server),
        }
    }
}
