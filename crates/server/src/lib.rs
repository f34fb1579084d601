use db::DBService;
use wechat::SubscribeService;

pub mod error;
pub mod http;
pub mod response;
pub mod routes;
#[cfg(test)]
mod test_support;

/// Shared per-process state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    wechat: SubscribeService,
}

impl AppState {
    pub fn new(db: DBService, wechat: SubscribeService) -> Self {
        Self { db, wechat }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn wechat(&self) -> &SubscribeService {
        &self.wechat
    }
}
