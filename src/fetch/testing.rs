use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use std::cell::RefCell;

use super::transport::{ApiRequest, ApiResponse, Transport};

type Reply = Result<ApiResponse, String>;

/// Records every request and holds its reply until the test settles it.
#[derive(Default)]
pub struct MockTransport {
    calls: RefCell<Vec<ApiRequest>>,
    pending: RefCell<Vec<Option<oneshot::Sender<Reply>>>>,
}

impl MockTransport {
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn request(&self, index: usize) -> ApiRequest {
        self.calls.borrow()[index].clone()
    }

    pub fn respond(&self, index: usize, reply: Reply) {
        let sender = self.pending.borrow_mut()[index]
            .take()
            .expect("request already settled");
        let _ = sender.send(reply);
    }

    /// Drops the reply channel without answering.
    pub fn abandon(&self, index: usize) {
        self.pending.borrow_mut()[index].take();
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'static, Reply> {
        let (tx, rx) = oneshot::channel();
        self.calls.borrow_mut().push(request);
        self.pending.borrow_mut().push(Some(tx));
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err("request abandoned".to_string()))
        })
    }
}

pub fn json(status: u16, body: &str) -> Reply {
    Ok(ApiResponse {
        status,
        body: body.to_string(),
    })
}
