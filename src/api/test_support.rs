//
//  scribe-cli
//  api/test_support.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! In-process fakes shared by the API unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::transport::{OutgoingRequest, RawResponse, Transport, TransportError};
use super::ScribeClient;
use crate::auth::{MemoryTokenStore, TokenStore};

type Responder = dyn Fn(&OutgoingRequest) -> Result<RawResponse, TransportError> + Send + Sync;

/// Transport that answers from a closure and records every attempt.
pub struct ScriptedTransport {
    responder: Box<Responder>,
    calls: Mutex<Vec<OutgoingRequest>>,
}

impl ScriptedTransport {
    pub fn routes<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&OutgoingRequest) -> RawResponse + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(move |req| Ok(respond(req))),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn always(status: u16, body: &'static str) -> Arc<Self> {
        Self::routes(move |_| RawResponse::new(status, body))
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(|_| Err(TransportError::Connect("connection refused".into()))),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<OutgoingRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.calls.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

/// Token store that counts clears and can be made to fail on read.
#[derive(Default)]
pub struct CountingTokenStore {
    inner: MemoryTokenStore,
    clears: AtomicUsize,
    fail_reads: bool,
}

impl CountingTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            inner: MemoryTokenStore::with_token(token),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingTokenStore {
    fn get(&self) -> anyhow::Result<Option<String>> {
        if self.fail_reads {
            anyhow::bail!("keyring locked");
        }
        self.inner.get()
    }

    fn store(&self, token: &str) -> anyhow::Result<()> {
        self.inner.store(token)
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }
}

/// Client over `transport` with an empty in-memory token store.
pub fn client_with(transport: Arc<ScriptedTransport>) -> ScribeClient {
    ScribeClient::new(transport, Arc::new(MemoryTokenStore::new()))
}
