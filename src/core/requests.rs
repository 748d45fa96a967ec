use crate::core::params::Params;
use crate::core::response::{ensure_success, make_return, Mapped, SpecMode};
use crate::core::session::Session;
use crate::domain::ports::ApiModel;
use crate::utils::error::{QiwiError, Result};
use serde::Serialize;
use std::ops::Deref;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Owns one [`Session`] and runs every call through it.
///
/// Calls take `&self` and may run concurrently. Once [`Requests::close`] has run, every
/// further call fails with [`QiwiError::SessionClosed`].
#[derive(Debug)]
pub struct Requests {
    session: RwLock<Option<Session>>,
}

impl Requests {
    pub fn new(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.session.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Handle for a single call. The lock is never held across an await.
    fn session(&self) -> Result<Session> {
        self.read().as_ref().cloned().ok_or(QiwiError::SessionClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.read().is_none()
    }

    /// Releases the session. Returns `false` when it was already closed.
    pub fn close(&self) -> bool {
        match self.write().take() {
            Some(_) => {
                tracing::debug!("🔒 HTTP session closed");
                true
            }
            None => {
                tracing::debug!("HTTP session already closed");
                false
            }
        }
    }

    pub async fn get<T: ApiModel>(
        &self,
        url: &str,
        params: Option<&Params>,
        mode: SpecMode,
    ) -> Result<Mapped<T>> {
        let session = self.session()?;
        let mut request = session.client().get(url);
        if let Some(params) = params {
            tracing::debug!("GET {} with {} params", url, params.len());
            request = request.query(params);
        } else {
            tracing::debug!("GET {}", url);
        }

        let response = request.send().await?;
        make_return(response, mode).await
    }

    pub async fn post<T: ApiModel, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        mode: SpecMode,
    ) -> Result<Mapped<T>> {
        let session = self.session()?;
        let payload = session.serialize_body(&serde_json::to_value(body)?)?;
        tracing::debug!("POST {} ({} bytes)", url, payload.len());

        let response = session.client().post(url).body(payload).send().await?;
        make_return(response, mode).await
    }

    /// GET for non-JSON payloads such as receipt files.
    pub async fn get_bytes(&self, url: &str, params: Option<&Params>) -> Result<Vec<u8>> {
        let session = self.session()?;
        let mut request = session.client().get(url);
        if let Some(params) = params {
            request = request.query(params);
        }
        tracing::debug!("GET {} (binary)", url);

        let response = request.send().await?;
        ensure_success(response).await
    }
}

/// A client that owns a [`Requests`] façade.
pub trait SessionOwner {
    fn requests(&self) -> &Requests;

    fn close(&self) -> bool {
        self.requests().close()
    }

    fn is_closed(&self) -> bool {
        self.requests().is_closed()
    }

    /// Scoped use: the session is closed when the returned guard is dropped,
    /// whether the scope ends normally, with `?`, or by unwinding.
    fn enter(&self) -> SessionScope<'_, Self>
    where
        Self: Sized,
    {
        SessionScope { owner: self }
    }
}

impl SessionOwner for Requests {
    fn requests(&self) -> &Requests {
        self
    }
}

pub struct SessionScope<'a, O: SessionOwner> {
    owner: &'a O,
}

impl<O: SessionOwner> Deref for SessionScope<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.owner
    }
}

impl<O: SessionOwner> Drop for SessionScope<'_, O> {
    fn drop(&mut self) {
        self.owner.close();
    }
}
