use crate::constants::{BAD_REQUEST, NOT_FOUND, TOPUP_PATH_PREFIX, TOPUP_PATH_SUFFIX};
use crate::req::Method::POST;
use crate::req::Request;
use crate::topup::controller::TopUpController;
use crate::utils::http_response;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot::Receiver;
use tracing::{error, info, warn};

pub struct Server {
    addr: String,
    topup: Arc<TopUpController>,
}

impl Server {
    pub fn new(addr: impl Into<String>, topup: Arc<TopUpController>) -> Self {
        Self {
            addr: addr.into(),
            topup,
        }
    }

    pub async fn start(&self, mut shutdown_rx: Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        info!("Server running on http://{}", self.addr);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let (mut stream, peer) = match conn {
                        Ok(conn) => conn,
                        Err(e) => {
                            warn!("unable to accept connection: {}", e);
                            continue;
                        }
                    };

                    let topup = Arc::clone(&self.topup);

                    tokio::spawn(async move {
                        let (reader, writer) = stream.split();
                        if let Err(e) = Self::handle_client(reader, writer, &topup).await {
                            error!("Connection error from {}: {:#}", peer, e);
                        }
                    });
                }
                _ = &mut shutdown_rx => {
                    info!("Shutting down server...");
                    break;
                }
            }
        }
        Ok(())
    }

    pub async fn handle_client<Reader, Writer>(
        reader: Reader,
        mut writer: Writer,
        topup: &Arc<TopUpController>,
    ) -> Result<()>
    where
        Reader: AsyncRead + Unpin,
        Writer: AsyncWrite + Unpin,
    {
        let (status_line, content) = match Request::new(reader).await {
            Ok(request) => Self::route(&request, topup).await,
            Err(e) => {
                warn!("Failed to read request: {:#}", e);
                (
                    BAD_REQUEST.to_string(),
                    r#"{"message":"Bad Request"}"#.to_string(),
                )
            }
        };

        writer
            .write_all(http_response(&status_line, &content).as_bytes())
            .await
            .context("Failed to write")?;
        writer.flush().await.context("Failed to flush")
    }

    async fn route(request: &Request, topup: &Arc<TopUpController>) -> (String, String) {
        match (&request.method, topup_user_id(&request.path)) {
            (POST, Some(user_id)) => topup.top_up(user_id, request).await,
            _ => (
                NOT_FOUND.to_string(),
                r#"{"message":"Not Found"}"#.to_string(),
            ),
        }
    }
}

/// `{id}` out of `/api/admin/users/{id}/topup`.
fn topup_user_id(path: &str) -> Option<&str> {
    path.strip_prefix(TOPUP_PATH_PREFIX)?
        .strip_suffix(TOPUP_PATH_SUFFIX)
        .filter(|id| !id.is_empty() && !id.contains('/'))
}
