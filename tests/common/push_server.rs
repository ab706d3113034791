//! In-process push endpoint built on tokio-tungstenite.

use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;

#[derive(Default)]
struct Outbox {
    /// Sender for the most recently accepted connection
    current: Option<mpsc::UnboundedSender<Message>>,
    /// Frames queued before any connection was accepted
    pending: Vec<Message>,
}

/// WebSocket server that records request paths and sends queued frames to
/// the most recently accepted client.
pub struct PushServer {
    /// Base URL to hand to the notification channel, ending in `/ws`
    pub base_url: String,
    outbox: Arc<Mutex<Outbox>>,
    paths: Arc<Mutex<Vec<String>>>,
    connections: Arc<AtomicUsize>,
}

impl PushServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let outbox = Arc::new(Mutex::new(Outbox::default()));
        let paths = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let server_outbox = outbox.clone();
        let server_paths = paths.clone();
        let server_connections = connections.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let paths = server_paths.clone();
                let record_path =
                    move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                        paths.lock().unwrap().push(req.uri().path().to_string());
                        Ok(resp)
                    };
                let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(stream, record_path).await
                else {
                    continue;
                };

                let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
                {
                    let mut outbox = server_outbox.lock().unwrap();
                    for msg in outbox.pending.drain(..) {
                        let _ = tx.send(msg);
                    }
                    outbox.current = Some(tx);
                }
                server_connections.fetch_add(1, Ordering::SeqCst);

                tokio::spawn(async move {
                    loop {
                        tokio::select! {
                            msg = rx.recv() => match msg {
                                Some(msg) => {
                                    let closing = matches!(msg, Message::Close(_));
                                    if ws.send(msg).await.is_err() || closing {
                                        break;
                                    }
                                }
                                None => break,
                            },
                            incoming = ws.next() => match incoming {
                                Some(Ok(_)) => {}
                                _ => break,
                            },
                        }
                    }
                });
            }
        });

        Self {
            base_url: format!("ws://{}/ws", addr),
            outbox,
            paths,
            connections,
        }
    }

    fn queue(&self, msg: Message) {
        let mut outbox = self.outbox.lock().unwrap();
        let undelivered = match &outbox.current {
            Some(tx) => tx.send(msg).err().map(|e| e.0),
            None => Some(msg),
        };
        if let Some(msg) = undelivered {
            outbox.pending.push(msg);
        }
    }

    pub fn send_text(&self, text: &str) {
        self.queue(Message::Text(text.to_string()));
    }

    pub fn send_binary(&self, data: &[u8]) {
        self.queue(Message::Binary(data.to_vec()));
    }

    pub fn send_ping(&self) {
        self.queue(Message::Ping(b"hb".to_vec()));
    }

    /// Close the current connection from the server side.
    pub fn close(&self) {
        self.queue(Message::Close(None));
    }

    /// Request paths of every accepted handshake.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}
