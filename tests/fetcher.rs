//! HttpFetcher behaviour against real HTTP and HTTPS endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bulletin_crawler::error::AppError;
use bulletin_crawler::models::HttpConfig;
use bulletin_crawler::utils::http::{Fetcher, HttpFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::rustls::crypto::ring;
use tokio_rustls::rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const PDF: &[u8] = b"%PDF-1.4 self-signed bulletin";

/// HTTPS server with a self-signed certificate that answers every request
/// with [`PDF`]. Counts accepted TCP connections.
struct SelfSignedServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
}

impl SelfSignedServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let acceptor = TlsAcceptor::from(Arc::new(server_config()));
        let connections = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&connections);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    let Ok(mut tls) = acceptor.accept(stream).await else {
                        return;
                    };
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match tls.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n",
                        PDF.len()
                    );
                    let _ = tls.write_all(head.as_bytes()).await;
                    let _ = tls.write_all(PDF).await;
                    let _ = tls.shutdown().await;
                });
            }
        });

        Self { addr, connections }
    }

    fn url(&self) -> String {
        format!("https://{}/bulletin.pdf", self.addr)
    }

    fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

fn server_config() -> ServerConfig {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string()]).unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![cert.der().clone()], key)
        .unwrap()
}

fn fetcher(insecure_fallback: bool) -> HttpFetcher {
    HttpFetcher::new(&HttpConfig {
        insecure_fallback,
        ..HttpConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_self_signed_certificate_falls_back() {
    let server = SelfSignedServer::start().await;

    let body = fetcher(true).fetch(&server.url(), None).await.unwrap();

    assert_eq!(body, PDF);
    assert_eq!(server.connections(), 2);
}

#[tokio::test]
async fn test_self_signed_certificate_rejected_without_fallback() {
    let server = SelfSignedServer::start().await;

    let err = fetcher(false).fetch(&server.url(), None).await.unwrap_err();

    match err {
        AppError::ConnectionFailure { message, .. } => {
            assert!(message.contains("certificate"), "unexpected message: {message}");
        }
        other => panic!("expected connection failure, got {other:?}"),
    }
    assert_eq!(server.connections(), 1);
}

#[tokio::test]
async fn test_url_mentioning_certificate_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/uploads/certificate-of-bulletin.pdf", server.uri());
    let err = fetcher(true).fetch(&url, None).await.unwrap_err();

    assert!(err.is_connection_failure());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
