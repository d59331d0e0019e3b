//! Shared HTTP client configuration.

use crate::config::YoutubeSettings;
use crate::error::Result;
use std::time::Duration;

/// Create an HTTP client with the configured timeout and user agent.
pub fn create_client(settings: &YoutubeSettings) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Loopback HTTP server answering with canned responses, for client tests.
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Canned response keyed by request path (query string ignored).
    #[derive(Debug, Clone)]
    pub struct Route {
        pub path: &'static str,
        pub status: u16,
        pub content_type: &'static str,
        pub body: String,
    }

    impl Route {
        pub fn new(path: &'static str, status: u16, content_type: &'static str, body: impl Into<String>) -> Self {
            Self {
                path,
                status,
                content_type,
                body: body.into(),
            }
        }
    }

    /// Serve `routes` on 127.0.0.1 and return the base URL. Unknown paths get 404.
    pub async fn serve(routes: Vec<Route>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<&'static str, Route>> =
            Arc::new(routes.into_iter().map(|route| (route.path, route)).collect());

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }

                    let request = String::from_utf8_lossy(&request);
                    let target = request.split_whitespace().nth(1).unwrap_or("/");
                    let path = target.split('?').next().unwrap_or(target);

                    let (status, content_type, body) = match routes.get(path) {
                        Some(route) => (route.status, route.content_type, route.body.clone()),
                        None => (404, "text/plain", String::new()),
                    };
                    let response = format!(
                        "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        content_type,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }
}
