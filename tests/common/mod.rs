//! Local stand-in for the package index

#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A one-shot HTTP server answering a single request
pub struct IndexServer {
    pub url: String,
    request: JoinHandle<String>,
}

impl IndexServer {
    /// Serve `body` with the given status to the first connection
    pub async fn start(status: &str, body: impl Into<Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        let status = status.to_string();
        let body = body.into();

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read request");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.expect("write head");
            socket.write_all(&body).await.expect("write body");
            socket.shutdown().await.ok();

            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });

        Self { url, request }
    }

    /// Request line the server received
    pub async fn request_line(self) -> String {
        self.request.await.expect("server task")
    }
}

/// A results page with one snippet per `(name, version, description)`
pub fn results_page(packages: &[(&str, &str, &str)]) -> String {
    let mut page = String::from("<html>\n<ul>\n");
    for (name, version, description) in packages {
        page.push_str(&format!(
            concat!(
                "<li><a class=\"package-snippet\" href=\"/project/{0}/\">\n",
                "  <h3 class=\"package-snippet__title\">\n",
                "    <span class=\"package-snippet__name\">{0}</span>\n",
                "    <span class=\"package-snippet__version\">{1}</span>\n",
                "  </h3>\n",
                "  <p class=\"package-snippet__description\">{2}</p>\n",
                "</a></li>\n",
            ),
            name, version, description
        ));
    }
    // Unrelated markup after the results also matches the name pattern
    page.push_str("</ul>\n<footer><span class=\"sponsor__name\">Fastly</span></footer>\n</html>\n");
    page
}
