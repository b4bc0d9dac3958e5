//! 集成测试共用的本地 HTTP 服务器。
//!
//! 每个连接只处理一个请求，按顺序返回预设的响应；响应用完后重复最后一个。

#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// 一个预设的 HTTP 响应。
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_type: "text/html; charset=utf-8",
            delay: None,
        }
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self {
            content_type: "application/json",
            ..Self::html(body)
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::html("")
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// 本地 HTTP 服务器，在被丢弃时停止。
pub struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(responses: Vec<MockResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("无法绑定本地端口");
        let addr = listener.local_addr().expect("无法获取本地地址");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responses = Arc::new(responses);

        let requests_clone = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            let mut served = 0usize;
            while let Ok((stream, _)) = listener.accept().await {
                let response = responses
                    .get(served)
                    .or_else(|| responses.last())
                    .cloned()
                    .unwrap_or_else(|| MockResponse::status(404));
                served += 1;
                tokio::spawn(handle_connection(
                    stream,
                    response,
                    Arc::clone(&requests_clone),
                ));
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 收到的请求行中的路径（含查询字符串），按到达顺序排列。
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("锁已中毒").clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    response: MockResponse,
    requests: Arc<Mutex<Vec<String>>>,
) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);
                if buffer.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }

    let request = String::from_utf8_lossy(&buffer);
    if let Some(path) = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    {
        requests.lock().expect("锁已中毒").push(path.to_string());
    }

    if let Some(delay) = response.delay {
        tokio::time::sleep(delay).await;
    }

    let reply = format!(
        "HTTP/1.1 {} Mock\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.content_type,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(reply.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// 返回一个当前没有监听者的本地地址。
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("无法绑定本地端口");
    let addr = listener.local_addr().expect("无法获取本地地址");
    drop(listener);
    format!("http://{addr}")
}

/// 读取 `tests/test_data` 下的测试数据。
pub fn load_test_data(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test_data")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("无法读取 {}: {e}", path.display()))
}
