//! HTTP client for the evaluation service

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::EvalError;
use crate::messages::NetworkResponse;

/// Request body sent to the evaluator
#[derive(Debug, Serialize)]
struct EvaluateRequest<'a> {
    expression: &'a str,
}

/// Posts expressions to the evaluator and interprets its replies
#[derive(Debug, Clone)]
pub struct EvaluatorClient {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl EvaluatorClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        EvaluatorClient {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.evaluator_url.clone(), config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Evaluate one expression, returning the display-ready result
    pub async fn evaluate(&self, expression: &str) -> Result<String, EvalError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&EvaluateRequest { expression })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;

        if status.is_success() {
            parse_result(&body)
        } else {
            Err(EvalError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            })
        }
    }

    /// Evaluate and package the outcome for the App layer
    pub async fn execute(&self, id: u64, expression: String) -> NetworkResponse {
        let start = Instant::now();
        let result = self.evaluate(&expression).await;
        let time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(value) => NetworkResponse::Evaluated { id, value, time_ms },
            Err(error) => NetworkResponse::Failed { id, error, time_ms },
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> EvalError {
        if e.is_timeout() {
            EvalError::Timeout(self.timeout)
        } else {
            EvalError::Network(e.to_string())
        }
    }
}

/// Pull the result out of a successful reply: a JSON object with `data`
fn parse_result(body: &str) -> Result<String, EvalError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| EvalError::Malformed(format!("response is not JSON ({})", e)))?;

    match json.get("data") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(Value::Null) | None => Err(EvalError::Malformed(String::from(
            "missing \"data\" field",
        ))),
        Some(other) => Err(EvalError::Malformed(format!(
            "\"data\" is not a scalar: {}",
            other
        ))),
    }
}

/// Best available explanation for a non-2xx reply
fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(msg) = json.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Read one HTTP request (headers plus Content-Length body)
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve a single canned response; the handle yields the raw request
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}/api/calculate", addr), handle)
    }

    #[tokio::test]
    async fn test_posts_expression_and_reads_data() {
        let (url, server) = serve_once("200 OK", r#"{"data":"4"}"#).await;
        let client = EvaluatorClient::new(url, Duration::from_secs(5));

        let value = client.evaluate("2+2").await.unwrap();
        assert_eq!(value, "4");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/calculate HTTP/1.1"));
        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let json: Value = serde_json::from_str(body).unwrap();
        assert_eq!(json, serde_json::json!({ "expression": "2+2" }));
    }

    #[tokio::test]
    async fn test_numeric_data() {
        let (url, _server) = serve_once("200 OK", r#"{"data":12.5}"#).await;
        let client = EvaluatorClient::new(url, Duration::from_secs(5));
        assert_eq!(client.evaluate("25/2").await.unwrap(), "12.5");
    }

    #[tokio::test]
    async fn test_missing_data_is_malformed() {
        let (url, _server) = serve_once("200 OK", r#"{"result":"4"}"#).await;
        let client = EvaluatorClient::new(url, Duration::from_secs(5));
        assert!(matches!(
            client.evaluate("2+2").await,
            Err(EvalError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_rejection_uses_error_field() {
        let (url, _server) =
            serve_once("400 Bad Request", r#"{"error":"cannot match ("}"#).await;
        let client = EvaluatorClient::new(url, Duration::from_secs(5));
        assert_eq!(
            client.evaluate("(1+2").await,
            Err(EvalError::Rejected {
                status: 400,
                message: "cannot match (".into()
            })
        );
    }

    #[tokio::test]
    async fn test_execute_reports_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = EvaluatorClient::new(format!("http://{}/api/calculate", addr), Duration::from_secs(5));
        match client.execute(7, "1+1".into()).await {
            NetworkResponse::Failed { id, error: EvalError::Network(_), .. } => assert_eq!(id, 7),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let timeout = Duration::from_millis(200);
        let client = EvaluatorClient::new(format!("http://{}/api/calculate", addr), timeout);
        assert_eq!(client.evaluate("1").await, Err(EvalError::Timeout(timeout)));
    }

    #[test]
    fn test_parse_result() {
        assert_eq!(parse_result(r#"{"data":"-3"}"#), Ok("-3".to_string()));
        assert!(matches!(parse_result("4"), Err(EvalError::Malformed(_))));
        assert!(matches!(parse_result("not json"), Err(EvalError::Malformed(_))));
        assert!(matches!(parse_result(r#"{"data":null}"#), Err(EvalError::Malformed(_))));
        assert!(matches!(parse_result(r#"{"data":[1]}"#), Err(EvalError::Malformed(_))));
    }

    #[test]
    fn test_rejection_message_fallbacks() {
        let status = reqwest::StatusCode::UNPROCESSABLE_ENTITY;
        assert_eq!(rejection_message(status, r#"{"message":"bad"}"#), "bad");
        assert_eq!(rejection_message(status, "  division by zero \n"), "division by zero");
        assert_eq!(rejection_message(status, ""), "Unprocessable Entity");
    }
}
