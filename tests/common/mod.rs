#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde_json::json;
use submission_relay::{
    models::{ConfigError, RelayConfig},
    services::messenger::{InputFile, MessengerError, MessengerService},
};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "123456:TEST-TOKEN";
pub const TEST_CHAT_ID: &str = "-1001234567890";

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("submission_relay=debug")
            .with_test_writer()
            .init();
    });
}

/// A call received by [`MockMessenger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentCall {
    Message {
        chat_id: String,
        text: String,
    },
    Photo {
        chat_id: String,
        file: InputFile,
        caption: String,
    },
    Document {
        chat_id: String,
        file: InputFile,
        caption: String,
    },
}

/// A mock messenger that stores every call for testing purposes.
/// Calls are recorded even when configured to fail.
#[derive(Debug, Default)]
pub struct MockMessenger {
    calls: Mutex<Vec<SentCall>>,
    fail_messages: bool,
    fail_files: bool,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A messenger whose `send_message` always fails
    pub fn failing_messages() -> Self {
        Self {
            fail_messages: true,
            ..Self::default()
        }
    }

    /// A messenger whose photo and document uploads always fail
    pub fn failing_files() -> Self {
        Self {
            fail_files: true,
            ..Self::default()
        }
    }

    /// Get all calls for testing verification
    pub fn calls(&self) -> Vec<SentCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the count of calls
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Get the text of the first message sent
    pub fn first_message_text(&self) -> Option<String> {
        self.calls().into_iter().find_map(|call| match call {
            SentCall::Message { text, .. } => Some(text),
            _ => None,
        })
    }

    fn record(&self, call: SentCall, fail: bool) -> Result<(), MessengerError> {
        self.calls.lock().unwrap().push(call);
        if fail {
            Err(MessengerError::Rejected {
                status: 400,
                description: "Bad Request: mock failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessengerService for MockMessenger {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), MessengerError> {
        let call = SentCall::Message {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        };
        self.record(call, self.fail_messages)
    }

    async fn send_photo(
        &self,
        chat_id: &str,
        photo: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        let call = SentCall::Photo {
            chat_id: chat_id.to_string(),
            file: photo,
            caption: caption.to_string(),
        };
        self.record(call, self.fail_files)
    }

    async fn send_document(
        &self,
        chat_id: &str,
        document: InputFile,
        caption: &str,
    ) -> Result<(), MessengerError> {
        let call = SentCall::Document {
            chat_id: chat_id.to_string(),
            file: document,
            caption: caption.to_string(),
        };
        self.record(call, self.fail_files)
    }
}

pub fn test_config() -> Result<RelayConfig, ConfigError> {
    RelayConfig::new(Some(TEST_TOKEN.to_string()), Some(TEST_CHAT_ID.to_string()))
}

/// Spawns the application with the given configuration and messenger and
/// returns its address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app(
    config: Result<RelayConfig, ConfigError>,
    messenger: Arc<MockMessenger>,
) -> String {
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = submission_relay::app_with_messenger(config, Some(messenger));
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

/// Spawns a correctly configured application backed by a fresh mock messenger.
pub async fn spawn_configured_app() -> (String, Arc<MockMessenger>) {
    let messenger = Arc::new(MockMessenger::new());
    let address = spawn_app(test_config(), Arc::clone(&messenger)).await;
    (address, messenger)
}

/// Bytes standing in for a JPEG photo
pub fn sample_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0xFF, 0xD9]
}

/// Bytes standing in for a PDF document
pub fn sample_pdf() -> Vec<u8> {
    b"%PDF-1.4\n%test document\n%%EOF\n".to_vec()
}

/// Builds a `data:` URL for the given bytes
pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", BASE64.encode(bytes))
}

pub fn create_full_submission() -> serde_json::Value {
    json!({
        "fullName": "María José Pérez",
        "nationalId": "V-12.345.678",
        "birthPlace": "Valencia",
        "birthDate": "1990-04-12",
        "address": "Av. Principal 123, Apt 4B",
        "phone": "+58 412 555 0101",
        "email": "maria.perez@example.com",
        "reason": "Requesting enrollment in the spring program.",
        "submittedAt": "2026-10-16T14:05:09Z",
        "status": "Under review"
    })
}

/// Posts a JSON submission to the relay endpoint
pub async fn post_submission(
    client: &reqwest::Client,
    address: &str,
    body: &serde_json::Value,
) -> reqwest::Response {
    client
        .post(format!("{address}/api/submit"))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request")
}
