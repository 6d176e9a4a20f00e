use std::cell::RefCell;

use quickstatements::client::{BatchResponse, EnvCredentials};
use quickstatements::{
    BatchBuilder, Client, ClientConfig, ConfigError, Credentials, Error, Identifier, Submission,
    Transport, TransportError,
};

/// Records submissions and replies with a canned body.
struct FakeTransport {
    reply: &'static str,
    seen: RefCell<Vec<(String, Submission)>>,
}

impl FakeTransport {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for FakeTransport {
    fn submit(&self, endpoint: &str, submission: &Submission) -> Result<BatchResponse, TransportError> {
        self.seen
            .borrow_mut()
            .push((endpoint.to_string(), submission.clone()));
        BatchResponse::from_json(self.reply)
    }
}

struct Unreachable;

impl Transport for Unreachable {
    fn submit(&self, _: &str, _: &Submission) -> Result<BatchResponse, TransportError> {
        Err(TransportError::Other("connection refused".to_string()))
    }
}

fn sample_batch() -> quickstatements::Batch {
    BatchBuilder::new("test batch")
        .create_item()
        .claim(
            Identifier::last(),
            Identifier::new("P31").unwrap(),
            Identifier::new("Q5").unwrap(),
            |c| c,
        )
        .build()
        .unwrap()
}

#[test]
fn post_hands_payload_and_credentials_to_transport() {
    let transport = FakeTransport::replying(r#"{"status":"OK","batch_id":4242}"#);
    let client = Client::new(
        "https://quickstatements.toolforge.org/",
        "wikidata",
        Credentials::new("Example", "secret"),
        transport,
    );

    let result = client.post(&sample_batch()).unwrap();
    assert_eq!(result.batch_id, "4242");
    assert_eq!(
        result.batch_url,
        "https://quickstatements.toolforge.org/#/batch/4242"
    );

    let seen = client.transport().seen.borrow();
    assert_eq!(seen.len(), 1);
    let (endpoint, submission) = &seen[0];
    assert_eq!(endpoint, "https://quickstatements.toolforge.org/api.php");
    assert_eq!(submission.data, "CREATE\nLAST|P31|Q5");
    assert_eq!(submission.batchname.as_deref(), Some("test batch"));
    assert_eq!(submission.username, "Example");
    assert_eq!(submission.token, "secret");
    assert_eq!(submission.site, "wikidata");
}

#[test]
fn rejected_batch_surfaces_transport_error() {
    let client = Client::new(
        "https://qs.example.org",
        "wikidata",
        Credentials::new("Example", "secret"),
        FakeTransport::replying(r#"{"status":"Bad token"}"#),
    );
    assert!(matches!(
        client.post(&sample_batch()),
        Err(Error::Transport(TransportError::Rejected { .. }))
    ));
}

#[test]
fn transport_failure_is_propagated() {
    let client = Client::new("https://qs.example.org", "wikidata", Credentials::new("u", "t"), Unreachable);
    assert!(matches!(
        client.post(&sample_batch()),
        Err(Error::Transport(TransportError::Other(_)))
    ));
}

#[test]
fn missing_credentials_stop_before_transport() {
    let transport = FakeTransport::replying(r#"{"status":"OK","batch_id":1}"#);
    let client = Client::from_config(ClientConfig::default(), transport);
    assert!(matches!(
        client.post(&sample_batch()),
        Err(Error::Config(ConfigError::MissingField { .. }))
    ));
    assert!(client.transport().seen.borrow().is_empty());
}

#[test]
fn from_config_uses_configured_instance() {
    let config = ClientConfig::from_toml_str(
        r#"
        [quickstatements]
        base_url = "https://qs.example.org/"
        site = "testwikidata"
        username = "Example"
        token = "secret"
        "#,
    )
    .unwrap();
    let client = Client::from_config(config, FakeTransport::replying(r#"{"status":"OK","batch_id":"9"}"#));

    let submission = client.prepare(&sample_batch()).unwrap();
    assert_eq!(submission.site, "testwikidata");
    assert_eq!(client.endpoint(), "https://qs.example.org/api.php");
    assert_eq!(
        client.post(&sample_batch()).unwrap().batch_url,
        "https://qs.example.org/#/batch/9"
    );
    assert_eq!(
        client.batch_import_url(&sample_batch()).unwrap(),
        "https://qs.example.org/#/v1=CREATE%7C%7CLAST%7CP31%7CQ5"
    );
}

#[test]
fn env_credentials_report_missing_variables() {
    // Only assert the shape of the error; the variables may be set by the host.
    if std::env::var("QUICKSTATEMENTS_USERNAME").is_err() {
        assert!(matches!(
            quickstatements::CredentialsProvider::credentials(&EnvCredentials),
            Err(ConfigError::MissingField { field: "username", .. })
        ));
    }
}
