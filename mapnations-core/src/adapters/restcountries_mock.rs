//! Mock REST Countries server for testing
//!
//! Serves the demo catalog over HTTP with the same routes and status codes
//! as the real API, so the HTTP client can be tested without network access:
//! - GET /all, /name/{term}, /region/{region}, /lang/{language} return arrays
//! - GET /alpha/{code} returns a single-element array
//! - empty results answer 404 `{"status": 404, "message": "Not Found"}`

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use super::demo::DemoCountrySource;
use crate::domain::result::Error;
use crate::domain::Country;
use crate::ports::CountrySource;

/// Mock REST Countries server
pub struct MockRestCountriesServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<String>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Behavior switches for the mock
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Answer every request with this status instead of data
    pub fail_status: Option<u16>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
    /// Answer `/alpha` with a bare object instead of an array
    pub alpha_as_object: bool,
}

impl MockRestCountriesServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so stop() can end the accept loop
        listener.set_nonblocking(true)?;

        let running_clone = Arc::clone(&running);
        let requests_clone = Arc::clone(&requests);
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = Arc::clone(&requests_clone);
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/v3.1", self.port)
    }

    /// Request targets received so far (path + query)
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockRestCountriesServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<String>>) {
    // Accepted sockets inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);

    let mut buffer = [0; 4096];
    let n = match stream.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"status": 400, "message": "Bad Request"}"#);
        return;
    }
    let (method, target) = (parts[0], parts[1]);

    if let Ok(mut entries) = log.lock() {
        entries.push(target.to_string());
    }

    if let Some(status) = config.fail_status {
        let body = format!(r#"{{"status": {}, "message": "Simulated failure"}}"#, status);
        send_response(&mut stream, status, "Error", &body);
        return;
    }

    if method != "GET" {
        send_response(&mut stream, 405, "Method Not Allowed", r#"{"status": 405, "message": "Method Not Allowed"}"#);
        return;
    }

    let path = target.split('?').next().unwrap_or(target);
    let segments: Vec<String> = path
        .trim_start_matches('/')
        .split('/')
        .map(percent_decode)
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    let source = DemoCountrySource::new();
    let result: Result<Vec<Country>, Error> = match segments.as_slice() {
        ["v3.1", "all"] => source.all(),
        ["v3.1", "name", term] => source.by_name(term),
        ["v3.1", "region", region] => region.parse().and_then(|r| source.by_region(r)),
        ["v3.1", "alpha", code] => source.by_code(code).map(|c| vec![c]),
        ["v3.1", "lang", language] => source.by_language(language),
        _ => Err(Error::EntityNotFound(path.to_string())),
    };

    match result {
        Ok(countries) => {
            let body = if config.alpha_as_object && segments.get(1) == Some(&"alpha") {
                serde_json::to_string(&countries[0])
            } else {
                serde_json::to_string(&countries)
            };
            match body {
                Ok(json) => send_response(&mut stream, 200, "OK", &json),
                Err(_) => send_response(&mut stream, 500, "Internal Server Error", "{}"),
            }
        }
        Err(_) => send_response(
            &mut stream,
            404,
            "Not Found",
            r#"{"status": 404, "message": "Not Found"}"#,
        ),
    }
}

fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::restcountries::RestCountriesClient;
    use crate::domain::Region;

    fn client_for(server: &MockRestCountriesServer) -> RestCountriesClient {
        RestCountriesClient::new_with_base_url(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_all_requests_field_list() {
        let server = MockRestCountriesServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let countries = client.all().unwrap();
        assert_eq!(countries.len(), DemoCountrySource::new().all().unwrap().len());

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("/v3.1/all?fields="));
    }

    #[test]
    fn test_by_name_encodes_spaces() {
        let server = MockRestCountriesServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let countries = client.by_name("new zealand").unwrap();
        assert_eq!(countries[0].cca3, "NZL");
        assert_eq!(server.requests()[0], "/v3.1/name/new%20zealand");
    }

    #[test]
    fn test_by_region_and_language() {
        let server = MockRestCountriesServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let asia = client.by_region(Region::Asia).unwrap();
        assert!(asia.iter().all(|c| c.region == "Asia"));

        let spanish = client.by_language("spanish").unwrap();
        let codes: Vec<_> = spanish.iter().map(|c| c.cca3.as_str()).collect();
        assert_eq!(codes, vec!["ESP", "MEX"]);
    }

    #[test]
    fn test_by_code() {
        let server = MockRestCountriesServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let japan = client.by_code("JPN").unwrap();
        assert_eq!(japan.display_name(), "Japan");
    }

    #[test]
    fn test_by_code_object_response() {
        let server = MockRestCountriesServer::start(MockConfig {
            alpha_as_object: true,
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        assert_eq!(client.by_code("KEN").unwrap().cca3, "KEN");
    }

    #[test]
    fn test_not_found_maps_to_entity_not_found() {
        let server = MockRestCountriesServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        assert!(matches!(client.by_code("XYZ"), Err(Error::EntityNotFound(ref c)) if c == "XYZ"));
        assert!(matches!(client.by_name("atlantis"), Err(Error::EntityNotFound(_))));
    }

    #[test]
    fn test_server_error_maps_to_remote_fetch() {
        let server = MockRestCountriesServer::start(MockConfig {
            fail_status: Some(500),
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        let err = client.all().unwrap_err();
        assert!(matches!(err, Error::RemoteFetch(ref m) if m.contains("HTTP 500")));
    }

    #[test]
    fn test_rate_limit_message() {
        let server = MockRestCountriesServer::start(MockConfig {
            fail_status: Some(429),
            ..Default::default()
        })
        .unwrap();
        let client = client_for(&server);

        let err = client.by_region(Region::Europe).unwrap_err().to_string().to_lowercase();
        assert!(err.contains("rate limit"), "got: {}", err);
    }

    #[test]
    fn test_timeout() {
        let server = MockRestCountriesServer::start(MockConfig {
            delay_ms: 1500,
            ..Default::default()
        })
        .unwrap();
        let client =
            RestCountriesClient::new_with_base_url(&server.base_url(), Duration::from_millis(200)).unwrap();

        let err = client.all().unwrap_err();
        assert!(matches!(err, Error::RemoteFetch(_)));
    }

    #[test]
    fn test_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = RestCountriesClient::new_with_base_url(
            &format!("http://127.0.0.1:{}/v3.1", port),
            Duration::from_secs(2),
        )
        .unwrap();

        assert!(matches!(client.all(), Err(Error::RemoteFetch(_))));
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("new%20zealand"), "new zealand");
        assert_eq!(percent_decode("plain"), "plain");
        assert_eq!(percent_decode("bad%2"), "bad%2");
    }
}
