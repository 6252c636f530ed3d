use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use airq_core::{sample_cities, CityReading, Parameters};
use airq_view::{
    build_dashboard_from, render_page, PM10_WEIGHT_PARAM, PM25_WEIGHT_PARAM, THRESHOLD_PARAM,
};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, ParamError};
use crate::protocol::{AnalyzeResponse, ApiError};

/// Idle sockets (speculative preconnects) are dropped after this long.
const REQUEST_LINE_TIMEOUT: Duration = Duration::from_millis(400);
const READ_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_BODY_BYTES: usize = 64 * 1024;

const ROUTES: [&str; 3] = ["/", "/api/analyze", "/health"];

pub struct DashboardServer {
    readings: Vec<CityReading>,
}

impl DashboardServer {
    pub fn new() -> Self {
        Self::with_readings(sample_cities())
    }

    pub fn with_readings(readings: Vec<CityReading>) -> Self {
        Self { readings }
    }

    pub fn serve_http(&self, addr: &str) -> Result<(), DashboardError> {
        let listener = TcpListener::bind(addr).map_err(|source| DashboardError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        let local = listener.local_addr()?;
        info!(addr = %local, "airq dashboard listening");
        self.serve(&listener)
    }

    /// Handles connections one at a time until the listener fails.
    pub fn serve(&self, listener: &TcpListener) -> Result<(), DashboardError> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = self.handle_http_connection(stream) {
                        warn!(error = %err, "http request error");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "http accept error");
                }
            }
        }
        Ok(())
    }

    fn handle_http_connection(&self, mut stream: TcpStream) -> io::Result<()> {
        stream.set_read_timeout(Some(REQUEST_LINE_TIMEOUT))?;
        let Some(req) = read_http_request(&stream)? else {
            return Ok(());
        };
        let response = self.dispatch_http_request(&req);
        info!(
            method = %req.method,
            path = %req.path,
            status = response.status,
            "request served"
        );
        write_http_response(&mut stream, response)
    }

    fn dispatch_http_request(&self, req: &HttpRequest) -> HttpResponse {
        if !ROUTES.contains(&req.path.as_str()) {
            return HttpResponse::json(
                404,
                &ApiError::new("not_found", format!("no route for {}", req.path)),
            );
        }
        if req.method != "GET" {
            return HttpResponse::json(
                405,
                &ApiError::new(
                    "method_not_allowed",
                    format!("{} is not supported on {}", req.method, req.path),
                ),
            );
        }

        if req.path == "/health" {
            return HttpResponse::json(200, &json!({"status":"ok"}));
        }

        let params = match params_from_query(&req.query) {
            Ok(params) => params,
            Err(err) => {
                debug!(error = %err, "rejecting request parameters");
                return HttpResponse::json(400, &ApiError::new("invalid_parameter", err.to_string()));
            }
        };
        let view = build_dashboard_from(&self.readings, &params);

        if req.path == "/api/analyze" {
            return HttpResponse::json(200, &AnalyzeResponse { params, view });
        }
        HttpResponse::text(200, "text/html; charset=utf-8", render_page(&params, &view))
    }
}

impl Default for DashboardServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the three scoring parameters. Absent or empty values fall back to
/// the defaults; anything else must parse as a finite number.
pub fn params_from_query(query: &HashMap<String, String>) -> Result<Parameters, ParamError> {
    let defaults = Parameters::default();
    Ok(Parameters {
        threshold: query_f64(query, THRESHOLD_PARAM, defaults.threshold)?,
        pm10_weight: query_f64(query, PM10_WEIGHT_PARAM, defaults.pm10_weight)?,
        pm25_weight: query_f64(query, PM25_WEIGHT_PARAM, defaults.pm25_weight)?,
    })
}

fn query_f64(
    query: &HashMap<String, String>,
    name: &'static str,
    default: f64,
) -> Result<f64, ParamError> {
    let Some(raw) = query.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParamError::NotANumber {
            name,
            value: raw.to_string(),
        })
}

#[derive(Debug)]
struct HttpRequest {
    method: String,
    path: String,
    query: HashMap<String, String>,
}

struct HttpResponse {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl HttpResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn text(status: u16, content_type: &'static str, body: String) -> Self {
        Self {
            status,
            content_type,
            body: body.into_bytes(),
        }
    }
}

fn read_http_request(stream: &TcpStream) -> io::Result<Option<HttpRequest>> {
    let mut reader = io::BufReader::new(stream.try_clone()?);
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => return Ok(None),
        Ok(_) => {}
        Err(err) if is_timeout(&err) => {
            debug!("dropping idle connection");
            return Ok(None);
        }
        Err(err) => return Err(err),
    }
    let first = line.trim_end_matches(['\r', '\n']);
    if first.is_empty() {
        return Ok(None);
    }
    stream.set_read_timeout(Some(READ_TIMEOUT))?;

    let mut parts = first.split_whitespace();
    let Some(method) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line (missing method)",
        ));
    };
    let Some(path_with_query) = parts.next() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid http request line (missing path)",
        ));
    };
    let (path, query) = parse_path_query(path_with_query);

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 {
            break;
        }
        let header = header.trim_end_matches(['\r', '\n']);
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse::<usize>().unwrap_or(0);
            }
        }
    }

    // Bodies are ignored but drained so the client sees a clean close.
    if content_length > MAX_BODY_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("request body of {content_length} bytes exceeds limit"),
        ));
    }
    let mut body = vec![0_u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body)?;
    }
    Ok(Some(HttpRequest {
        method: method.to_string(),
        path,
        query,
    }))
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

fn write_http_response(stream: &mut TcpStream, response: HttpResponse) -> io::Result<()> {
    let reason = http_reason_phrase(response.status);
    let headers = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nCache-Control: no-store\r\nConnection: close\r\n\r\n",
        response.status,
        reason,
        response.content_type,
        response.body.len()
    );
    stream.write_all(headers.as_bytes())?;
    stream.write_all(&response.body)?;
    stream.flush()
}

fn http_reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "OK",
    }
}

fn parse_path_query(raw: &str) -> (String, HashMap<String, String>) {
    let (path, query_str) = match raw.split_once('?') {
        Some((p, q)) => (p.to_string(), q),
        None => (raw.to_string(), ""),
    };
    let mut query = HashMap::new();
    for pair in query_str.split('&') {
        if pair.is_empty() {
            continue;
        }
        if let Some((k, v)) = pair.split_once('=') {
            query.insert(k.to_string(), v.to_string());
        } else {
            query.insert(pair.to_string(), String::new());
        }
    }
    (path, query)
}
