use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

fn reserve_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve addr");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr.to_string()
}

fn wait_for_http(addr: &str) {
    for _ in 0..80 {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    panic!("http server not ready on {addr}");
}

fn spawn_dashboard(addr: &str) -> Child {
    let child = Command::new(env!("CARGO_BIN_EXE_airq-dashboardd"))
        .env("AIRQ_HTTP_ADDR", addr)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn airq-dashboardd");
    wait_for_http(addr);
    child
}

fn send_http(addr: &str, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect http");
    let request =
        format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).expect("write request");
    stream.flush().expect("flush");
    let mut buf = String::new();
    stream.read_to_string(&mut buf).expect("read response");
    buf
}

fn response_body(response: &str) -> &str {
    response.split("\r\n\r\n").nth(1).unwrap_or("")
}

fn response_header(response: &str) -> &str {
    response.split("\r\n\r\n").next().unwrap_or("")
}

#[test]
fn http_page_health_and_analyze_work() {
    let addr = reserve_addr();
    let mut child = spawn_dashboard(&addr);

    let health = send_http(&addr, "GET", "/health");
    assert!(health.starts_with("HTTP/1.1 200"));
    assert!(response_body(&health).contains("\"status\":\"ok\""));

    let page = send_http(&addr, "GET", "/");
    assert!(page.starts_with("HTTP/1.1 200"));
    assert!(response_header(&page).contains("Content-Type: text/html; charset=utf-8"));
    let html = response_body(&page);
    assert!(html.contains("<title>Air Quality Dashboard</title>"));
    assert_eq!(html.matches("<tr class=\"status-").count(), 5);
    assert_eq!(html.matches("<svg").count(), 2);

    let analyze = send_http(&addr, "GET", "/api/analyze?threshold=25");
    assert!(analyze.starts_with("HTTP/1.1 200"));
    let body: serde_json::Value =
        serde_json::from_str(response_body(&analyze)).expect("analyze json");
    let rows = body["view"]["table"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 5);
    let incheon = rows
        .iter()
        .find(|row| row["name"] == "Incheon")
        .expect("incheon row");
    assert_eq!(incheon["score"], 41.0);
    assert_eq!(incheon["status"], "bad");

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn http_errors_are_json() {
    let addr = reserve_addr();
    let mut child = spawn_dashboard(&addr);

    let bad = send_http(&addr, "GET", "/api/analyze?pm10_weight=heavy");
    assert!(bad.starts_with("HTTP/1.1 400"));
    assert!(response_body(&bad).contains("\"error\":\"invalid_parameter\""));

    let missing = send_http(&addr, "GET", "/does-not-exist");
    assert!(missing.starts_with("HTTP/1.1 404"));

    let wrong_method = send_http(&addr, "DELETE", "/");
    assert!(wrong_method.starts_with("HTTP/1.1 405"));

    let after = send_http(&addr, "GET", "/health");
    assert!(after.starts_with("HTTP/1.1 200"));

    let _ = child.kill();
    let _ = child.wait();
}

#[test]
fn idle_connection_does_not_stall_later_requests() {
    let addr = reserve_addr();
    let mut child = spawn_dashboard(&addr);

    let idle = TcpStream::connect(&addr).expect("open idle connection");
    std::thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    let health = send_http(&addr, "GET", "/health");
    let elapsed = started.elapsed();
    assert!(health.starts_with("HTTP/1.1 200"));
    assert!(
        elapsed < Duration::from_secs(1),
        "health took {elapsed:?} behind an idle socket"
    );

    let analyze = send_http(&addr, "GET", "/api/analyze");
    assert!(analyze.starts_with("HTTP/1.1 200"));

    drop(idle);
    let _ = child.kill();
    let _ = child.wait();
}
