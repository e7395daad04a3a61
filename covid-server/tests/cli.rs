use assert_cmd::Command;
use predicates::prelude::*;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const DATASET: &str = "\
1,10,20/03/2020,0,0,Sindh,1
2,20,20/03/2020,1,0,Punjab,1
3,30,21/03/2020,1,1,Sindh,1
";

fn server() -> Command {
    Command::cargo_bin("covid-server").unwrap()
}

#[test]
fn help_lists_bind_flags() {
    server()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--network"))
        .stdout(predicate::str::contains("--endpoint"))
        .stdout(predicate::str::contains("--dataset"));
}

#[test]
fn unsupported_network_fails() {
    server()
        .args(["-n", "udp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");

    server()
        .args(["-e", "127.0.0.1:0", "-d"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset"));
}

#[test]
fn malformed_row_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "1,10,20/03/2020,0,0,Sindh\n").unwrap();

    server()
        .args(["-e", "127.0.0.1:0", "-d"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 7 fields"));
}

struct KillOnDrop(Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn connect_with_retry(addr: &str) -> TcpStream {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        match TcpStream::connect(addr) {
            Ok(s) => return s,
            Err(_) if Instant::now() < deadline => thread::sleep(Duration::from_millis(50)),
            Err(e) => panic!("server did not come up on {addr}: {e}"),
        }
    }
}

fn read_until_line<R: BufRead>(reader: &mut R, last: &str) -> String {
    let mut out = String::new();
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).unwrap();
        assert!(n > 0, "connection closed early, got so far: {out:?}");
        out.push_str(&line);
        if line == last {
            return out;
        }
    }
}

#[test]
fn serves_queries_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("covid.csv");
    std::fs::write(&path, DATASET).unwrap();

    let addr = format!("127.0.0.1:{}", free_port());
    let child = std::process::Command::new(assert_cmd::cargo::cargo_bin("covid-server"))
        .args(["-e", &addr, "--strict-json", "-d"])
        .arg(&path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let _guard = KillOnDrop(child);

    let stream = connect_with_retry(&addr);
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut writer = stream;

    let greeting = read_until_line(&mut reader, "Usage: <{\"query\": {\"region\": \"Sindh\"}} OR {\"query\": {\"date\": \"2020-03-20\"}}>\n");
    assert!(greeting.starts_with("Connected...\n"));

    writer
        .write_all(b"{\"query\": {\"region\": \"Sindh\"}}\n")
        .unwrap();
    let reply = read_until_line(&mut reader, "]}\n");
    assert_eq!(reply.matches("\"region\": \"Sindh\"").count(), 2);
    assert!(reply.contains("\"date\": \"2020-03-20\""));
    assert!(reply.contains("\"date\": \"2020-03-21\""));

    writer
        .write_all(b"{\"query\": {\"date\": \"2020-03-20\"}}\n")
        .unwrap();
    let reply = read_until_line(&mut reader, "]}\n");
    assert!(reply.contains("\"region\": \"Sindh\""));
    assert!(reply.contains("\"region\": \"Punjab\""));

    writer
        .write_all(b"{\"query\": {\"region\": \"Nowhere\"}}\n")
        .unwrap();
    assert_eq!(read_until_line(&mut reader, "Nothing Found\n"), "Nothing Found\n");

    writer
        .write_all(b"{\"query\": {\"date\": \"2020-0320\"}}\n")
        .unwrap();
    let mut line = String::new();
    reader.read_line(&mut line).unwrap();
    assert_eq!(line, "Invalid command\n");
}
