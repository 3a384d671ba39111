use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

#[derive(Clone, Copy)]
enum Mode {
    Payload,
    AlwaysError,
}

/// Spawn a lightweight payload server implementing `GET /size/{n}`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_payload_server() -> Result<(String, ServerHandle), String> {
    spawn(Mode::Payload)
}

/// Spawn a server that answers every request with `500`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_error_server() -> Result<(String, ServerHandle), String> {
    spawn(Mode::AlwaysError)
}

/// Reserve a port with nothing listening on it, for connection-refused runs.
///
/// # Errors
///
/// Returns an error if no local port can be reserved.
pub fn refused_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("probe addr failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn spawn(mode: Mode) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, mode));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

fn handle_client(mut stream: TcpStream, mode: Mode) {
    let mut buffer = [0u8; 1024];
    let read = match stream.read(&mut buffer) {
        Ok(read) => read,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(buffer.get(..read).unwrap_or_default());

    let response = match mode {
        Mode::AlwaysError => {
            b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_vec()
        }
        Mode::Payload => match requested_size(&request) {
            Some(size) => {
                let mut response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nCache-Control: no-store, must-revalidate\r\nExpires: 0\r\nConnection: close\r\n\r\n",
                    size
                )
                .into_bytes();
                response.extend(std::iter::repeat_n(b'X', size));
                response
            }
            None => {
                b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    .to_vec()
            }
        },
    };

    if stream.write_all(&response).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn requested_size(request: &str) -> Option<usize> {
    let request_line = request.lines().next()?;
    let path = request_line.split_whitespace().nth(1)?;
    let size: usize = path.strip_prefix("/size/")?.parse().ok()?;
    if size > 0 { Some(size) } else { None }
}
