//! Minimal RESP key-value service.
//!
//! Speaks just enough of the Redis wire protocol for a synchronous client to
//! connect and issue `GET` / `SET`. `PING` answers `+PONG`; every other
//! command (`SELECT`, `CLIENT SETINFO`, ...) is acknowledged with `+OK`.
//! Only array-of-bulk-string requests are understood, which is what real
//! clients send.

use std::{collections::HashMap, io, sync::Arc};

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    sync::RwLock,
};

pub type Store = Arc<RwLock<HashMap<String, String>>>;

/// Largest bulk string accepted, matching Redis' `proto-max-bulk-len`.
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Most arguments accepted in one command, as in Redis.
pub const MAX_ARGS: usize = 1024 * 1024;

pub async fn run_kv(listener: TcpListener) -> Result<(), io::Error> {
    let store: Store = Arc::new(RwLock::new(HashMap::new()));
    loop {
        let (stream, peer) = listener.accept().await?;
        let store = store.clone();
        tokio::spawn(async move {
            if let Err(err) = serve_connection(stream, store).await {
                tracing::warn!(%peer, %err, "kv connection closed with error");
            }
        });
    }
}

async fn serve_connection(stream: TcpStream, store: Store) -> Result<(), io::Error> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    while let Some(args) = read_command(&mut reader).await? {
        let reply = execute(&store, &args).await;
        write_half.write_all(&reply).await?;
    }
    Ok(())
}

/// Read one `*N` array of `$len` bulk strings. `None` on a clean EOF.
async fn read_command<R>(reader: &mut R) -> Result<Option<Vec<String>>, io::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    let count = parse_length(&line, '*')?;
    if count > MAX_ARGS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{count} arguments exceeds {MAX_ARGS}"),
        ));
    }

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await?;
        let len = parse_length(&line, '$')?;
        if len > MAX_BULK_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("bulk length {len} exceeds {MAX_BULK_LEN}"),
            ));
        }
        let mut buf = vec![0; len + 2];
        reader.read_exact(&mut buf).await?;
        buf.truncate(len);
        args.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(Some(args))
}

fn parse_length(line: &str, prefix: char) -> Result<usize, io::Error> {
    line.strip_prefix(prefix)
        .and_then(|rest| rest.trim_end().parse().ok())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected `{prefix}<len>`, got {line:?}"),
            )
        })
}

async fn execute(store: &Store, args: &[String]) -> Vec<u8> {
    let Some(command) = args.first() else {
        return error_reply("empty command");
    };
    match command.to_ascii_uppercase().as_str() {
        "GET" => match args.get(1) {
            Some(key) => match store.read().await.get(key) {
                Some(value) => bulk_reply(value),
                None => b"$-1\r\n".to_vec(),
            },
            None => error_reply("wrong number of arguments for 'get' command"),
        },
        "SET" => match (args.get(1), args.get(2)) {
            (Some(key), Some(value)) => {
                store.write().await.insert(key.clone(), value.clone());
                b"+OK\r\n".to_vec()
            }
            _ => error_reply("wrong number of arguments for 'set' command"),
        },
        "PING" => b"+PONG\r\n".to_vec(),
        _ => b"+OK\r\n".to_vec(),
    }
}

fn bulk_reply(value: &str) -> Vec<u8> {
    format!("${}\r\n{}\r\n", value.len(), value).into_bytes()
}

fn error_reply(message: &str) -> Vec<u8> {
    format!("-ERR {message}\r\n").into_bytes()
}
