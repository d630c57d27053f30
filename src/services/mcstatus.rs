//! Minecraft Server List Ping client: handshake + status request over TCP,
//! VarInt-framed packets, JSON payload.

use std::time::Duration;

use serde::Deserialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::bot::error::Error;

const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Status responses are small; anything bigger than this is not a status
/// response.
const MAX_PACKET_LEN: i32 = 1024 * 1024;

#[derive(Debug)]
pub struct ServerStatus {
    pub version: String,
    pub players_online: i64,
    pub players_max: i64,
    pub motd: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    version: Version,
    players: Players,
    #[serde(default)]
    description: serde_json::Value,
}

#[derive(Deserialize)]
struct Version {
    name: String,
}

#[derive(Deserialize)]
struct Players {
    online: i64,
    max: i64,
}

pub async fn query(host: &str, port: u16) -> Result<ServerStatus, Error> {
    tokio::time::timeout(QUERY_TIMEOUT, query_inner(host, port))
        .await
        .map_err(|_| Error::Protocol(format!("{}:{} did not answer in time", host, port)))?
}

async fn query_inner(host: &str, port: u16) -> Result<ServerStatus, Error> {
    let mut stream = TcpStream::connect((host, port)).await?;

    // Handshake: packet id 0x00, protocol version -1 (status ping), server
    // address, port, next state 1 (status)
    let mut handshake = Vec::with_capacity(host.len() + 16);
    write_varint(&mut handshake, 0x00);
    write_varint(&mut handshake, -1);
    write_varint(&mut handshake, host.len() as i32);
    handshake.extend_from_slice(host.as_bytes());
    handshake.extend_from_slice(&port.to_be_bytes());
    write_varint(&mut handshake, 1);
    send_packet(&mut stream, &handshake).await?;

    // Status request: packet id 0x00, no fields
    send_packet(&mut stream, &[0x00]).await?;

    let payload = read_packet(&mut stream).await?;
    let mut cursor = &payload[..];

    let packet_id = read_varint_buf(&mut cursor)?;
    if packet_id != 0x00 {
        return Err(Error::Protocol(format!(
            "unexpected packet id {:#x} in status response",
            packet_id
        )));
    }

    let json_len = read_varint_buf(&mut cursor)? as usize;
    if cursor.len() < json_len {
        return Err(Error::Protocol("status response shorter than declared".into()));
    }

    let response: StatusResponse = serde_json::from_slice(&cursor[..json_len])
        .map_err(|e| Error::Protocol(format!("malformed status JSON: {}", e)))?;

    Ok(ServerStatus {
        version: response.version.name,
        players_online: response.players.online,
        players_max: response.players.max,
        motd: motd_text(&response.description),
    })
}

/// The MOTD is either a bare string or a chat component tree
/// (`{"text": ..., "extra": [...]}`); flatten it to plain text.
fn motd_text(description: &serde_json::Value) -> String {
    match description {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => {
            let mut out = String::new();
            if let Some(serde_json::Value::String(text)) = map.get("text") {
                out.push_str(text);
            }
            if let Some(serde_json::Value::Array(extra)) = map.get("extra") {
                for part in extra {
                    out.push_str(&motd_text(part));
                }
            }
            out
        }
        _ => String::new(),
    }
}

async fn send_packet(stream: &mut TcpStream, payload: &[u8]) -> Result<(), Error> {
    let mut framed = Vec::with_capacity(payload.len() + 5);
    write_varint(&mut framed, payload.len() as i32);
    framed.extend_from_slice(payload);
    stream.write_all(&framed).await?;
    Ok(())
}

async fn read_packet(stream: &mut TcpStream) -> Result<Vec<u8>, Error> {
    let len = read_varint_stream(stream).await?;
    if len <= 0 || len > MAX_PACKET_LEN {
        return Err(Error::Protocol(format!("bad packet length {}", len)));
    }

    let mut payload = vec![0u8; len as usize];
    stream.read_exact(&mut payload).await?;
    Ok(payload)
}

fn write_varint(buf: &mut Vec<u8>, value: i32) {
    let mut value = value as u32;
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

async fn read_varint_stream(stream: &mut TcpStream) -> Result<i32, Error> {
    let mut result: u32 = 0;
    for i in 0..5 {
        let byte = stream.read_u8().await?;
        result |= ((byte & 0x7f) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result as i32);
        }
    }
    Err(Error::Protocol("VarInt longer than five bytes".into()))
}

fn read_varint_buf(input: &mut &[u8]) -> Result<i32, Error> {
    let mut result: u32 = 0;
    for i in 0..5 {
        let Some((&byte, rest)) = input.split_first() else {
            return Err(Error::Protocol("truncated VarInt".into()));
        };
        *input = rest;
        result |= ((byte & 0x7f) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result as i32);
        }
    }
    Err(Error::Protocol("VarInt longer than five bytes".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_round_trips() {
        for value in [0, 1, 2, 127, 128, 255, 300, 25565, 2_097_151, i32::MAX, -1] {
            let mut buf = Vec::new();
            write_varint(&mut buf, value);
            let mut slice = buf.as_slice();
            assert_eq!(read_varint_buf(&mut slice).unwrap(), value);
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn varint_boundary_encodings() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 127);
        assert_eq!(buf, [0x7f]);

        buf.clear();
        write_varint(&mut buf, 128);
        assert_eq!(buf, [0x80, 0x01]);

        // Negative values take the full five bytes
        buf.clear();
        write_varint(&mut buf, -1);
        assert_eq!(buf, [0xff, 0xff, 0xff, 0xff, 0x0f]);
    }

    #[test]
    fn truncated_varint_is_an_error() {
        let mut slice: &[u8] = &[0x80, 0x80];
        assert!(read_varint_buf(&mut slice).is_err());
    }

    #[test]
    fn motd_accepts_both_wire_shapes() {
        assert_eq!(motd_text(&serde_json::json!("A Minecraft Server")), "A Minecraft Server");

        let chat = serde_json::json!({
            "text": "Dark",
            "extra": [{"text": "MC"}, {"text": " Network"}],
        });
        assert_eq!(motd_text(&chat), "DarkMC Network");

        assert_eq!(motd_text(&serde_json::Value::Null), "");
    }
}
