use std::io::{self, Write};
use std::net::SocketAddrV4;
use std::time::Duration;

use bencoder::{BoxError, Dictionary, Encoder, Marshaler, Value};
use tracing_subscriber::EnvFilter;

// BEP 23 compact peer list: 6 bytes per peer, emitted as a single bencode string.
#[derive(Debug)]
struct CompactPeers(Vec<SocketAddrV4>);

impl Marshaler for CompactPeers {
    fn marshal_bencode(&self) -> Result<Vec<u8>, BoxError> {
        let mut blob = Vec::with_capacity(self.0.len() * 6);
        for peer in &self.0 {
            blob.extend_from_slice(&peer.ip().octets());
            blob.extend_from_slice(&peer.port().to_be_bytes());
        }
        let mut out = format!("{}:", blob.len()).into_bytes();
        out.extend_from_slice(&blob);
        Ok(out)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let peers = CompactPeers(vec![
        "10.0.0.1:6881".parse()?,
        "192.168.1.20:51413".parse()?,
    ]);

    let mut resp = Dictionary::new();
    resp.insert("interval", Duration::from_secs(1800));
    resp.insert("min interval", Duration::from_millis(900_500));
    resp.insert("complete", 12u32);
    resp.insert("incomplete", 3u32);
    resp.insert("peers", Value::custom(peers));
    resp.insert("warning messages", vec!["tracker is read-only"]);

    let mut enc = Encoder::new(Vec::new());
    enc.encode(&Value::Dict(resp))?;
    let out = enc.into_inner();
    tracing::info!(len = out.len(), "encoded announce response");

    let mut stdout = io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
