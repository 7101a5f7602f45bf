use flate2::Compression as Level;
use flate2::write::{DeflateEncoder, GzEncoder};
use std::io::Write;

use crate::handler::middleware::Middleware;
use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHeader};

// Content codings this server can produce, in order of preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionAlgorithm {
    Gzip,
    Deflate,
}

impl CompressionAlgorithm {
    pub fn as_str(&self) -> &str {
        match self {
            CompressionAlgorithm::Gzip => "gzip",
            CompressionAlgorithm::Deflate => "deflate",
        }
    }

    /// Picks a supported coding from an `Accept-Encoding` value.
    /// Codings listed with `q=0` are refused.
    pub fn negotiate(accept_encoding: &str) -> Option<Self> {
        let accepted: Vec<&str> = accept_encoding
            .split(',')
            .filter_map(|item| {
                let mut parts = item.split(';').map(str::trim);
                let coding = parts.next()?;
                let refused = parts.any(|p| {
                    p.strip_prefix("q=")
                        .and_then(|q| q.parse::<f32>().ok())
                        .is_some_and(|q| q == 0.0)
                });
                (!refused && !coding.is_empty()).then_some(coding)
            })
            .collect();

        [CompressionAlgorithm::Gzip, CompressionAlgorithm::Deflate]
            .into_iter()
            .find(|algo| {
                accepted
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(algo.as_str()) || *c == "*")
            })
    }
}

/// Compresses response bodies for clients that send `Accept-Encoding`.
pub struct Compression;

impl Middleware for Compression {
    fn name(&self) -> &'static str {
        "compression"
    }

    fn process_response(&self, req: &mut HttpRequest, res: &mut HttpResponse) {
        let Some(accepted) = req.headers.get("Accept-Encoding") else {
            return;
        };
        if res.body.is_empty() || res.headers.contains("Content-Encoding") {
            return;
        }
        let Some(algo) = CompressionAlgorithm::negotiate(accepted) else {
            return;
        };

        if let Err(err) = compress_body(res, algo) {
            log::error!("Compression IO error: {}", err);
        }
    }
}

fn compress_body(res: &mut HttpResponse, algo: CompressionAlgorithm) -> std::io::Result<()> {
    res.body = match algo {
        CompressionAlgorithm::Gzip => {
            let mut e = GzEncoder::new(Vec::new(), Level::default());
            e.write_all(&res.body)?;
            e.finish()?
        }
        CompressionAlgorithm::Deflate => {
            let mut e = DeflateEncoder::new(Vec::new(), Level::default());
            e.write_all(&res.body)?;
            e.finish()?
        }
    };

    res.set_header(ResponseHeader::ContentEncoding, algo.as_str());
    res.set_header(ResponseHeader::ContentLength, &res.body.len().to_string());
    Ok(())
}
