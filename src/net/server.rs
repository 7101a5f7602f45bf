//! Core HTTP server implementation.
//!
//! This module implements the low-level HTTP server runtime.
//! It is responsible only for networking concerns such as:
//! - accepting TCP connections,
//! - reading raw bytes from the network,
//! - writing raw bytes back to the client.
//!
//! Request parsing, validation and response generation are delegated to
//! the `http` and `handler` namespaces. One request is served per
//! connection.
//!
//! ## Request handling flow
//!
//! 1. Accept a TCP connection
//! 2. Read raw data from the stream, bounded by the configured read timeout
//! 3. Incrementally parse the data into an [`HttpRequest`]
//!    (delegated to [`http::parser::Parser`](crate::http::parser::Parser))
//! 4. Validate the request once its headers are in
//!    (delegated to [`http::validator::Validator`](crate::http::validator::Validator))
//! 5. Run the middleware pipeline and the router
//!    (delegated to [`handler::handle_request`](crate::handler::handle_request))
//! 6. Serialize and write the response back to the client

use std::sync::Arc;

use async_std::io;
use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;
use async_std::task;

use crate::config::config;
use crate::handler;
use crate::handler::middleware::{MiddlewareError, Pipeline};
use crate::http::parser::*;
use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::validator::{Validator, ValidatorError};

pub struct Server {
    pipeline: Arc<Pipeline>,
}

/// Errors that can occur while reading and parsing an HTTP request from the stream
/// used to interrupt the flow and return appropriate responses.
enum ReadError {
    Io(std::io::Error),
    ConnectionClosed,
    Parser(ParserError),
    Validator(ValidatorError),
}

impl Server {
    /// Builds the middleware pipeline named in the configuration.
    pub fn new() -> Result<Self, MiddlewareError> {
        let pipeline = Pipeline::from_names(config().middleware.as_slice())?;
        Ok(Self::with_pipeline(pipeline))
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Binds to the configured address and port and serves forever,
    /// one task per client.
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind((config().address, config().port)).await?;
        log::info!(
            "Listening on {} with middleware {:?}",
            listener.local_addr()?,
            self.pipeline.names()
        );

        while let Ok((stream, addr)) = listener.accept().await {
            let pipeline = Arc::clone(&self.pipeline);
            task::spawn(async move {
                if let Err(err) = Self::handle_client(stream, pipeline).await {
                    log::error!("Connection with {addr} failed: {err}");
                }
            });
        }

        Ok(())
    }

    /// Reads and incrementally parses an HTTP request from the TCP stream.
    ///
    /// The request is validated as soon as its headers are parsed, before
    /// any body byte is read.
    async fn read_request(stream: &mut TcpStream) -> Result<HttpRequest, ReadError> {
        let mut parser = Parser::new();
        let mut req = HttpRequest::new();
        let mut buffer = vec![0; config().buffer_size];
        let mut n = 0;

        loop {
            let outcome = parser
                .feed(&buffer[..n], &mut req)
                .map_err(ReadError::Parser)?;
            n = 0;

            match outcome {
                ParserOk::HeadersDone => {
                    Validator::validate_request(&req).map_err(ReadError::Validator)?;
                }
                ParserOk::Done => break,
                ParserOk::Incomplete => {
                    n = match io::timeout(config().read_timeout, stream.read(&mut buffer)).await {
                        Ok(0) => return Err(ReadError::ConnectionClosed),
                        Ok(n) => n,
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => 0,
                        Err(e) => return Err(ReadError::Io(e)),
                    };
                }
            }
        }

        Ok(req)
    }

    /// Writes the given `HttpResponse` back to the TCP stream.
    async fn write_response(
        stream: &mut TcpStream,
        response: &HttpResponse,
    ) -> std::io::Result<()> {
        let headers = response.build_headers();
        io::timeout(config().write_timeout, async {
            stream.write_all(headers.as_bytes()).await?;
            stream.write_all(&response.body).await?;
            stream.flush().await
        })
        .await
    }

    /// Handles a single client connection.
    async fn handle_client(mut stream: TcpStream, pipeline: Arc<Pipeline>) -> std::io::Result<()> {
        let mut response = match Self::read_request(&mut stream).await {
            Ok(req) => {
                let line = format!("{:?} {}", req.method, req.uri);
                let res = handler::handle_request(&pipeline, req);
                log::debug!("{line} -> {}", res.status.code());
                res
            }
            Err(ReadError::Io(err)) if err.kind() == std::io::ErrorKind::TimedOut => {
                log::debug!("Client timed out before sending a full request");
                return Ok(());
            }
            Err(ReadError::Io(err)) => {
                log::error!("I/O error while reading request: {:?}", err);
                return Ok(());
            }
            Err(ReadError::ConnectionClosed) => return Ok(()),
            Err(ReadError::Parser(err)) => {
                log::debug!("Rejecting unparsable request: {:?}", err);
                handler::handle_error(err.into_http_status())
            }
            Err(ReadError::Validator(err)) => {
                log::debug!("Rejecting invalid request: {:?}", err);
                handler::handle_error(err.into_http_status())
            }
        };

        response.set_header(ResponseHeader::Connection, "close");
        response.finalize(&config().server_name);
        Self::write_response(&mut stream, &response).await
    }
}
