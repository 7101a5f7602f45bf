pub mod middleware;
mod responses;
pub mod router;

use crate::handler::middleware::Pipeline;
use crate::http::HttpMethod;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

/// Runs `req` through the middleware request hooks, the router, then the
/// response hooks.
///
/// `HEAD` is routed like `GET`; the body is dropped afterwards while its
/// `Content-Length` stays.
pub fn handle_request(pipeline: &Pipeline, mut req: HttpRequest) -> HttpResponse {
    let is_head = req.method == HttpMethod::Head;
    pipeline.process_request(&mut req);
    let mut res = router::route(&mut req);
    pipeline.process_response(&mut req, &mut res);
    if is_head {
        res.body.clear();
    }
    res
}

pub fn handle_error(err: HttpStatus) -> HttpResponse {
    responses::any_error(err)
}
