use crate::config::config;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

pub fn html(status: HttpStatus, body: String) -> HttpResponse {
    let mut res = HttpResponse::new();
    res.status = status;
    res.set_body(body.into_bytes(), "text/html");
    res
}

pub fn text(status: HttpStatus, body: String) -> HttpResponse {
    let mut res = HttpResponse::new();
    res.status = status;
    res.set_body(body.into_bytes(), "text/plain; charset=utf-8");
    res
}

pub fn welcome(visits: u64) -> HttpResponse {
    html(
        HttpStatus::Ok,
        format!(
            "<h1>Welcome to {}!</h1><p>Visit number {}.</p>",
            config().server_name,
            visits
        ),
    )
}

pub fn any_error(err: HttpStatus) -> HttpResponse {
    html(
        err,
        format!("<h1>{} {}</h1>", err.code(), err.reason()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_page_names_status() {
        let res = any_error(HttpStatus::NotFound);
        assert_eq!(res.status, HttpStatus::NotFound);
        assert_eq!(res.body, b"<h1>404 Not Found</h1>");
        assert_eq!(res.headers.get("Content-Length").map(String::as_str), Some("22"));
    }
}
