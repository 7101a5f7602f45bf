use cookie::Cookie;

use crate::cookies::{CookieOptions, DeleteOptions};
use crate::handler::responses;
use crate::http::HttpMethod;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

pub const VISITS_COOKIE: &str = "visits";
pub const BANNER_COOKIE: &str = "banner_seen";

pub fn route(req: &mut HttpRequest) -> HttpResponse {
    let path = req.uri.split('?').next().unwrap_or_default().to_string();

    match (req.method, path.as_str()) {
        (HttpMethod::Get | HttpMethod::Head, "/") => count_visit(req),
        (HttpMethod::Get | HttpMethod::Head, "/cookies") => list_cookies(req),
        (HttpMethod::Get | HttpMethod::Head, "/logout") => logout(req),
        (HttpMethod::Get | HttpMethod::Head, "/banner") => dismiss_banner(),

        (HttpMethod::Get | HttpMethod::Head, _) => responses::any_error(HttpStatus::NotFound),
        _ => responses::any_error(HttpStatus::MethodNotAllowed),
    }
}

fn count_visit(req: &mut HttpRequest) -> HttpResponse {
    let visits = req
        .cookies
        .get(VISITS_COOKIE)
        .and_then(|c| c.value().parse::<u64>().ok())
        .unwrap_or(0)
        + 1;

    req.cookies.set(
        VISITS_COOKIE,
        visits.to_string(),
        CookieOptions {
            max_age: Some(60 * 60 * 24 * 365),
            ..CookieOptions::default()
        },
    );
    responses::welcome(visits)
}

fn list_cookies(req: &HttpRequest) -> HttpResponse {
    let mut body = String::new();
    for (name, cookie) in &req.cookies {
        body.push_str(&format!("{}={}\n", name, cookie));
    }
    responses::text(HttpStatus::Ok, body)
}

fn logout(req: &mut HttpRequest) -> HttpResponse {
    req.cookies.delete(VISITS_COOKIE, DeleteOptions::default());
    responses::text(HttpStatus::Ok, "Bye.\n".to_string())
}

// Response-only cookie, set without going through the request container.
fn dismiss_banner() -> HttpResponse {
    let mut res = responses::text(HttpStatus::Ok, "Banner dismissed.\n".to_string());
    let cookie = Cookie::build((BANNER_COOKIE, "1")).path("/").build();
    if let Err(e) = res.cookies.set_cookie(cookie) {
        log::error!("could not set {} cookie: {}", BANNER_COOKIE, e);
        return responses::any_error(HttpStatus::InternalServerError);
    }
    res
}
