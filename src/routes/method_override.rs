//! Method override for HTML forms.
//!
//! Browsers submit forms as GET or POST only. A POST carrying
//! `?_method=PUT` or `?_method=DELETE` is rewritten to the named method
//! before dispatch; nothing else is ever rewritten.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

pub async fn rewrite_method(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(method) = override_from_query(request.uri().query()) {
            *request.method_mut() = method;
        }
    }
    next.run(request).await
}

fn override_from_query(query: Option<&str>) -> Option<Method> {
    let value = query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("_method="))?;
    if value.eq_ignore_ascii_case("PUT") {
        Some(Method::PUT)
    } else if value.eq_ignore_ascii_case("DELETE") {
        Some(Method::DELETE)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_put_and_delete() {
        assert_eq!(override_from_query(Some("_method=PUT")), Some(Method::PUT));
        assert_eq!(
            override_from_query(Some("_method=DELETE")),
            Some(Method::DELETE)
        );
    }

    #[test]
    fn test_override_is_case_insensitive() {
        assert_eq!(
            override_from_query(Some("_method=delete")),
            Some(Method::DELETE)
        );
    }

    #[test]
    fn test_override_found_among_other_params() {
        assert_eq!(
            override_from_query(Some("foo=bar&_method=PUT&x=1")),
            Some(Method::PUT)
        );
    }

    #[test]
    fn test_no_override_for_other_methods_or_absent_param() {
        assert_eq!(override_from_query(None), None);
        assert_eq!(override_from_query(Some("foo=bar")), None);
        // only PUT and DELETE are honored
        assert_eq!(override_from_query(Some("_method=TRACE")), None);
        assert_eq!(override_from_query(Some("_method=GET")), None);
    }
}
