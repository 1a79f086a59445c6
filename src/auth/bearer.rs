//! Bearer credential extraction from HTTP requests.

use crate::error::{MaternaError, MaternaResult};
use actix_web::HttpRequest;

/// Extract the bearer token from the `Authorization` header.
///
/// A missing or malformed header is an [`MaternaError::AuthFailure`], the same
/// uniform rejection an invalid token produces.
pub fn bearer_token(req: &HttpRequest) -> MaternaResult<&str> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or(MaternaError::AuthFailure)?;
    let value = header.to_str().map_err(|_| MaternaError::AuthFailure)?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(MaternaError::AuthFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn extracts_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc.def");
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        let req = TestRequest::default().to_http_request();
        assert!(bearer_token(&req).is_err());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(bearer_token(&req).is_err());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert!(bearer_token(&req).is_err());
    }
}
