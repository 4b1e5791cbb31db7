use crate::{
    error::{LeonardoError, Result},
    logger,
    models::ServiceResponse,
    secrets::Credential,
};
use reqwest::{
    header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, Url,
};
use serde::Serialize;

/// Authenticated JSON round trips against the REST base URL.
///
/// Shared by the generation and upscale clients. Holds no mutable state.
#[derive(Clone)]
pub struct ApiTransport {
    http: Client,
    base_url: Url,
    authorization: HeaderValue,
}

impl ApiTransport {
    pub fn new(http: Client, base_url: &str, credential: Credential) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            LeonardoError::ConfigError(format!("invalid base URL `{}`: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(LeonardoError::ConfigError(format!(
                "base URL `{}` cannot carry a path",
                base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            authorization: credential.authorization_header()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded on its own.
    ///
    /// `.` and `..` are rejected: URL normalization would drop them and the
    /// request would land on a different route.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(LeonardoError::invalid(
                "path",
                format!("`{}` cannot be used as a path segment", segment),
            ));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LeonardoError::ConfigError("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(&self, segments: &[&str]) -> Result<ServiceResponse> {
        let url = self.endpoint(segments)?;
        log::debug!("GET {}", url.path());
        let request = self.authorized(Method::GET, url.clone());
        self.execute(Method::GET, url, request).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &T,
    ) -> Result<ServiceResponse> {
        let url = self.endpoint(segments)?;
        let body = serde_json::to_vec(body)
            .map_err(|e| LeonardoError::SerializationError(e.to_string()))?;
        log::debug!(
            "POST {} payload: {}",
            url.path(),
            String::from_utf8_lossy(&body)
        );

        let request = self
            .authorized(Method::POST, url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.execute(Method::POST, url, request).await
    }

    fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(ACCEPT, "application/json")
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        request: RequestBuilder,
    ) -> Result<ServiceResponse> {
        let _timer = logger::timer(&format!("{} {}", method, url.path()));

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                log::error!("{} {} could not be built: {}", method, url.path(), e);
                return LeonardoError::ConfigError(format!("request could not be built: {}", e));
            }
            log::error!("{} {} did not reach the service: {}", method, url.path(), e);
            LeonardoError::TransportFailure(e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(LeonardoError::TransportFailure)?;

        if !status.is_success() {
            log::error!("{} {} returned {}", method, url.path(), status);
            return Err(LeonardoError::RequestFailure {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(ServiceResponse::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            LeonardoError::ResponseError(format!(
                "{} {} returned a non-JSON body: {}",
                method,
                url.path(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> Result<ApiTransport> {
        ApiTransport::new(Client::new(), base_url, Credential::new("token"))
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let transport = transport("https://cloud.leonardo.ai/api/rest/v1").unwrap();
        let url = transport.endpoint(&["generations", "abc123"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.leonardo.ai/api/rest/v1/generations/abc123"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids_as_one_segment() {
        let transport = transport("https://cloud.leonardo.ai/api/rest/v1/").unwrap();
        let url = transport.endpoint(&["generations", "a/b c"]).unwrap();
        assert_eq!(url.path(), "/api/rest/v1/generations/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let transport = transport("https://cloud.leonardo.ai/api/rest/v1").unwrap();
        for id in [".", ".."] {
            let err = transport.endpoint(&["generations", id]).unwrap_err();
            assert!(matches!(err, LeonardoError::InvalidParameter { field: "path", .. }));
        }
        assert!(transport.endpoint(&["generations", "...", "a.b"]).is_ok());
    }

    #[test]
    fn test_unsendable_credential_fails_at_construction() {
        let result = ApiTransport::new(
            Client::new(),
            "https://cloud.leonardo.ai/api/rest/v1",
            Credential::new("line-one\nline-two"),
        );
        assert!(matches!(result, Err(LeonardoError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_unusable_base_urls() {
        assert!(matches!(
            transport("not a url"),
            Err(LeonardoError::ConfigError(_))
        ));
        assert!(matches!(
            transport("mailto:someone@example.com"),
            Err(LeonardoError::ConfigError(_))
        ));
    }
}
