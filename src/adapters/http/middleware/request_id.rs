use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::{HeaderName, HeaderValue},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};
use uuid::Uuid;

/// Header carrying the request correlation id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID middleware that tags every request with a correlation ID
///
/// This middleware:
/// 1. Reuses an incoming X-Request-ID header, generating a UUID v4 when absent
/// 2. Echoes the ID back on the response as X-Request-ID
/// 3. Stores the ID in request extensions for use in tracing/logging
///
/// Reusing the incoming value lets a reverse proxy or API gateway assign
/// the ID once and correlate its logs with ours.
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use cotizador::adapters::http::middleware::request_id::RequestIdMiddleware;
///
/// let app = App::new()
///   .wrap(RequestIdMiddleware::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
  /// Creates a new request ID middleware
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = RequestIdMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RequestIdMiddlewareService {
      service: Rc::new(service),
    }))
  }
}

pub struct RequestIdMiddlewareService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      // Reuse the caller's ID when it sent one, otherwise mint our own
      let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| RequestId(value.to_string()))
        .unwrap_or_default();

      // Store request ID in extensions for logging/tracing
      req.extensions_mut().insert(request_id.clone());

      // Add request ID to tracing span
      tracing::Span::current().record("request_id", request_id.as_str());

      // Call the next service
      let mut res = service.call(req).await?;

      // Echo the ID back; an unrepresentable incoming value is dropped
      if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        res
          .headers_mut()
          .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
      }

      Ok(res)
    })
  }
}

/// Request correlation ID
///
/// This type is stored in request extensions and can be retrieved by handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
  /// Creates a freshly generated request ID
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  /// Returns the request ID as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for RequestId {
  fn default() -> Self {
    Self::generate()
  }
}

impl std::fmt::Display for RequestId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Extension trait to easily extract request ID from request
pub trait RequestIdExt {
  /// Get the request ID from request extensions
  ///
  /// Returns None if the request ID is not present (middleware not configured).
  fn request_id(&self) -> Option<RequestId>;
}

impl RequestIdExt for actix_web::HttpRequest {
  fn request_id(&self) -> Option<RequestId> {
    self.extensions().get::<RequestId>().cloned()
  }
}
